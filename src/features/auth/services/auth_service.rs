use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::auth::dtos::{LoginDto, RegisterDto, UserResponseDto};
use crate::features::auth::models::{AuthenticatedUser, Role, User};
use crate::features::auth::services::{TokenPair, TokenService};
use crate::shared::constants::ADMIN_EMAIL;

/// Service for registration, login and token lifecycle
pub struct AuthService {
    pool: PgPool,
    tokens: Arc<TokenService>,
}

impl AuthService {
    pub fn new(pool: PgPool, tokens: Arc<TokenService>) -> Self {
        Self { pool, tokens }
    }

    /// Signing configuration, exposed for cookie construction
    pub fn jwt_config(&self) -> &crate::core::config::JwtConfig {
        self.tokens.config()
    }

    /// Register a new user; the configured admin email gets the admin role
    pub async fn register(&self, dto: RegisterDto) -> Result<UserResponseDto> {
        let existing = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password, role, image, created_at, updated_at
            FROM users
            WHERE email = $1 OR name = $2
            "#,
        )
        .bind(&dto.email)
        .bind(&dto.name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to check existing user: {:?}", e);
            AppError::Database(e)
        })?;

        if let Some(user) = existing {
            let message = if user.email == dto.email {
                "Email sudah terdaftar"
            } else {
                "Nama pengguna sudah digunakan"
            };
            return Err(AppError::Unauthorized(message.to_string()));
        }

        let hashed = bcrypt::hash(&dto.password, bcrypt::DEFAULT_COST)
            .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;

        let role = if dto.email == ADMIN_EMAIL {
            Role::Admin
        } else {
            Role::User
        };

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, password, role)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, email, password, role, image, created_at, updated_at
            "#,
        )
        .bind(&dto.name)
        .bind(&dto.email)
        .bind(&hashed)
        .bind(role)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create user: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::info!("User registered: id={}, role={}", user.id, user.role);

        Ok(user.into())
    }

    /// Login by username + password, issuing a fresh token pair
    pub async fn login(&self, dto: LoginDto) -> Result<(UserResponseDto, TokenPair)> {
        let user = self
            .validate_user(&dto.name, &dto.password)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Email atau password salah".to_string()))?;

        let pair = self.tokens.generate_pair(&user)?;

        tracing::info!("User logged in: id={}", user.id);

        Ok((user.into(), pair))
    }

    /// Verify a refresh token and rotate the token pair.
    ///
    /// The user is re-fetched so a deleted account cannot keep refreshing.
    pub async fn refresh(&self, refresh_token: &str) -> Result<(UserResponseDto, TokenPair)> {
        let claims = self
            .tokens
            .verify_refresh(refresh_token)
            .map_err(|_| AppError::Unauthorized("Invalid refresh token".to_string()))?;

        let user = self
            .find_by_id(claims.sub)
            .await?
            .ok_or_else(|| AppError::Unauthorized("User not found".to_string()))?;

        let pair = self.tokens.generate_pair(&user)?;

        Ok((user.into(), pair))
    }

    /// Validate an access token and confirm the user still exists
    pub async fn authenticate(&self, access_token: &str) -> Result<AuthenticatedUser> {
        let claims = self.tokens.verify_access(access_token)?;

        let user = self
            .find_by_id(claims.sub)
            .await?
            .ok_or_else(|| AppError::Unauthorized("User not found".to_string()))?;

        Ok(AuthenticatedUser {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role.to_string(),
        })
    }

    /// Get the profile of an authenticated user
    pub async fn get_profile(&self, user_id: Uuid) -> Result<UserResponseDto> {
        let user = self
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::Unauthorized("User not found".to_string()))?;

        Ok(user.into())
    }

    async fn validate_user(&self, name: &str, password: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password, role, image, created_at, updated_at
            FROM users
            WHERE name = $1
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to look up user for login: {:?}", e);
            AppError::Database(e)
        })?;

        let Some(user) = user else {
            return Ok(None);
        };

        let valid = bcrypt::verify(password, &user.password)
            .map_err(|e| AppError::Internal(format!("Failed to verify password: {}", e)))?;

        Ok(valid.then_some(user))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password, role, image, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch user: {:?}", e);
            AppError::Database(e)
        })
    }
}
