use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::config::JwtConfig;
use crate::core::error::{AppError, Result};
use crate::features::auth::models::User;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub email: String,
    pub role: String,
    pub exp: usize,
    pub iat: usize,
    pub iss: String,
}

/// Access/refresh token pair issued at login and on refresh
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Service issuing and verifying the locally signed HS256 token pair.
///
/// Access and refresh tokens use separate secrets and lifetimes, so a
/// refresh token never validates as an access token (and vice versa).
pub struct TokenService {
    config: JwtConfig,
}

impl TokenService {
    pub fn new(config: JwtConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &JwtConfig {
        &self.config
    }

    /// Issue a fresh access/refresh pair for the given user
    pub fn generate_pair(&self, user: &User) -> Result<TokenPair> {
        let access_token = self.sign(
            user,
            &self.config.access_secret,
            self.config.access_expiration_secs,
        )?;
        let refresh_token = self.sign(
            user,
            &self.config.refresh_secret,
            self.config.refresh_expiration_secs,
        )?;

        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }

    /// Verify an access token and return its claims
    pub fn verify_access(&self, token: &str) -> Result<Claims> {
        self.verify(token, &self.config.access_secret)
    }

    /// Verify a refresh token and return its claims
    pub fn verify_refresh(&self, token: &str) -> Result<Claims> {
        self.verify(token, &self.config.refresh_secret)
    }

    fn sign(&self, user: &User, secret: &str, expiration_secs: u64) -> Result<String> {
        let now = Utc::now();
        let exp = now + Duration::seconds(expiration_secs as i64);

        let claims = Claims {
            sub: user.id,
            email: user.email.clone(),
            role: user.role.to_string(),
            exp: exp.timestamp() as usize,
            iat: now.timestamp() as usize,
            iss: self.config.issuer.clone(),
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .map_err(|e| AppError::Internal(format!("Failed to sign token: {}", e)))
    }

    fn verify(&self, token: &str, secret: &str) -> Result<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.config.issuer]);

        decode::<Claims>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &validation,
        )
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                AppError::Unauthorized("Token expired".to_string())
            }
            _ => AppError::Unauthorized("Invalid token".to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::auth::models::Role;

    fn config() -> JwtConfig {
        JwtConfig {
            access_secret: "access-secret".to_string(),
            access_expiration_secs: 900,
            refresh_secret: "refresh-secret".to_string(),
            refresh_expiration_secs: 7 * 24 * 3600,
            issuer: "sepatuku-test".to_string(),
            secure_cookies: false,
        }
    }

    fn user() -> User {
        User {
            id: Uuid::new_v4(),
            name: "budi".to_string(),
            email: "budi@example.com".to_string(),
            password: "hashed".to_string(),
            role: Role::User,
            image: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn access_token_round_trips() {
        let service = TokenService::new(config());
        let user = user();

        let pair = service.generate_pair(&user).expect("pair should be issued");
        let claims = service
            .verify_access(&pair.access_token)
            .expect("access token should validate");

        assert_eq!(claims.sub, user.id);
        assert_eq!(claims.email, user.email);
        assert_eq!(claims.role, "USER");
        assert_eq!(claims.iss, "sepatuku-test");
    }

    #[test]
    fn refresh_token_round_trips() {
        let service = TokenService::new(config());
        let user = user();

        let pair = service.generate_pair(&user).expect("pair should be issued");
        let claims = service
            .verify_refresh(&pair.refresh_token)
            .expect("refresh token should validate");

        assert_eq!(claims.sub, user.id);
    }

    #[test]
    fn refresh_token_does_not_validate_as_access_token() {
        let service = TokenService::new(config());
        let pair = service
            .generate_pair(&user())
            .expect("pair should be issued");

        let result = service.verify_access(&pair.refresh_token);
        assert!(matches!(result, Err(AppError::Unauthorized(_))));
    }

    #[test]
    fn rejects_expired_token() {
        let mut cfg = config();
        cfg.access_expiration_secs = 0;
        // jsonwebtoken applies a default leeway; disable it through a direct decode
        let service = TokenService::new(cfg);
        let pair = service
            .generate_pair(&user())
            .expect("pair should be issued");

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&["sepatuku-test"]);
        validation.leeway = 0;
        validation.validate_exp = true;

        // The token expired at issuance; wait out the one-second timestamp
        // granularity before asserting
        std::thread::sleep(std::time::Duration::from_secs(2));

        let result = decode::<Claims>(
            &pair.access_token,
            &DecodingKey::from_secret("access-secret".as_bytes()),
            &validation,
        );
        assert!(result.is_err());
    }

    #[test]
    fn rejects_token_with_wrong_issuer() {
        let service = TokenService::new(config());
        let pair = service
            .generate_pair(&user())
            .expect("pair should be issued");

        let mut other_cfg = config();
        other_cfg.issuer = "someone-else".to_string();
        let other = TokenService::new(other_cfg);

        let result = other.verify_access(&pair.access_token);
        assert!(matches!(result, Err(AppError::Unauthorized(_))));
    }

    #[test]
    fn rejects_tampered_token() {
        let service = TokenService::new(config());
        let pair = service
            .generate_pair(&user())
            .expect("pair should be issued");

        let mut tampered = pair.access_token.clone();
        tampered.push('x');

        let result = service.verify_access(&tampered);
        assert!(matches!(result, Err(AppError::Unauthorized(_))));
    }
}
