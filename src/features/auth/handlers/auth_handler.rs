use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::cookies::{clear_auth_cookies, set_auth_cookies};
use crate::features::auth::dtos::{LoginDto, RegisterDto, UserResponseDto};
use crate::features::auth::models::AuthenticatedUser;
use crate::features::auth::services::AuthService;
use crate::shared::constants::REFRESH_TOKEN_COOKIE;
use crate::shared::types::ApiResponse;

/// Register a new user
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterDto,
    responses(
        (status = 201, description = "User registered successfully", body = ApiResponse<UserResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Email or username already taken")
    ),
    tag = "auth"
)]
pub async fn register(
    State(service): State<Arc<AuthService>>,
    AppJson(dto): AppJson<RegisterDto>,
) -> Result<(StatusCode, Json<ApiResponse<UserResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let user = service.register(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(user), None, None)),
    ))
}

/// Login with username and password
///
/// On success the access and refresh tokens are set as HttpOnly cookies.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginDto,
    responses(
        (status = 200, description = "Login successful, auth cookies set", body = ApiResponse<UserResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "auth"
)]
pub async fn login(
    State(service): State<Arc<AuthService>>,
    jar: CookieJar,
    AppJson(dto): AppJson<LoginDto>,
) -> Result<(CookieJar, Json<ApiResponse<UserResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let (user, pair) = service.login(dto).await?;
    let jar = set_auth_cookies(jar, &pair, service.jwt_config());

    Ok((
        jar,
        Json(ApiResponse::success(
            Some(user),
            Some("Login berhasil".to_string()),
            None,
        )),
    ))
}

/// Rotate the token pair using the refresh cookie
#[utoipa::path(
    post,
    path = "/api/auth/refresh",
    responses(
        (status = 200, description = "Tokens rotated, auth cookies replaced", body = ApiResponse<UserResponseDto>),
        (status = 401, description = "Missing or invalid refresh token")
    ),
    tag = "auth"
)]
pub async fn refresh_token(
    State(service): State<Arc<AuthService>>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<ApiResponse<UserResponseDto>>)> {
    let refresh = jar
        .get(REFRESH_TOKEN_COOKIE)
        .map(|c| c.value().to_string())
        .ok_or_else(|| AppError::Unauthorized("Missing refresh token".to_string()))?;

    let (user, pair) = service.refresh(&refresh).await?;
    let jar = set_auth_cookies(jar, &pair, service.jwt_config());

    Ok((jar, Json(ApiResponse::success(Some(user), None, None))))
}

/// Logout and clear the auth cookies
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses(
        (status = 200, description = "Logout successful, auth cookies cleared"),
        (status = 401, description = "Authentication required")
    ),
    security(("cookie_auth" = [])),
    tag = "auth"
)]
pub async fn logout(
    _user: AuthenticatedUser,
    jar: CookieJar,
) -> Result<(CookieJar, Json<ApiResponse<()>>)> {
    let jar = clear_auth_cookies(jar);

    Ok((
        jar,
        Json(ApiResponse::success(
            None,
            Some("Logout berhasil".to_string()),
            None,
        )),
    ))
}

/// Get the current authenticated user
#[utoipa::path(
    get,
    path = "/api/auth/profile",
    responses(
        (status = 200, description = "Current user retrieved successfully", body = ApiResponse<UserResponseDto>),
        (status = 401, description = "Authentication required")
    ),
    security(("cookie_auth" = [])),
    tag = "auth"
)]
pub async fn get_profile(
    user: AuthenticatedUser,
    State(service): State<Arc<AuthService>>,
) -> Result<Json<ApiResponse<UserResponseDto>>> {
    let profile = service.get_profile(user.id).await?;
    Ok(Json(ApiResponse::success(Some(profile), None, None)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::with_admin_auth;
    use axum::http::StatusCode;
    use axum::{routing::post, Router};
    use axum_test::TestServer;

    fn logout_router() -> Router {
        Router::new().route("/api/auth/logout", post(logout))
    }

    #[tokio::test]
    async fn logout_requires_authentication() {
        let server = TestServer::new(logout_router()).unwrap();

        let response = server.post("/api/auth/logout").await;

        response.assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn logout_succeeds_for_authenticated_user() {
        let server = TestServer::new(with_admin_auth(logout_router())).unwrap();

        let response = server.post("/api/auth/logout").await;

        response.assert_status(StatusCode::OK);
    }
}
