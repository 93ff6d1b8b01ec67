#[cfg(test)]
use crate::features::auth::models::AuthenticatedUser;

#[cfg(test)]
use axum::{extract::Request, middleware::Next, response::Response, Router};

#[cfg(test)]
#[allow(dead_code)]
pub fn create_admin_user() -> AuthenticatedUser {
    AuthenticatedUser {
        id: uuid::Uuid::new_v4(),
        name: "test-admin".to_string(),
        email: crate::shared::constants::ADMIN_EMAIL.to_string(),
        role: crate::shared::constants::ROLE_ADMIN.to_string(),
    }
}

#[cfg(test)]
#[allow(dead_code)]
async fn inject_admin_middleware(mut request: Request, next: Next) -> Response {
    request.extensions_mut().insert(create_admin_user());
    next.run(request).await
}

#[cfg(test)]
#[allow(dead_code)]
pub fn with_admin_auth(router: Router) -> Router {
    router.layer(axum::middleware::from_fn(inject_admin_middleware))
}
