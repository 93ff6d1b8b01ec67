use axum::{
    body::Body,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;

use crate::core::error::AppError;

/// JSON extractor whose rejections surface through the shared error shape
/// instead of axum's plain-text defaults
pub struct AppJson<T>(pub T);

impl<T, S> FromRequest<S> for AppJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request<Body>, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(reject)?;
        Ok(Self(value))
    }
}

fn reject(rejection: JsonRejection) -> AppError {
    let message = match rejection {
        JsonRejection::JsonDataError(e) => format!("Invalid JSON data: {}", e),
        JsonRejection::JsonSyntaxError(e) => format!("Invalid JSON syntax: {}", e),
        JsonRejection::MissingJsonContentType(e) => format!("Missing JSON content type: {}", e),
        other => format!("Failed to parse JSON body: {}", other),
    };
    AppError::BadRequest(message)
}
