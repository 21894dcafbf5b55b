use super::ErrorResponse;
use crate::posting::ValidationError;
use axum::{
    extract::multipart::{MultipartError, MultipartRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::{error, warn};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Multipart(#[from] MultipartError),
    #[error(transparent)]
    Rejected(#[from] MultipartRejection),
    #[error("Internal server error")]
    Internal(anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Validation(e) => (StatusCode::BAD_REQUEST, e.to_string()),
            ApiError::Multipart(e) => {
                warn!("Malformed multipart body: {}", e);
                (e.status(), e.body_text())
            }
            ApiError::Rejected(e) => {
                warn!("Rejected post request: {}", e);
                (e.status(), e.body_text())
            }
            ApiError::Internal(e) => {
                error!("Error in post handler: {:#}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
