use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use ballot_core::BallotError;

/// HTTP wrapper around [`BallotError`].
#[derive(Debug, Error)]
#[error(transparent)]
pub struct ApiError(#[from] pub BallotError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            BallotError::NotFound(_) => StatusCode::NOT_FOUND,
            BallotError::BadRequest(_) | BallotError::Config(_) => StatusCode::BAD_REQUEST,
            BallotError::Sink(_) => StatusCode::SERVICE_UNAVAILABLE,
            BallotError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = Json(json!({
            "error": self.0.client_code().as_str(),
            "message": self.0.to_string(),
        }));
        (status, body).into_response()
    }
}
