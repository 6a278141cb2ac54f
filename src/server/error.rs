//! HTTP-facing errors.

use crate::messenger::MessengerError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BridgeError {
    /// A required field is absent or empty.
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    /// The client library failed on one of the recipients.
    #[error(transparent)]
    Delivery(#[from] MessengerError),
}

impl BridgeError {
    pub fn status(&self) -> StatusCode {
        match self {
            BridgeError::BadRequest(_) => StatusCode::BAD_REQUEST,
            BridgeError::NotFound(_) => StatusCode::NOT_FOUND,
            BridgeError::Delivery(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for BridgeError {
    fn into_response(self) -> Response {
        let body = Json(serde_json::json!({ "error": self.to_string() }));
        (self.status(), body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            BridgeError::BadRequest("text required".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            BridgeError::NotFound("file not found".into()).status(),
            StatusCode::NOT_FOUND
        );
        let delivery = BridgeError::from(MessengerError::Send("socket closed".into()));
        assert_eq!(delivery.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(delivery.to_string(), "send failed: socket closed");
    }
}
