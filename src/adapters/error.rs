use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::{error, warn};

use crate::application::error::ApplicationError;

impl ApplicationError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApplicationError::BadRequest(_) | ApplicationError::QuotaExceeded { .. } => {
                StatusCode::BAD_REQUEST
            }
            ApplicationError::Unauthorized | ApplicationError::InvalidCredentials => {
                StatusCode::UNAUTHORIZED
            }
            ApplicationError::NotFound(_) => StatusCode::NOT_FOUND,
            ApplicationError::Conflict(_) => StatusCode::CONFLICT,
            ApplicationError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ApplicationError::Expired => StatusCode::GONE,
            ApplicationError::UploadError(_)
            | ApplicationError::InternalError(_)
            | ApplicationError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApplicationError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error_message = if status.is_server_error() {
            error!("Request failed: {}", self);
            "Server Error".to_string()
        } else {
            warn!("Request rejected ({}): {}", status.as_u16(), self);
            self.to_string()
        };

        let body = Json(json!({
            "success": false,
            "error": error_message,
        }));

        (status, body).into_response()
    }
}
