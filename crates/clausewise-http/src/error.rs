//! HTTP error responses.
//!
//! Every error renders as `{ "error": "..." }`. Client problems are 400,
//! oversized bodies 413, everything else 500 with a generic message.

use axum::extract::multipart::MultipartError;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use clausewise::ClausewiseError;
use serde_json::json;
use thiserror::Error;

pub type HttpResult<T> = Result<T, HttpError>;

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("No file provided")]
    NoFile,

    #[error("No file selected")]
    NoFileSelected,

    #[error("File type not allowed")]
    FileTypeNotAllowed,

    #[error("{0}")]
    BadRequest(String),

    #[error("File too large. Maximum size is {limit} bytes")]
    PayloadTooLarge { limit: usize },

    #[error(transparent)]
    Analysis(#[from] ClausewiseError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl HttpError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            HttpError::NoFile
            | HttpError::NoFileSelected
            | HttpError::FileTypeNotAllowed
            | HttpError::BadRequest(_) => StatusCode::BAD_REQUEST,
            HttpError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            HttpError::Analysis(ClausewiseError::Document(e)) if e.is_client_error() => {
                StatusCode::BAD_REQUEST
            }
            HttpError::Analysis(_) | HttpError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Map a multipart failure, keeping the body-limit case distinct.
    pub fn from_multipart(error: MultipartError, limit: usize) -> Self {
        if error.status() == StatusCode::PAYLOAD_TOO_LARGE {
            HttpError::PayloadTooLarge { limit }
        } else {
            HttpError::BadRequest(error.body_text())
        }
    }

    pub fn from_json_rejection(rejection: JsonRejection, limit: usize) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            HttpError::PayloadTooLarge { limit }
        } else {
            HttpError::BadRequest(rejection.body_text())
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = if status.is_server_error() {
            tracing::error!(status_code = %status, error = %self, "Request failed");
            "Internal server error".to_string()
        } else {
            tracing::warn!(status_code = %status, error = %self, "Request rejected");
            self.to_string()
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
