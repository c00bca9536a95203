use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};

use serde::Serialize;

use thiserror::Error;

use crate::domain::ValidationError;
use crate::intake::SubmissionError;

pub type RestResult<T> = Result<T, RestError>;

#[derive(Debug, Error)]
pub enum RestError {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("Missing message ID")]
    MissingMessageId,

    #[error("No messages found")]
    NoMessages,

    #[error("Method Not Allowed")]
    MethodNotAllowed,

    #[error("{0}")]
    InternalError(String),
}

impl From<SubmissionError> for RestError {
    fn from(e: SubmissionError) -> Self {
        match e {
            SubmissionError::Validation(kind) => Self::Validation(kind),
            SubmissionError::Storage(error) => {
                tracing::error!("Failed to persist contact message: {:?}", error);
                Self::InternalError("Failed to save message".into())
            }
        }
    }
}

impl ResponseError for RestError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::MissingMessageId => StatusCode::BAD_REQUEST,
            Self::NoMessages => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        // Callers always get a JSON envelope, never a bare error string
        HttpResponse::build(self.status_code()).json(ErrorBody {
            success: false,
            message: self.to_string(),
        })
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    success: bool,
    message: String,
}
