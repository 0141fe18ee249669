use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::tts::Language;

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Text too long (max {max} characters, got {actual})")]
    TextTooLong { max: usize, actual: usize },

    #[error("Voice model for language '{0}' not found")]
    VoiceNotFound(Language),

    #[error("Speech synthesis failed: {0}")]
    SynthesisFailed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidInput(_) | AppError::TextTooLong { .. } => StatusCode::BAD_REQUEST,
            AppError::VoiceNotFound(_) | AppError::SynthesisFailed(_) | AppError::Io(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::InvalidInput(_) => "INVALID_INPUT",
            AppError::TextTooLong { .. } => "TEXT_TOO_LONG",
            AppError::VoiceNotFound(_) => "VOICE_NOT_FOUND",
            AppError::SynthesisFailed(_) => "SYNTHESIS_FAILED",
            AppError::Io(_) => "INTERNAL_ERROR",
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code();

        // Internal details stay in the log
        let message = match &self {
            AppError::Io(_) => "Internal error".to_string(),
            other => other.to_string(),
        };

        tracing::error!("Request failed: {} - {}", code, self);

        (
            status,
            Json(ErrorResponse {
                error: message,
                code: code.to_string(),
            }),
        )
            .into_response()
    }
}
