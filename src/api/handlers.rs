use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;

use super::{
    AudioAttachment, HealthResponse, SynthesisForm, VoicesResponse, AUDIO_DISPOSITION,
    MAX_TEXT_CHARS,
};
use crate::api::routes::AppState;
use crate::error::AppError;

pub async fn synthesize(
    State(state): State<Arc<AppState>>,
    form: SynthesisForm,
) -> Result<AudioAttachment, AppError> {
    let audio = run_synthesis(&state, form).await?;
    Ok(AudioAttachment(audio))
}

pub async fn synthesize_raw(
    State(state): State<Arc<AppState>>,
    form: SynthesisForm,
) -> Result<Response, AppError> {
    let audio = run_synthesis(&state, form).await?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "audio/wav"),
            (header::CONTENT_DISPOSITION, AUDIO_DISPOSITION),
        ],
        audio,
    )
        .into_response())
}

async fn run_synthesis(state: &AppState, form: SynthesisForm) -> Result<Vec<u8>, AppError> {
    validate_length(&form.text)?;
    state.tts.synthesize(&form.text, form.language).await
}

fn validate_length(text: &str) -> Result<(), AppError> {
    let chars = text.chars().count();
    if chars > MAX_TEXT_CHARS {
        return Err(AppError::TextTooLong {
            max: MAX_TEXT_CHARS,
            actual: chars,
        });
    }
    Ok(())
}

pub async fn list_voices(State(state): State<Arc<AppState>>) -> Json<VoicesResponse> {
    Json(VoicesResponse {
        voices: state.tts.list_voices(),
    })
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "piper-tts",
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_limit_counts_chars() {
        assert!(validate_length(&"a".repeat(MAX_TEXT_CHARS)).is_ok());
        // Two bytes per char, still within the limit
        assert!(validate_length(&"я".repeat(MAX_TEXT_CHARS)).is_ok());
        assert!(matches!(
            validate_length(&"я".repeat(MAX_TEXT_CHARS + 1)),
            Err(AppError::TextTooLong { actual: 1001, .. })
        ));
    }
}
