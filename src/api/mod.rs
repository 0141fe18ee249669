pub mod form;
pub mod handlers;
pub mod routes;

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::tts::VoiceInfo;

pub use form::SynthesisForm;

/// Longest text accepted for synthesis, in characters.
pub const MAX_TEXT_CHARS: usize = 1000;

pub const AUDIO_FILENAME: &str = "speech.wav";

pub const AUDIO_DISPOSITION: &str = "attachment; filename=speech.wav";

#[derive(Debug, Serialize)]
pub struct VoicesResponse {
    pub voices: Vec<VoiceInfo>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
}

/// WAV audio served as a `speech.wav` download.
#[derive(Debug)]
pub struct AudioAttachment(pub Vec<u8>);

impl IntoResponse for AudioAttachment {
    fn into_response(self) -> Response {
        let mut response = (StatusCode::OK, self.0).into_response();

        let headers = response.headers_mut();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("audio/wav"));
        headers.insert(
            header::CONTENT_DISPOSITION,
            HeaderValue::from_static(AUDIO_DISPOSITION),
        );

        response
    }
}
