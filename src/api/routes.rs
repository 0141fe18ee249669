use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use crate::tts::TtsService;

pub struct AppState {
    pub tts: TtsService,
}

pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // GET routes answer HEAD as well
    Router::new()
        .route("/health", get(handlers::health))
        .route("/voices", get(handlers::list_voices))
        .route("/synthesize", post(handlers::synthesize))
        .route("/synthesize-raw", post(handlers::synthesize_raw))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
