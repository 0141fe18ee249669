use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use piper_tts_api::api::routes::{create_router, AppState};
use piper_tts_api::tts::TtsService;
use piper_tts_api::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Configuration from environment
    let config = Config::from_env()?;
    let addr = config.bind_addr()?;

    tracing::info!("Piper TTS API v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Starting server on http://{}", addr);
    tracing::info!("Voices directory: {}", config.voices_dir.display());

    // Create TTS service
    let tts = TtsService::new(&config);
    tracing::info!(
        "piper binary: {} (timeout {}s, {} concurrent)",
        tts.piper().program().display(),
        config.synthesis_timeout.as_secs(),
        config.max_concurrent_syntheses
    );
    for voice in tts.registry().entries() {
        tracing::info!(
            "Voice {} ({}): installed={}",
            voice.language,
            voice.name,
            voice.is_installed()
        );
    }

    // Create app state
    let state = Arc::new(AppState { tts });

    // Create router
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutting down");
}
