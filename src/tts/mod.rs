pub mod language;
pub mod piper;
pub mod process;
pub mod voice;

use std::io::Cursor;
use std::time::Instant;

use tokio::sync::Semaphore;

use crate::config::Config;
use crate::error::AppError;

pub use language::{detect, Language};
pub use piper::PiperCli;
pub use voice::{VoiceEntry, VoiceInfo, VoiceRegistry};

pub struct TtsService {
    registry: VoiceRegistry,
    piper: PiperCli,
    permits: Semaphore,
}

impl TtsService {
    pub fn new(config: &Config) -> Self {
        Self::with_registry(config, VoiceRegistry::standard(&config.voices_dir))
    }

    pub fn with_registry(config: &Config, registry: VoiceRegistry) -> Self {
        Self {
            registry,
            piper: PiperCli::new(config.piper_bin.clone(), config.synthesis_timeout),
            permits: Semaphore::new(config.max_concurrent_syntheses),
        }
    }

    pub fn registry(&self) -> &VoiceRegistry {
        &self.registry
    }

    pub fn piper(&self) -> &PiperCli {
        &self.piper
    }

    pub async fn synthesize(
        &self,
        text: &str,
        language: Option<Language>,
    ) -> Result<Vec<u8>, AppError> {
        if text.trim().is_empty() {
            return Err(AppError::InvalidInput("Text cannot be empty".into()));
        }

        // 1. Pick the language
        let language = language.unwrap_or_else(|| detect(text));

        // 2. Pick the voice; nothing is spawned for a voice that is not installed
        let voice = self
            .registry
            .resolve(language)
            .ok_or(AppError::VoiceNotFound(language))?;
        if !voice.is_installed() {
            return Err(AppError::VoiceNotFound(language));
        }

        let _permit = self
            .permits
            .acquire()
            .await
            .map_err(|_| AppError::SynthesisFailed("Synthesis is shutting down".into()))?;

        // 3. Scratch file, removed when `output` goes out of scope
        let output = tempfile::Builder::new()
            .prefix("piper-")
            .suffix(".wav")
            .tempfile()?
            .into_temp_path();

        // 4. Render
        let start = Instant::now();
        self.piper.render(voice, text, &output).await?;

        // 5. Collect
        let audio = tokio::fs::read(&output).await?;

        tracing::info!(
            language = %language,
            voice = %voice.name,
            text_chars = text.chars().count(),
            audio_bytes = audio.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Synthesized speech"
        );
        log_wav_header(&audio);

        Ok(audio)
    }

    pub fn list_voices(&self) -> Vec<VoiceInfo> {
        self.registry.available()
    }
}

fn log_wav_header(audio: &[u8]) {
    match hound::WavReader::new(Cursor::new(audio)) {
        Ok(reader) => {
            let spec = reader.spec();
            let duration_ms = if spec.sample_rate > 0 {
                reader.duration() as u64 * 1000 / spec.sample_rate as u64
            } else {
                0
            };
            tracing::debug!(
                sample_rate = spec.sample_rate,
                channels = spec.channels,
                duration_ms,
                "WAV output"
            );
        }
        Err(e) => tracing::warn!("piper output is not a readable WAV file: {}", e),
    }
}
