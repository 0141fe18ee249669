use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::AppError;
use crate::tts::process::{self, Outcome};
use crate::tts::voice::VoiceEntry;

/// Handle on the `piper` command-line synthesizer.
#[derive(Debug, Clone)]
pub struct PiperCli {
    program: PathBuf,
    timeout: Duration,
}

impl PiperCli {
    pub fn new(program: PathBuf, timeout: Duration) -> Self {
        Self { program, timeout }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Render `text` with `voice` into a WAV file at `output`.
    pub async fn render(&self, voice: &VoiceEntry, text: &str, output: &Path) -> Result<(), AppError> {
        let args = piper_args(voice, text, output);

        let result = process::run_tool(&self.program, args, self.timeout)
            .await
            .map_err(|e| {
                AppError::SynthesisFailed(format!(
                    "Failed to run {} (is it installed?): {}",
                    self.program.display(),
                    e
                ))
            })?;

        match result.outcome {
            Outcome::Success => Ok(()),
            Outcome::TimedOut => Err(AppError::SynthesisFailed(format!(
                "piper timed out after {}s: {}",
                self.timeout.as_secs_f32(),
                result.stderr
            ))),
            Outcome::Failed => {
                let status = result
                    .status
                    .map(|c| c.to_string())
                    .unwrap_or_else(|| "signal".to_string());
                Err(AppError::SynthesisFailed(format!(
                    "piper exited with {}: {}",
                    status, result.stderr
                )))
            }
        }
    }
}

pub fn piper_args(voice: &VoiceEntry, text: &str, output: &Path) -> Vec<OsString> {
    vec![
        "--model".into(),
        voice.model_path.clone().into_os_string(),
        "--config".into(),
        voice.config_path.clone().into_os_string(),
        "--input_text".into(),
        text.into(),
        "--output_file".into(),
        output.as_os_str().to_owned(),
    ]
}
