use serde::Serialize;
use std::path::{Path, PathBuf};

use super::Language;

#[derive(Debug, Clone)]
pub struct VoiceEntry {
    pub language: Language,
    pub name: String,
    pub model_path: PathBuf,
    pub config_path: PathBuf,
}

impl VoiceEntry {
    /// Entry for a Piper voice `<stem>.onnx` with its `<stem>.onnx.json` sidecar.
    pub fn piper(voices_dir: &Path, language: Language, stem: &str, name: &str) -> Self {
        Self {
            language,
            name: name.to_string(),
            model_path: voices_dir.join(format!("{}.onnx", stem)),
            config_path: voices_dir.join(format!("{}.onnx.json", stem)),
        }
    }

    pub fn is_installed(&self) -> bool {
        self.model_path.is_file() && self.config_path.is_file()
    }

    pub fn info(&self) -> VoiceInfo {
        VoiceInfo {
            language: self.language,
            name: self.name.clone(),
            model: self.model_path.display().to_string(),
            config: self.config_path.display().to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct VoiceInfo {
    pub language: Language,
    pub name: String,
    pub model: String,
    pub config: String,
}

/// Fixed language-to-voice table.
#[derive(Debug, Clone)]
pub struct VoiceRegistry {
    entries: Vec<VoiceEntry>,
}

impl VoiceRegistry {
    pub fn new(entries: Vec<VoiceEntry>) -> Self {
        Self { entries }
    }

    pub fn standard(voices_dir: &Path) -> Self {
        Self::new(vec![
            VoiceEntry::piper(
                voices_dir,
                Language::Ru,
                "ru_RU-dmitri-medium",
                "Dmitri (Russian)",
            ),
            VoiceEntry::piper(
                voices_dir,
                Language::En,
                "en_US-lessac-medium",
                "Lessac (English)",
            ),
        ])
    }

    /// Pure lookup; whether the files exist is the caller's concern.
    pub fn resolve(&self, language: Language) -> Option<&VoiceEntry> {
        self.entries.iter().find(|e| e.language == language)
    }

    pub fn entries(&self) -> &[VoiceEntry] {
        &self.entries
    }

    /// Voices whose model and config are on disk right now.
    pub fn available(&self) -> Vec<VoiceInfo> {
        self.entries
            .iter()
            .filter(|e| e.is_installed())
            .map(VoiceEntry::info)
            .collect()
    }
}
