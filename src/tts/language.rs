use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Ru,
    En,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Ru => "ru",
            Language::En => "en",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
#[error("Unsupported language '{0}' (expected 'ru' or 'en')")]
pub struct UnsupportedLanguage(pub String);

impl FromStr for Language {
    type Err = UnsupportedLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ru" => Ok(Language::Ru),
            "en" => Ok(Language::En),
            _ => Err(UnsupportedLanguage(s.to_string())),
        }
    }
}

/// Guess the language of `text` by counting Cyrillic against Latin letters.
///
/// Cyrillic wins only with a strict majority; ties (including text with no
/// letters at all) fall back to English.
pub fn detect(text: &str) -> Language {
    let mut cyrillic = 0usize;
    let mut latin = 0usize;

    for ch in text.chars() {
        let lower = ch.to_lowercase().next().unwrap_or(ch);
        if ('а'..='я').contains(&lower) || lower == 'ё' {
            cyrillic += 1;
        } else if lower.is_ascii_lowercase() {
            latin += 1;
        }
    }

    if cyrillic > latin {
        Language::Ru
    } else {
        Language::En
    }
}
