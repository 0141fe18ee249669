//! HTTP front end for the Piper text-to-speech command-line tool.

pub mod api;
pub mod config;
pub mod error;
pub mod tts;

pub use config::Config;
pub use error::AppError;
