use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("{name} must be a number, got '{value}'")]
    NotANumber { name: &'static str, value: String },

    #[error("{0} must be greater than zero")]
    Zero(&'static str),

    #[error("Invalid bind address: {0}")]
    InvalidAddress(String),
}

/// Runtime settings, built once at startup and handed to the service.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub voices_dir: PathBuf,
    pub piper_bin: PathBuf,
    pub synthesis_timeout: Duration,
    pub max_concurrent_syntheses: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            voices_dir: PathBuf::from("/app/voices"),
            piper_bin: PathBuf::from("/usr/local/bin/piper"),
            synthesis_timeout: Duration::from_secs(30),
            max_concurrent_syntheses: default_concurrency(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds a config from an arbitrary variable source, falling back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let host = lookup("HOST").unwrap_or(defaults.host);
        let port = parse_var(&lookup, "PORT")?.unwrap_or(defaults.port);
        let voices_dir = lookup("VOICES_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.voices_dir);
        let piper_bin = lookup("PIPER_BIN")
            .map(PathBuf::from)
            .unwrap_or(defaults.piper_bin);

        let timeout_secs: u64 = parse_var(&lookup, "SYNTHESIS_TIMEOUT_SECS")?
            .unwrap_or(defaults.synthesis_timeout.as_secs());
        if timeout_secs == 0 {
            return Err(ConfigError::Zero("SYNTHESIS_TIMEOUT_SECS"));
        }

        let max_concurrent_syntheses = parse_var(&lookup, "MAX_CONCURRENT_SYNTHESES")?
            .unwrap_or(defaults.max_concurrent_syntheses);
        if max_concurrent_syntheses == 0 {
            return Err(ConfigError::Zero("MAX_CONCURRENT_SYNTHESES"));
        }

        Ok(Self {
            host,
            port,
            voices_dir,
            piper_bin,
            synthesis_timeout: Duration::from_secs(timeout_secs),
            max_concurrent_syntheses,
        })
    }

    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|_| ConfigError::InvalidAddress(self.host.clone()))?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

fn parse_var<F, T>(lookup: &F, name: &'static str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(name) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::NotANumber { name, value }),
    }
}

fn default_concurrency() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}
