use serde::Deserialize;
use std::path::Path;

/// Largest edge an ICO directory entry can describe.
pub const MAX_ICON_SIZE: u32 = 256;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub service: ServiceConfig,
    #[serde(default)]
    pub favicon: FaviconConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_jpeg_quality")]
    pub jpeg_quality: u8,
    #[serde(default = "default_filter")]
    pub default_filter: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FaviconConfig {
    #[serde(default = "default_source")]
    pub source: String,
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
    #[serde(default = "default_sizes")]
    pub sizes: Vec<u32>,
    #[serde(default = "default_ico_sizes")]
    pub ico_sizes: Vec<u32>,
    #[serde(default = "default_ico_name")]
    pub ico_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            jpeg_quality: default_jpeg_quality(),
            default_filter: default_filter(),
        }
    }
}

impl Default for FaviconConfig {
    fn default() -> Self {
        Self {
            source: default_source(),
            output_dir: default_output_dir(),
            sizes: default_sizes(),
            ico_sizes: default_ico_sizes(),
            ico_name: default_ico_name(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::ReadFile(path.display().to_string(), e))?;
        let config: Config =
            toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load `path` if it exists, otherwise fall back to built-in defaults.
    ///
    /// Only used for the implicit `config.toml`; a path the user named on the
    /// command line goes through [`Config::load`] so a typo is reported.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Resolve the config path from the first CLI argument, as every binary
    /// in the workspace does.
    pub fn from_args() -> Result<Self, ConfigError> {
        match std::env::args().nth(1) {
            Some(arg) => Self::load(Path::new(&arg)),
            None => Self::load_or_default(Path::new("config.toml")),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=100).contains(&self.service.jpeg_quality) {
            return Err(ConfigError::Invalid(format!(
                "service.jpeg_quality must be in 1..=100, got {}",
                self.service.jpeg_quality
            )));
        }
        if self.favicon.sizes.is_empty() {
            return Err(ConfigError::Invalid("favicon.sizes must not be empty".into()));
        }
        if let Some(bad) = self
            .favicon
            .sizes
            .iter()
            .chain(&self.favicon.ico_sizes)
            .find(|&&s| s == 0 || s > MAX_ICON_SIZE)
        {
            return Err(ConfigError::Invalid(format!(
                "favicon size {bad} is outside 1..={MAX_ICON_SIZE}"
            )));
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {0}: {1}")]
    ReadFile(String, std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(String),
    #[error("invalid config: {0}")]
    Invalid(String),
}

// Default value functions
fn default_host() -> String {
    "0.0.0.0".into()
}
fn default_port() -> u16 {
    8002
}
fn default_jpeg_quality() -> u8 {
    85
}
fn default_filter() -> String {
    "none".into()
}
fn default_source() -> String {
    "frontend/public/logo512.png".into()
}
fn default_output_dir() -> String {
    "frontend/public".into()
}
fn default_sizes() -> Vec<u32> {
    vec![16, 32, 48, 64]
}
fn default_ico_sizes() -> Vec<u32> {
    vec![16, 32]
}
fn default_ico_name() -> String {
    "favicon-new.ico".into()
}
fn default_log_level() -> String {
    "info".into()
}
