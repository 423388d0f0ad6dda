use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Retry policy parameters (optional `[retry]` section in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of attempts per image (including the first).
    pub max_attempts: u32,
    /// Base delay in seconds for exponential backoff (e.g. 0.25 = 250ms).
    pub base_delay_secs: f64,
    /// Maximum backoff delay in seconds.
    pub max_delay_secs: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay_secs: 0.25,
            max_delay_secs: 30,
        }
    }
}

/// Global configuration loaded from `~/.config/logpuzzle/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogpuzzleConfig {
    /// Concurrent image downloads. 1 = strictly sequential.
    pub workers: usize,
    /// Connect timeout per image, in seconds.
    pub connect_timeout_secs: u64,
    /// Whole-transfer timeout per image, in seconds.
    pub timeout_secs: u64,
    /// User-Agent sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Optional retry policy; if missing, each image gets a single attempt.
    #[serde(default)]
    pub retry: Option<RetryConfig>,
}

fn default_user_agent() -> String {
    format!("logpuzzle/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for LogpuzzleConfig {
    fn default() -> Self {
        Self {
            workers: 1,
            connect_timeout_secs: 15,
            timeout_secs: 300,
            user_agent: default_user_agent(),
            retry: None,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("logpuzzle")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<LogpuzzleConfig> {
    load_or_init_at(&config_path()?)
}

pub fn load_or_init_at(path: &Path) -> Result<LogpuzzleConfig> {
    if !path.exists() {
        let default_cfg = LogpuzzleConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path)?;
    let cfg: LogpuzzleConfig = toml::from_str(&data)?;
    Ok(cfg)
}
