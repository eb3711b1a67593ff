use serde::{Deserialize, Serialize};

use std::path::{Path, PathBuf};
use std::time::Duration;

use hackernews_client::DEFAULT_BASE_URL;

use crate::error::{Error, Result};
use crate::util::DEFAULT_TIMEOUT_SECS;

pub const CONFIG_FILE_NAME: &str = ".hntoprc";
pub const CONFIG_PATH_ENV: &str = "HNTOP_CONFIG";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_base_url: String,
    /// Maximum number of top stories to fetch.
    pub items_limit: usize,
    pub cache_file_path: PathBuf,
    /// Program and arguments used to open a story. `{url}` is replaced by the story URL,
    /// otherwise the URL is appended.
    pub open_command: Vec<String>,
    pub show_command_output: bool,
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_BASE_URL.to_string(),
            items_limit: 10,
            cache_file_path: std::env::temp_dir().join("hntop_cache.json"),
            open_command: vec!["echo".to_string()],
            show_command_output: true,
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Config {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Path of the config file: `$HNTOP_CONFIG` if set, otherwise `~/.hntoprc`.
    pub fn default_path() -> Result<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
            return Ok(PathBuf::from(path));
        }
        dirs_next::home_dir()
            .map(|home| home.join(CONFIG_FILE_NAME))
            .ok_or_else(|| Error::ConfigError {
                path: PathBuf::from("~").join(CONFIG_FILE_NAME),
                reason: "cannot determine home directory".to_string(),
            })
    }

    /// Read the config at `path`. If there is none yet, the defaults are written there and returned.
    pub fn load_or_create(path: impl AsRef<Path>) -> Result<Config> {
        let path = path.as_ref();
        let config_error = |reason: String| Error::ConfigError {
            path: path.to_path_buf(),
            reason,
        };

        match std::fs::read(path) {
            Ok(content) => {
                let config = serde_json::from_slice(&content).map_err(|e| config_error(e.to_string()))?;
                tracing::debug!("Loaded config from {}", path.display());
                Ok(config)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let config = Config::default();
                let content = serde_json::to_vec_pretty(&config).map_err(|e| config_error(e.to_string()))?;
                std::fs::write(path, content).map_err(|e| config_error(e.to_string()))?;
                tracing::info!("Created config file {} with default values", path.display());
                Ok(config)
            }
            Err(e) => Err(config_error(e.to_string())),
        }
    }
}
