use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the per-user config directory and the local config file stem
const APP_NAME: &str = "album-editor";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] Box<figment::Error>),
}

/// Editor settings
///
/// Layered as: built-in defaults, `album-editor.toml` in the working
/// directory, the per-user config file, an explicit `--config` file, then
/// `ALBUM_EDITOR_*` environment variables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Root URL of the gallery admin server
    pub base_url: String,
    /// Bearer token sent with every request
    pub api_token: Option<String>,
    /// Directory the ID picker opens in
    pub picker_dir: Option<PathBuf>,
    /// Default tracing filter when `RUST_LOG` is unset
    pub log_filter: String,
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            api_token: None,
            picker_dir: None,
            log_filter: "album_editor=info".to_string(),
            request_timeout_secs: 30,
        }
    }
}

impl Config {
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        Self::figment(explicit)
            .extract()
            .map_err(|e| ConfigError::Load(Box::new(e)))
    }

    fn figment(explicit: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(format!("{APP_NAME}.toml")));

        if let Some(user_file) = Self::user_config_path() {
            figment = figment.merge(Toml::file(user_file));
        }
        if let Some(path) = explicit {
            figment = figment.merge(Toml::file(path));
        }

        figment.merge(Env::prefixed("ALBUM_EDITOR_"))
    }

    /// Per-user config file, e.g. `~/.config/album-editor/config.toml`
    fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_NAME).join("config.toml"))
    }
}
