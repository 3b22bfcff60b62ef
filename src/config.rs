use serde::Deserialize;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Optional settings file; command-line values win over these
#[derive(Debug, Default, Deserialize)]
pub(crate) struct Config {
    #[serde(default)]
    pub(crate) file: Option<PathBuf>,
    #[serde(default)]
    pub(crate) filter_file: Option<PathBuf>,
    #[serde(default)]
    pub(crate) pwd: bool,
    #[serde(default)]
    pub(crate) reverse: bool,
    #[serde(default)]
    pub(crate) timezone: Option<String>,
    #[serde(default)]
    pub(crate) workers: Option<usize>,
    #[serde(default)]
    pub(crate) max_line_length: Option<usize>,
    #[serde(default)]
    pub(crate) flush_lines: Option<usize>,
    /// Directory every session starts in when inferring directories
    #[serde(default)]
    pub(crate) home: Option<PathBuf>,
}

impl Config {
    pub(crate) fn load() -> Self {
        for path in Self::get_config_paths() {
            if path.exists()
                && let Ok(content) = fs::read_to_string(&path)
            {
                match toml::from_str::<Config>(&content) {
                    Ok(config) => {
                        debug!(path = %path.display(), "loaded config");
                        return config;
                    }
                    Err(e) => {
                        warn!(path = %path.display(), error = %e, "failed to parse config");
                    }
                }
            }
        }

        Self::default()
    }

    fn get_config_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // 1. XDG config: ~/.config/cmdlog/config.toml
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".config").join("cmdlog").join("config.toml"));
        }

        // 2. Platform config dir, e.g. ~/Library/Application Support/cmdlog/config.toml
        if let Some(config_dir) = dirs::config_dir() {
            let platform_path = config_dir.join("cmdlog").join("config.toml");
            if !paths.contains(&platform_path) {
                paths.push(platform_path);
            }
        }

        // 3. Home directory: ~/.cmdlog.toml
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".cmdlog.toml"));
        }

        paths
    }
}

pub(crate) fn default_log_file() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_default()
        .join(".cmdlog")
}

pub(crate) fn default_filter_file() -> PathBuf {
    dirs::config_dir()
        .or_else(|| dirs::home_dir().map(|h| h.join(".config")))
        .unwrap_or_default()
        .join("cmdlog")
        .join("filters")
}
