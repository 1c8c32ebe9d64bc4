use std::{env, fs, path::PathBuf};

use color_eyre::Result;
use directories::ProjectDirs;
use lazy_static::lazy_static;
use serde::Deserialize;
use tracing::warn;

use crate::submit::DEFAULT_ENDPOINT;

#[derive(Clone, Debug, Deserialize)]
pub struct Config {
    /// Webhook the segment is posted to.
    pub endpoint: String,
    #[serde(default)]
    pub data_dir: PathBuf,
    #[serde(default)]
    pub config_dir: PathBuf,
}

lazy_static! {
    pub static ref PROJECT_NAME: String = env!("CARGO_CRATE_NAME").to_uppercase().to_string();
    pub static ref DATA_FOLDER: Option<PathBuf> =
        env::var(format!("{}_DATA", PROJECT_NAME.clone()))
            .ok()
            .map(PathBuf::from);
    pub static ref CONFIG_FOLDER: Option<PathBuf> =
        env::var(format!("{}_CONFIG", PROJECT_NAME.clone()))
            .ok()
            .map(PathBuf::from);
    pub static ref LOG_ENV: String = format!("{}_LOG_LEVEL", PROJECT_NAME.clone());
    pub static ref LOG_FILE: String = format!("{}.log", env!("CARGO_PKG_NAME").replace('_', "-"));
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            data_dir: get_data_dir(),
            config_dir: get_config_dir(),
        }
    }
}

impl Config {
    /// Layered load: built-in defaults, then `config.json5` / `config.toml`
    /// from the config directory, then the command-line endpoint override.
    pub fn new(endpoint_override: Option<&str>) -> Result<Self, config::ConfigError> {
        let data_dir = get_data_dir();
        let config_dir = get_config_dir();
        let mut builder = config::Config::builder()
            .set_default("endpoint", DEFAULT_ENDPOINT)?
            .set_default("data_dir", data_dir.to_string_lossy().to_string())?
            .set_default("config_dir", config_dir.to_string_lossy().to_string())?;

        let config_files = [
            ("config.json5", config::FileFormat::Json5),
            ("config.toml", config::FileFormat::Toml),
        ];
        let mut found_config = false;
        for (file, format) in &config_files {
            let source = config::File::from(config_dir.join(file))
                .format(*format)
                .required(false);
            builder = builder.add_source(source);
            if config_dir.join(file).exists() {
                found_config = true
            }
        }
        if !found_config {
            warn!("no configuration file found, using the default webhook endpoint");
        }
        builder = builder.set_override_option("endpoint", endpoint_override)?;

        let cfg: Self = builder.build()?.try_deserialize()?;
        Ok(cfg)
    }

    /// Defaults with a fixed endpoint, no files consulted.
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Self::default()
        }
    }
}

pub fn get_data_dir() -> PathBuf {
    if let Some(s) = DATA_FOLDER.clone() {
        s
    } else if let Some(proj_dirs) = project_directory() {
        proj_dirs.data_local_dir().to_path_buf()
    } else {
        PathBuf::from(".").join(".data")
    }
}

pub fn get_config_dir() -> PathBuf {
    if let Some(s) = CONFIG_FOLDER.clone() {
        s
    } else if let Some(proj_dirs) = project_directory() {
        proj_dirs.config_local_dir().to_path_buf()
    } else {
        PathBuf::from(".").join(".config")
    }
}

fn project_directory() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "segment-creator", env!("CARGO_PKG_NAME"))
}

pub fn ensure_data_dir_exists() -> std::io::Result<PathBuf> {
    let data_dir = get_data_dir();
    if !data_dir.exists() {
        fs::create_dir_all(&data_dir)?;
    }
    Ok(data_dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_webhook() {
        let config = Config::default();
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn override_wins_over_defaults() {
        let config = Config::new(Some("http://localhost:8080/hook")).unwrap();
        assert_eq!(config.endpoint, "http://localhost:8080/hook");
    }

    #[test]
    fn log_file_is_named_after_binary() {
        assert_eq!(LOG_FILE.as_str(), "segment-creator.log");
        assert_eq!(LOG_ENV.as_str(), "SEGMENT_CREATOR_LOG_LEVEL");
    }

    #[test]
    fn with_endpoint_keeps_directories() {
        let config = Config::with_endpoint("http://example.test");
        assert_eq!(config.endpoint, "http://example.test");
        assert_eq!(config.data_dir, get_data_dir());
    }
}
