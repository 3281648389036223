use crate::atlas::{AlphaMode, DeckGeometry};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: i32,
    pub height: i32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Tarot counter".to_string(),
            width: 320,
            height: 100,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Composite image holding every card.
    pub atlas: PathBuf,
    /// Where the per-card images are written.
    pub output_dir: PathBuf,
    pub deck: DeckGeometry,
    pub alpha: AlphaMode,
    pub reuse_existing: bool,
    pub window: WindowConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            atlas: PathBuf::from("images/jeu_de_tarot_complet.png"),
            output_dir: PathBuf::from("images"),
            deck: DeckGeometry::default(),
            alpha: AlphaMode::default(),
            reuse_existing: false,
            window: WindowConfig::default(),
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
}

pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("org", "tarot", "counter").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

pub fn load_config(config_path: &Path) -> Result<Config, ConfigError> {
    from_builder(
        config::Config::builder()
            .add_source(config::File::from(config_path.to_path_buf()).required(false)),
    )
}

fn from_builder(
    builder: config::ConfigBuilder<config::builder::DefaultState>,
) -> Result<Config, ConfigError> {
    Ok(builder.build()?.try_deserialize()?)
}

/// Defaults apply when there is no config directory or no file in it. A
/// file that exists but does not parse is an error.
pub fn load_or_default() -> Result<Config, ConfigError> {
    match get_config_path() {
        Ok(path) => {
            log::info!("Reading configuration from {}", path.display());
            load_config(&path)
        }
        Err(e) => {
            log::warn!("Falling back to default configuration: {}", e);
            Ok(Config::default())
        }
    }
}
