use super::ThemeArg;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use slotgraph::storage::{DEFAULT_EDGE_CAPACITY, DEFAULT_VERTEX_CAPACITY};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Settings read from the TOML config file. Command-line flags win.
#[derive(Debug, Default)]
pub struct CliConfig {
    path: Option<PathBuf>,
    data: RawConfig,
    theme: Option<ThemeArg>,
}

impl CliConfig {
    pub fn load(explicit: Option<PathBuf>) -> Result<Self, ConfigError> {
        let path = explicit.or_else(default_config_path);
        let data = match path.as_ref() {
            Some(config_path) if config_path.exists() => read_file(config_path)?,
            _ => RawConfig::default(),
        };
        let theme = parse_theme(&data)?;
        Ok(Self { path, data, theme })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn vertex_capacity(&self) -> Option<usize> {
        self.data.graph.vertex_capacity
    }

    pub fn edge_capacity(&self) -> Option<usize> {
        self.data.graph.edge_capacity
    }

    pub fn theme(&self) -> Option<ThemeArg> {
        self.theme
    }

    pub fn quiet(&self) -> bool {
        self.data.ui.quiet.unwrap_or(false)
    }

    pub fn history_file(&self) -> Option<&Path> {
        self.data.ui.history_file.as_deref()
    }

    /// Writes a config file with every setting spelled out.
    ///
    /// Refuses to overwrite an existing file unless `force` is set.
    pub fn write_defaults(&self, force: bool) -> Result<PathBuf, ConfigError> {
        let target = match &self.path {
            Some(path) => path.clone(),
            None => default_config_path().ok_or(ConfigError::NoConfigPath)?,
        };
        if target.exists() && !force {
            return Err(ConfigError::Exists { path: target });
        }
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|source| ConfigError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let defaults = RawConfig {
            graph: GraphSection {
                vertex_capacity: Some(DEFAULT_VERTEX_CAPACITY),
                edge_capacity: Some(DEFAULT_EDGE_CAPACITY),
            },
            ui: UiSection {
                theme: Some("auto".to_string()),
                quiet: Some(false),
                history_file: None,
            },
        };
        let serialized = toml::to_string_pretty(&defaults)
            .map_err(|source| ConfigError::Serialize { source })?;
        fs::write(&target, serialized).map_err(|source| ConfigError::Write {
            path: target.clone(),
            source,
        })?;
        Ok(target)
    }
}

fn read_file(path: &Path) -> Result<RawConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_theme(data: &RawConfig) -> Result<Option<ThemeArg>, ConfigError> {
    match data.ui.theme.as_deref() {
        Some(value) => ThemeArg::from_str(value, true)
            .map(Some)
            .map_err(|_| ConfigError::InvalidTheme {
                value: value.to_string(),
            }),
        None => Ok(None),
    }
}

#[derive(Debug, Default, Deserialize, Serialize)]
struct RawConfig {
    #[serde(default)]
    graph: GraphSection,
    #[serde(default)]
    ui: UiSection,
}

#[derive(Debug, Default, Deserialize, Serialize)]
struct GraphSection {
    vertex_capacity: Option<usize>,
    edge_capacity: Option<usize>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
struct UiSection {
    theme: Option<String>,
    quiet: Option<bool>,
    history_file: Option<PathBuf>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("failed to serialize config: {source}")]
    Serialize { source: toml::ser::Error },
    #[error("failed to write config {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to create config directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("config {path} already exists; pass --force to overwrite")]
    Exists { path: PathBuf },
    #[error("theme '{value}' is invalid (expected auto, light, dark or plain)")]
    InvalidTheme { value: String },
    #[error("no config directory found; pass --config or set SLOTGRAPH_CONFIG")]
    NoConfigPath,
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|base| base.join("slotgraph").join("config.toml"))
}
