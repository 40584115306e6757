//! Layered settings for the command line front end.
//!
//! The kernels themselves take no configuration; these settings only
//! shape how the CLI reads input and renders results.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Name of the settings file inside the user config directory.
pub const CONFIG_FILE: &str = "config.toml";

/// Name of the project-local settings file.
pub const LOCAL_CONFIG_FILE: &str = "lanekit.toml";

/// How decoded bytes are written.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DecodeFormat {
    /// The decoded bytes as-is
    #[default]
    Raw,
    /// Lowercase hex followed by a newline
    Hex,
}

/// When to color error output.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ColorMode {
    /// Color when stderr is a terminal and `NO_COLOR` is unset
    #[default]
    Auto,
    Always,
    Never,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct DecodeSettings {
    /// Strip ASCII whitespace (line wraps, trailing newline) before decoding
    pub ignore_whitespace: bool,
    pub format: DecodeFormat,
}

impl Default for DecodeSettings {
    fn default() -> Self {
        DecodeSettings {
            ignore_whitespace: true,
            format: DecodeFormat::Raw,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct OutputSettings {
    pub color: ColorMode,
    /// Emit machine-readable JSON where a command supports it
    pub json: bool,
}

/// Settings loaded from TOML.
///
/// Every key is optional; missing keys keep their defaults.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    pub decode: DecodeSettings,
    pub output: OutputSettings,
}

/// Errors raised while loading settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid settings: {0}")]
    Invalid(#[from] toml::de::Error),
}

impl Settings {
    /// Parses settings from TOML content.
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Loads settings from a single file.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = read(path)?;
        Self::from_toml(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// `<config_dir>/lanekit/config.toml`, if the platform has a config directory.
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("lanekit").join(CONFIG_FILE))
    }

    /// Default locations, lowest priority first.
    pub fn search_paths() -> Vec<PathBuf> {
        let mut paths: Vec<PathBuf> = Self::user_config_path().into_iter().collect();
        paths.push(PathBuf::from(LOCAL_CONFIG_FILE));
        paths
    }

    /// Loads settings with overrides from standard locations.
    ///
    /// Layers in priority order:
    /// 1. Built-in defaults
    /// 2. `~/.config/lanekit/config.toml` (user overrides)
    /// 3. `./lanekit.toml` (project-local overrides)
    /// 4. `explicit`, when given
    ///
    /// Each layer only overrides the keys it sets. Unreadable or malformed
    /// files in the default locations are skipped with a warning; a broken
    /// `explicit` file is an error.
    pub fn load_with_overrides(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_layers(&Self::search_paths(), explicit)
    }

    /// Layers `paths` (lowest priority first) and then `explicit` over the
    /// defaults, with the same skipping rules as [`Settings::load_with_overrides`].
    pub fn load_layers(paths: &[PathBuf], explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let mut merged = toml::Table::new();

        for path in paths {
            if !path.exists() {
                continue;
            }
            match read_table(path) {
                Ok(table) => {
                    log::debug!("loaded settings from {}", path.display());
                    merge_tables(&mut merged, table);
                }
                Err(e) => log::warn!("ignoring settings file: {e}"),
            }
        }

        if let Some(path) = explicit {
            merge_tables(&mut merged, read_table(path)?);
            log::debug!("loaded settings from {}", path.display());
        }

        Ok(toml::Value::Table(merged).try_into()?)
    }
}

fn read(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads one layer, rejecting it unless it also parses as `Settings` on its own.
fn read_table(path: &Path) -> Result<toml::Table, ConfigError> {
    let content = read(path)?;
    let parse_error = |source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    };
    Settings::from_toml(&content).map_err(parse_error)?;
    toml::from_str(&content).map_err(parse_error)
}

/// Deep merge: nested tables merge key by key, anything else is replaced.
fn merge_tables(base: &mut toml::Table, overlay: toml::Table) {
    for (key, value) in overlay {
        match (base.get_mut(&key), value) {
            (Some(toml::Value::Table(existing)), toml::Value::Table(incoming)) => {
                merge_tables(existing, incoming);
            }
            (_, value) => {
                base.insert(key, value);
            }
        }
    }
}
