//! User preferences.
//!
//! Built-in defaults live in `default.yaml`. The user's preferences file is
//! layered on top of them, so it only needs to contain the values that differ.

#[macro_use]
extern crate lazy_static;

use std::path::Path;

use eyre::Result;
use serde::{Deserialize, Serialize};
use triuv_core::host::DocumentFormat;

pub mod persist;

const PREFS_FILE_FORMAT: config::FileFormat = config::FileFormat::Yaml;
const DEFAULT_PREFS_STR: &str = include_str!("default.yaml");

lazy_static! {
    /// Built-in preferences.
    pub static ref DEFAULT_PREFS: Preferences =
        serde_norway::from_str(DEFAULT_PREFS_STR).expect("error loading default preferences");
}

/// All user preferences.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Preferences {
    /// How stored state is displayed.
    pub display: DisplayPreferences,
    /// How scene documents are read and written.
    pub document: DocumentPreferences,
}

/// Preferences for the state panel.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct DisplayPreferences {
    /// Number of decimal places shown for coordinates.
    pub precision: usize,
    /// Whether to list all six mappings.
    pub show_mapping_table: bool,
}
impl Default for DisplayPreferences {
    fn default() -> Self {
        Self {
            precision: 3,
            show_mapping_table: false,
        }
    }
}

/// Preferences for scene documents.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct DocumentPreferences {
    /// Whether to copy a scene to `<file>.bak` before overwriting it.
    pub backup_before_write: bool,
    /// Format used when the file extension is not recognized.
    pub default_format: DocumentFormat,
}

impl Preferences {
    /// Loads preferences from the user's preferences file, falling back to the
    /// defaults.
    pub fn load() -> Self {
        match triuv_paths::prefs_file() {
            Ok(path) => Self::load_from(Some(path)),
            Err(e) => {
                log::warn!("Error locating user preferences: {e}");
                Self::load_from(None)
            }
        }
    }

    /// Loads preferences from a specific file layered over the defaults.
    ///
    /// If the file exists but cannot be loaded, it is moved aside to a backup
    /// file and the defaults are used.
    pub fn load_from(user_file: Option<&Path>) -> Self {
        lazy_static::initialize(&DEFAULT_PREFS);

        let mut config = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_PREFS_STR, PREFS_FILE_FORMAT));
        if let Some(path) = user_file {
            config = config.add_source(persist::user_config_source(path));
        }

        config
            .build()
            .and_then(|c| c.try_deserialize::<Preferences>())
            .unwrap_or_else(|e| {
                log::error!("Error loading preferences: {e}");
                if let Some(path) = user_file {
                    triuv_paths::move_to_backup_file(path);
                }
                DEFAULT_PREFS.clone()
            })
    }

    /// Saves preferences to the user's preferences file.
    pub fn save(&self) -> Result<()> {
        persist::save(triuv_paths::prefs_file()?, self)
    }

    /// Returns the preferences as YAML.
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_norway::to_string(self)?)
    }
}
