//! Reading and writing the user preferences file.

use std::path::Path;

use eyre::Result;
use serde::Serialize;

/// Returns a configuration source for the user preferences file. A missing
/// file is not an error.
pub fn user_config_source(path: &Path) -> impl config::Source + Send + Sync + 'static {
    config::File::from(path)
        .format(super::PREFS_FILE_FORMAT)
        .required(false)
}

/// Writes preferences as YAML, creating parent directories as needed.
pub fn save(path: &Path, prefs_data: &impl Serialize) -> Result<()> {
    if let Some(p) = path.parent() {
        std::fs::create_dir_all(p)?;
    }
    serde_norway::to_writer(std::fs::File::create(path)?, prefs_data)?;
    log::info!("saved preferences to {}", path.display());
    Ok(())
}
