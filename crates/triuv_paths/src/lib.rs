//! Locations of files read and written by the triangle UV mapper.

use std::env;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use eyre::{OptionExt, Result};

#[macro_use]
extern crate lazy_static;

/// Whether this is an official build of the software (as opposed to a local
/// build).
pub const IS_OFFICIAL_BUILD: bool = std::option_env!("TRIUV_OFFICIAL_BUILD").is_some();

/// Environment variable that overrides the location of the preferences file.
pub const PREFS_FILE_ENV_VAR: &str = "TRIUV_PREFS";

const PREFS_FILE_NAME: &str = "triuv-prefs";
const PREFS_FILE_EXTENSION: &str = "yaml";

lazy_static! {
    static ref PATHS: Option<AppPaths> = app_paths();
}

fn get() -> Result<&'static AppPaths> {
    PATHS.as_ref().ok_or_eyre("no paths")
}

/// Returns the user preferences file.
pub fn prefs_file() -> Result<&'static Path> {
    Ok(&get()?.prefs_file)
}

/// Renames a file to create a backup. Emits a log message indicating success or
/// failure.
pub fn move_to_backup_file(original: &Path) {
    let now = time::OffsetDateTime::now_local().unwrap_or_else(|_| time::OffsetDateTime::now_utc());
    let backup_path = backup_path(original, now);

    match std::fs::rename(original, &backup_path) {
        Ok(()) => {
            log::info!(
                "backup of {} stored at {}",
                original.display(),
                backup_path.display(),
            );
        }
        Err(e) => {
            if original.is_file() {
                log::error!("error backing up {}: {e}", original.display());
            }
        }
    }
}

/// Copies a file to `<name>.bak` next to it, replacing any previous backup.
/// Does nothing if the file does not exist.
pub fn copy_to_sibling_backup(original: &Path) -> Result<Option<PathBuf>> {
    if !original.is_file() {
        return Ok(None);
    }
    let mut backup = original.as_os_str().to_owned();
    backup.push(".bak");
    let backup = PathBuf::from(backup);
    std::fs::copy(original, &backup)?;
    log::debug!("copied {} to {}", original.display(), backup.display());
    Ok(Some(backup))
}

fn backup_path(original: &Path, now: time::OffsetDateTime) -> PathBuf {
    let mut ret = original.to_owned();

    let stem = match ret.file_stem() {
        Some(stem) => stem.to_string_lossy().into_owned(),
        None => "unknown".to_string(),
    };
    let extension = match ret.extension() {
        Some(extension) => extension.to_string_lossy().into_owned(),
        None => "txt".to_string(),
    };
    ret.pop();

    ret.push(format!(
        "{stem}_{:04}-{:02}-{:02}_{:02}-{:02}-{:02}_bak.{extension}",
        now.year(),
        now.month() as u8,
        now.day(),
        now.hour(),
        now.minute(),
        now.second(),
    ));

    ret
}

/// Paths to external files read by the triangle UV mapper.
struct AppPaths {
    /// Path to the user preferences file.
    prefs_file: PathBuf,
}

/// Returns the app paths.
///
/// - If [`PREFS_FILE_ENV_VAR`] is set, uses that file.
/// - For dev builds, uses the project directory.
/// - For official release builds, uses the system configuration directory.
fn app_paths() -> Option<AppPaths> {
    if let Some(path) = env::var_os(PREFS_FILE_ENV_VAR) {
        log::info!("Using preferences file from {PREFS_FILE_ENV_VAR}");
        return Some(AppPaths {
            prefs_file: PathBuf::from(path),
        });
    }
    match IS_OFFICIAL_BUILD {
        true => nonportable_paths().or_else(portable_paths),
        false => portable_paths().or_else(nonportable_paths),
    }
}

fn nonportable_paths() -> Option<AppPaths> {
    match ProjectDirs::from("", "", "triuv") {
        Some(dirs) => {
            log::debug!("Using nonportable paths");
            Some(AppPaths {
                prefs_file: dirs
                    .config_dir()
                    .join(format!("{PREFS_FILE_NAME}.{PREFS_FILE_EXTENSION}")),
            })
        }
        None => {
            log::error!("Error getting nonportable directories");
            None
        }
    }
}

fn portable_paths() -> Option<AppPaths> {
    // `/crates/triuv_paths/` -> workspace root
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).parent()?.parent()?;
    log::debug!("Using portable paths");
    Some(AppPaths {
        prefs_file: dir.join(format!("{PREFS_FILE_NAME}.{PREFS_FILE_EXTENSION}")),
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_backup_path() {
        let now = time::Date::from_calendar_date(2025, time::Month::March, 7)
            .unwrap()
            .with_hms(9, 5, 30)
            .unwrap()
            .assume_utc();
        assert_eq!(
            backup_path(Path::new("/tmp/prefs/triuv-prefs.yaml"), now),
            Path::new("/tmp/prefs/triuv-prefs_2025-03-07_09-05-30_bak.yaml"),
        );
        assert_eq!(
            backup_path(Path::new("notes"), now),
            Path::new("notes_2025-03-07_09-05-30_bak.txt"),
        );
    }

    #[test]
    fn test_sibling_backup_of_missing_file() {
        let path = std::env::temp_dir().join("triuv-missing-file-for-backup-test.yaml");
        assert_eq!(copy_to_sibling_backup(&path).unwrap(), None);
    }
}
