use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::host::MeshHost;
use crate::{Level, MappingState, StatusLog, apply, capture};

/// Command that the user can invoke.
#[derive(
    Serialize,
    Deserialize,
    Debug,
    Display,
    EnumIter,
    EnumString,
    Copy,
    Clone,
    PartialEq,
    Eq,
    Hash,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Command {
    /// Copy the selected triangle's texture coordinates into the slots.
    Capture,
    /// Write the slots to the selected triangle and rotate the mapping.
    Apply,
}
impl Command {
    /// Returns the label shown on the button for this command.
    pub fn label(self) -> &'static str {
        match self {
            Command::Capture => "Capture From Selected Triangle",
            Command::Apply => "Apply Mapping",
        }
    }
}

/// Outcome of a command, as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// [`Level::Info`] on success, [`Level::Error`] on failure.
    pub level: Level,
    /// Human-readable message.
    pub message: String,
}
impl Outcome {
    /// Returns whether the command succeeded.
    pub fn is_success(&self) -> bool {
        self.level != Level::Error
    }
}

/// Runs a command and reports its outcome to `log`.
///
/// Failures leave both `state` and the host untouched.
pub fn execute<H: MeshHost + ?Sized>(
    command: Command,
    state: &mut MappingState,
    host: &mut H,
    log: &mut StatusLog,
) -> Outcome {
    let result = match command {
        Command::Capture => capture(state, host)
            .map(|_| "Captured UVs into slots 1, 2, 3 (A→1, B→2, C→3).".to_owned()),
        Command::Apply => apply(state, host).map(|report| {
            format!(
                "Applied mapping #{} and rotated to {}.",
                report.applied, report.next,
            )
        }),
    };
    let outcome = match result {
        Ok(message) => Outcome {
            level: Level::Info,
            message,
        },
        Err(e) => Outcome {
            level: Level::Error,
            message: e.to_string(),
        },
    };
    match outcome.level {
        Level::Error => log.error(&outcome.message),
        _ => log.info(&outcome.message),
    }
    outcome
}

