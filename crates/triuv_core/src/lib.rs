//! Assigns three stored texture coordinates to the corners of a selected
//! triangle, rotating through all six corner mappings.
//!
//! The state that persists between commands is a [`MappingState`]: three
//! coordinate slots plus the number of the mapping to use next. It is passed
//! explicitly to [`capture()`] and [`apply()`] along with a [`MeshHost`], so
//! the operations can be used with any mesh-editing host.

mod command;
mod coords;
mod errors;
pub mod host;
mod logging;
mod mapping;
mod ops;
pub mod resolve;
mod state;


pub use command::{Command, Outcome, execute};
pub use coords::{CoordinatePair, Float};
pub use errors::{DocumentError, MapperError, MeshError};
pub use host::{EditMesh, EditableMesh, MeshHost, Scene};
pub use logging::{Level, LogLine, StatusLog};
pub use mapping::{
    CORNER_NAMES, Mapping, MappingIndex, Parity, SLOT_COUNT, permutation_for,
};
pub use ops::{ApplyReport, CaptureReport, apply, capture};
pub use state::{DEFAULT_SLOTS, MappingState};
