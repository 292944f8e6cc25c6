//! Capture and apply.
//!
//! Both operations either complete fully or leave the state and the mesh as
//! they found them.

use crate::host::{FaceId, MeshHost};
use crate::resolve::{Triangle, resolve_unique_triangle};
use crate::{CoordinatePair, Mapping, MapperError, MappingIndex, MappingState, SLOT_COUNT};

/// Result of a successful capture.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CaptureReport {
    /// Face that was read.
    pub face: FaceId,
    /// Values now stored in slots 1, 2, 3.
    pub slots: [CoordinatePair; SLOT_COUNT],
}

/// Result of a successful apply.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ApplyReport {
    /// Face that was written.
    pub face: FaceId,
    /// Mapping that was just applied.
    pub applied: MappingIndex,
    /// Mapping that the next apply will use.
    pub next: MappingIndex,
    /// Values written to corners A, B, C.
    pub corners: [CoordinatePair; SLOT_COUNT],
}
impl ApplyReport {
    /// Returns the mapping that was just applied.
    pub fn mapping(&self) -> Mapping {
        self.applied.mapping()
    }
}

/// Locates the triangle to operate on.
fn target_triangle<H: MeshHost + ?Sized>(host: &mut H) -> Result<Triangle<'_>, MapperError> {
    let mesh = host
        .editable_mesh()
        .ok_or(MapperError::NoEditableContext)?;
    let face = resolve_unique_triangle(mesh).ok_or(MapperError::NoUniqueTriangle)?;
    Triangle::new(mesh, face)
}

/// Copies the texture coordinates of the selected triangle's corners A, B, C
/// into slots 1, 2, 3. The mapping index is not changed.
pub fn capture<H: MeshHost + ?Sized>(
    state: &mut MappingState,
    host: &mut H,
) -> Result<CaptureReport, MapperError> {
    let triangle = target_triangle(host)?;
    let slots = triangle.coords();
    state.slots = slots;
    log::trace!("captured {slots:?} from face {}", triangle.face());
    Ok(CaptureReport {
        face: triangle.face(),
        slots,
    })
}

/// Writes the stored slots to the selected triangle's corners using the
/// current mapping, then advances to the next mapping.
pub fn apply<H: MeshHost + ?Sized>(
    state: &mut MappingState,
    host: &mut H,
) -> Result<ApplyReport, MapperError> {
    let mut triangle = target_triangle(host)?;
    let corners = state.corner_values();
    triangle.set_coords(corners)?;
    let applied = state.index.advance();
    log::trace!(
        "applied mapping {applied} ({}) to face {}",
        applied.mapping().describe(),
        triangle.face(),
    );
    Ok(ApplyReport {
        face: triangle.face(),
        applied,
        next: state.index,
        corners,
    })
}
