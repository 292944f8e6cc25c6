//! Interface to the mesh-editing host, plus an in-memory host.
//!
//! The operations in this crate never hold on to anything they get from a
//! host beyond a single call.

mod edit_mesh;
mod scene;

pub use edit_mesh::{EditMesh, Face, UvLayer};
pub use scene::{DocumentFormat, Mode, ObjectData, Scene, SceneObject};

use crate::CoordinatePair;

/// Index of a face within a mesh.
pub type FaceId = usize;

/// Mesh whose faces, selection, and active texture coordinates can be edited.
///
/// Corners of a face are indexed in the face's own winding order.
pub trait EditableMesh {
    /// Returns the number of faces. Faces are numbered from 0.
    fn face_count(&self) -> usize;

    /// Returns the active face, if any. The active face is not necessarily
    /// selected.
    fn active_face(&self) -> Option<FaceId>;

    /// Returns whether a face is selected. Returns `false` for faces that do
    /// not exist.
    fn is_selected(&self, face: FaceId) -> bool;

    /// Returns the number of corners of a face, or 0 for faces that do not
    /// exist.
    fn corner_count(&self, face: FaceId) -> usize;

    /// Makes sure there is an active texture-coordinate layer, activating or
    /// creating one if necessary. Returns what was changed.
    fn ensure_uv_layer(&mut self) -> UvLayerChange;

    /// Undoes a change returned by [`EditableMesh::ensure_uv_layer()`].
    fn restore_uv_layer(&mut self, change: UvLayerChange);

    /// Returns the texture coordinate of a corner in the active layer.
    fn corner_coord(&self, face: FaceId, corner: usize) -> Option<CoordinatePair>;

    /// Overwrites the texture coordinate of a corner in the active layer.
    /// Returns `false` if the corner does not exist.
    fn set_corner_coord(&mut self, face: FaceId, corner: usize, value: CoordinatePair) -> bool;
}

/// Change made by [`EditableMesh::ensure_uv_layer()`].
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum UvLayerChange {
    /// There was already an active layer.
    #[default]
    Unchanged,
    /// An existing layer was made active.
    Activated {
        /// Previously active layer index, which may have been invalid.
        previous: Option<usize>,
    },
    /// A new layer was created and made active.
    Created {
        /// Previously active layer index, which may have been invalid.
        previous: Option<usize>,
    },
}

/// Editing session that may or may not currently have an editable mesh.
pub trait MeshHost {
    /// Returns the mesh being edited, or `None` if no mesh is in edit mode.
    fn editable_mesh(&mut self) -> Option<&mut dyn EditableMesh>;
}
