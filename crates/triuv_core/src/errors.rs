use std::path::PathBuf;

use thiserror::Error;

/// Error produced when capturing or applying fails.
///
/// All of these are recoverable: nothing has been modified and the user may
/// retry after fixing the selection.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum MapperError {
    /// No mesh is being edited.
    #[error("No mesh object in Edit Mode.")]
    NoEditableContext,
    /// The selection does not resolve to exactly one triangular face.
    #[error("Select exactly one triangular face.")]
    NoUniqueTriangle,
    /// The resolved face does not have exactly three corners.
    #[error("Selected face is not a triangle.")]
    MalformedFace,
}

/// Error produced when validating an [`crate::EditMesh`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MeshError {
    /// Face references a vertex that does not exist
    #[error("face {face} references vertex {vertex} but the mesh has {vertex_count} vertices")]
    VertexOutOfRange {
        /// Face index.
        face: usize,
        /// Referenced vertex index.
        vertex: usize,
        /// Number of vertices in the mesh.
        vertex_count: usize,
    },
    /// Face has fewer than three corners
    #[error("face {face} has only {corners} corners")]
    DegenerateFace {
        /// Face index.
        face: usize,
        /// Number of corners.
        corners: usize,
    },
    /// Active face does not exist
    #[error("active face {0} is out of range")]
    ActiveFaceOutOfRange(usize),
    /// Active UV layer does not exist
    #[error("active UV layer {0} is out of range")]
    ActiveLayerOutOfRange(usize),
    /// UV layer does not match the face list
    #[error("UV layer {layer:?} does not match the faces of the mesh")]
    LayerShapeMismatch {
        /// Name of the UV layer.
        layer: String,
    },
}

/// Error produced when reading or writing a scene document.
#[derive(Error, Debug)]
pub enum DocumentError {
    /// I/O error
    #[error("error accessing {path}: {source}")]
    Io {
        /// File path.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },
    /// YAML error
    #[error("{0}")]
    Yaml(#[from] serde_norway::Error),
    /// JSON error
    #[error("{0}")]
    Json(#[from] serde_json::Error),
    /// Mesh validation error
    #[error("object {object:?}: {source}")]
    InvalidMesh {
        /// Name of the object containing the mesh.
        object: String,
        /// Validation error.
        source: MeshError,
    },
    /// Active object does not exist
    #[error("active object {0} is out of range")]
    ActiveObjectOutOfRange(usize),
}
