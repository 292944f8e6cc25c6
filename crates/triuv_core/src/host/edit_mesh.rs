use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::{EditableMesh, FaceId, UvLayerChange};
use crate::{CoordinatePair, Float, MeshError};

/// Name given to a texture-coordinate layer created on demand.
pub const DEFAULT_UV_LAYER_NAME: &str = "UVMap";

/// Polygon face of an [`EditMesh`].
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq, Eq)]
pub struct Face {
    /// Vertex indices in winding order. Each entry is one corner.
    pub verts: SmallVec<[usize; 4]>,
    /// Whether the face is selected.
    #[serde(default)]
    pub select: bool,
}

/// Named texture-coordinate layer with one coordinate per face corner.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
pub struct UvLayer {
    /// Layer name.
    pub name: String,
    /// Coordinates for each face, indexed by face then corner.
    pub coords: Vec<SmallVec<[CoordinatePair; 4]>>,
}

/// In-memory polygon mesh in edit mode.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(default)]
pub struct EditMesh {
    /// Vertex positions.
    pub vertices: Vec<[Float; 3]>,
    /// Faces.
    pub faces: Vec<Face>,
    /// Active face, which takes precedence when resolving the selection.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_face: Option<FaceId>,
    /// Texture-coordinate layers.
    pub uv_layers: Vec<UvLayer>,
    /// Index of the active texture-coordinate layer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_uv_layer: Option<usize>,
}

impl EditMesh {
    /// Constructs an empty mesh with no texture-coordinate layers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a vertex and returns its index.
    pub fn add_vertex(&mut self, position: [Float; 3]) -> usize {
        self.vertices.push(position);
        self.vertices.len() - 1
    }

    /// Adds an unselected face and returns its index. Every texture-coordinate
    /// layer gets zeroed coordinates for the new face.
    pub fn add_face(&mut self, verts: impl IntoIterator<Item = usize>) -> FaceId {
        let verts: SmallVec<[usize; 4]> = verts.into_iter().collect();
        for layer in &mut self.uv_layers {
            layer
                .coords
                .push(SmallVec::from_elem(CoordinatePair::ZERO, verts.len()));
        }
        self.faces.push(Face {
            verts,
            select: false,
        });
        self.faces.len() - 1
    }

    /// Adds a zeroed texture-coordinate layer and returns its index. The new
    /// layer becomes active if there was no active layer.
    pub fn add_uv_layer(&mut self, name: impl Into<String>) -> usize {
        let coords = self
            .faces
            .iter()
            .map(|f| SmallVec::from_elem(CoordinatePair::ZERO, f.verts.len()))
            .collect();
        self.uv_layers.push(UvLayer {
            name: name.into(),
            coords,
        });
        let index = self.uv_layers.len() - 1;
        if self.active_uv_layer.is_none() {
            self.active_uv_layer = Some(index);
        }
        index
    }

    /// Returns the active texture-coordinate layer.
    pub fn active_uv_layer(&self) -> Option<&UvLayer> {
        self.uv_layers.get(self.active_uv_layer?)
    }
    fn active_uv_layer_mut(&mut self) -> Option<&mut UvLayer> {
        self.uv_layers.get_mut(self.active_uv_layer?)
    }

    /// Selects or deselects a face.
    pub fn select_face(&mut self, face: FaceId, select: bool) {
        if let Some(f) = self.faces.get_mut(face) {
            f.select = select;
        }
    }

    /// Deselects every face and clears the active face.
    pub fn deselect_all(&mut self) {
        for f in &mut self.faces {
            f.select = false;
        }
        self.active_face = None;
    }

    /// Returns the coordinates of every corner of a face in the active layer.
    pub fn face_coords(&self, face: FaceId) -> Option<&[CoordinatePair]> {
        Some(self.active_uv_layer()?.coords.get(face)?.as_slice())
    }

    /// Checks that all indices are in range and that every texture-coordinate
    /// layer has the same shape as the face list.
    pub fn validate(&self) -> Result<(), MeshError> {
        let vertex_count = self.vertices.len();
        for (i, face) in self.faces.iter().enumerate() {
            if face.verts.len() < 3 {
                return Err(MeshError::DegenerateFace {
                    face: i,
                    corners: face.verts.len(),
                });
            }
            if let Some(&v) = face.verts.iter().find(|&&v| v >= vertex_count) {
                return Err(MeshError::VertexOutOfRange {
                    face: i,
                    vertex: v,
                    vertex_count,
                });
            }
        }
        if let Some(f) = self.active_face.filter(|&f| f >= self.faces.len()) {
            return Err(MeshError::ActiveFaceOutOfRange(f));
        }
        if let Some(l) = self.active_uv_layer.filter(|&l| l >= self.uv_layers.len()) {
            return Err(MeshError::ActiveLayerOutOfRange(l));
        }
        for layer in &self.uv_layers {
            let shape_matches = layer.coords.len() == self.faces.len()
                && std::iter::zip(&layer.coords, &self.faces)
                    .all(|(coords, face)| coords.len() == face.verts.len());
            if !shape_matches {
                return Err(MeshError::LayerShapeMismatch {
                    layer: layer.name.clone(),
                });
            }
        }
        Ok(())
    }
}

impl EditableMesh for EditMesh {
    fn face_count(&self) -> usize {
        self.faces.len()
    }

    fn active_face(&self) -> Option<FaceId> {
        self.active_face
    }

    fn is_selected(&self, face: FaceId) -> bool {
        self.faces.get(face).is_some_and(|f| f.select)
    }

    fn corner_count(&self, face: FaceId) -> usize {
        self.faces.get(face).map_or(0, |f| f.verts.len())
    }

    fn ensure_uv_layer(&mut self) -> UvLayerChange {
        if self.active_uv_layer().is_some() {
            return UvLayerChange::Unchanged;
        }
        let previous = self.active_uv_layer.take();
        if self.uv_layers.is_empty() {
            self.add_uv_layer(DEFAULT_UV_LAYER_NAME);
            UvLayerChange::Created { previous }
        } else {
            self.active_uv_layer = Some(0);
            UvLayerChange::Activated { previous }
        }
    }

    fn restore_uv_layer(&mut self, change: UvLayerChange) {
        match change {
            UvLayerChange::Unchanged => (),
            UvLayerChange::Activated { previous } => self.active_uv_layer = previous,
            UvLayerChange::Created { previous } => {
                self.uv_layers.pop();
                self.active_uv_layer = previous;
            }
        }
    }

    fn corner_coord(&self, face: FaceId, corner: usize) -> Option<CoordinatePair> {
        self.face_coords(face)?.get(corner).copied()
    }

    fn set_corner_coord(&mut self, face: FaceId, corner: usize, value: CoordinatePair) -> bool {
        let slot = self
            .active_uv_layer_mut()
            .and_then(|layer| layer.coords.get_mut(face))
            .and_then(|coords| coords.get_mut(corner));
        match slot {
            Some(c) => {
                *c = value;
                true
            }
            None => false,
        }
    }
}
