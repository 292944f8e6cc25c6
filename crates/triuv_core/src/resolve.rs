//! Finding the one triangle that the user means.

use itertools::Itertools;

use crate::host::{EditableMesh, FaceId, UvLayerChange};
use crate::{CoordinatePair, MapperError, SLOT_COUNT};

/// Returns the face that capture and apply should operate on.
///
/// 1. The active face, if it is selected and has three corners.
/// 2. Otherwise, the only selected face with three corners.
///
/// If several selected triangles qualify and none of them is active, the
/// selection is ambiguous and `None` is returned.
pub fn resolve_unique_triangle(mesh: &dyn EditableMesh) -> Option<FaceId> {
    let is_selected_triangle =
        |face: FaceId| mesh.is_selected(face) && mesh.corner_count(face) == SLOT_COUNT;

    if let Some(face) = mesh.active_face().filter(|&f| is_selected_triangle(f)) {
        return Some(face);
    }

    (0..mesh.face_count())
        .filter(|&f| is_selected_triangle(f))
        .exactly_one()
        .ok()
}

/// Triangular face borrowed from a mesh for the duration of one operation.
///
/// Constructing one may activate or create a texture-coordinate layer. That
/// change is undone if the face turns out to be malformed or a write fails.
pub struct Triangle<'a> {
    mesh: &'a mut dyn EditableMesh,
    face: FaceId,
    coords: [CoordinatePair; SLOT_COUNT],
    layer_change: UvLayerChange,
}

impl<'a> Triangle<'a> {
    /// Borrows a face as a triangle, making sure the mesh has an active
    /// texture-coordinate layer and that the face has exactly three corners
    /// with texture coordinates in it.
    pub fn new(mesh: &'a mut dyn EditableMesh, face: FaceId) -> Result<Self, MapperError> {
        let layer_change = mesh.ensure_uv_layer();
        if layer_change != UvLayerChange::Unchanged {
            log::debug!("texture coordinate layer: {layer_change:?}");
        }
        match read_corners(mesh, face) {
            Ok(coords) => Ok(Self {
                mesh,
                face,
                coords,
                layer_change,
            }),
            Err(e) => {
                mesh.restore_uv_layer(layer_change);
                Err(e)
            }
        }
    }

    /// Returns the face ID.
    pub fn face(&self) -> FaceId {
        self.face
    }

    /// Returns the texture coordinates of corners A, B, C.
    pub fn coords(&self) -> [CoordinatePair; SLOT_COUNT] {
        self.coords
    }

    /// Overwrites the texture coordinates of corners A, B, C.
    ///
    /// If any corner rejects the write, the corners already written and the
    /// texture-coordinate layer are restored.
    pub fn set_coords(&mut self, values: [CoordinatePair; SLOT_COUNT]) -> Result<(), MapperError> {
        for (corner, value) in values.into_iter().enumerate() {
            if !self.mesh.set_corner_coord(self.face, corner, value) {
                log::debug!("corner {corner} of face {} rejected write", self.face);
                for (c, old) in self.coords.into_iter().enumerate().take(corner) {
                    self.mesh.set_corner_coord(self.face, c, old);
                }
                self.mesh.restore_uv_layer(self.layer_change);
                self.layer_change = UvLayerChange::Unchanged;
                return Err(MapperError::MalformedFace);
            }
        }
        self.coords = values;
        Ok(())
    }
}

fn read_corners(
    mesh: &dyn EditableMesh,
    face: FaceId,
) -> Result<[CoordinatePair; SLOT_COUNT], MapperError> {
    if mesh.corner_count(face) != SLOT_COUNT {
        return Err(MapperError::MalformedFace);
    }
    let mut ret = [CoordinatePair::ZERO; SLOT_COUNT];
    for (corner, c) in ret.iter_mut().enumerate() {
        *c = mesh
            .corner_coord(face, corner)
            .ok_or(MapperError::MalformedFace)?;
    }
    Ok(ret)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::EditMesh;

    /// Mesh with faces: 0 = quad, 1 = triangle, 2 = triangle.
    fn mesh() -> EditMesh {
        let mut mesh = EditMesh::new();
        for p in [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0], [0.0, 1.0, 0.0]] {
            mesh.add_vertex(p);
        }
        mesh.add_face([0, 1, 2, 3]);
        mesh.add_face([0, 1, 2]);
        mesh.add_face([0, 2, 3]);
        mesh.add_uv_layer("UVMap");
        mesh
    }

    #[test]
    fn test_nothing_selected() {
        let mesh = mesh();
        assert_eq!(resolve_unique_triangle(&mesh), None);
    }

    #[test]
    fn test_single_selected_triangle() {
        let mut mesh = mesh();
        mesh.select_face(2, true);
        assert_eq!(resolve_unique_triangle(&mesh), Some(2));

        // Selected quads don't count.
        mesh.select_face(0, true);
        assert_eq!(resolve_unique_triangle(&mesh), Some(2));
    }

    #[test]
    fn test_ambiguous_selection() {
        let mut mesh = mesh();
        mesh.select_face(1, true);
        mesh.select_face(2, true);
        assert_eq!(resolve_unique_triangle(&mesh), None);
    }

    #[test]
    fn test_active_face_breaks_tie() {
        let mut mesh = mesh();
        mesh.select_face(1, true);
        mesh.select_face(2, true);
        mesh.active_face = Some(1);
        assert_eq!(resolve_unique_triangle(&mesh), Some(1));
    }

    #[test]
    fn test_unselected_active_face_is_ignored() {
        let mut mesh = mesh();
        mesh.select_face(2, true);
        mesh.active_face = Some(1);
        assert_eq!(resolve_unique_triangle(&mesh), Some(2));
    }

    #[test]
    fn test_active_quad_is_ignored() {
        let mut mesh = mesh();
        mesh.select_face(0, true);
        mesh.select_face(1, true);
        mesh.active_face = Some(0);
        assert_eq!(resolve_unique_triangle(&mesh), Some(1));
    }

    #[test]
    fn test_quad_is_malformed() {
        let mut mesh = mesh();
        assert!(matches!(
            Triangle::new(&mut mesh, 0),
            Err(MapperError::MalformedFace),
        ));
        assert!(Triangle::new(&mut mesh, 1).is_ok());
    }

    #[test]
    fn test_inactive_layer_is_activated() {
        let mut mesh = mesh();
        mesh.active_uv_layer = None;
        let triangle = Triangle::new(&mut mesh, 1).unwrap();
        assert_eq!(triangle.coords(), [CoordinatePair::ZERO; 3]);
        assert_eq!(mesh.active_uv_layer, Some(0));
    }

    #[test]
    fn test_short_layer_is_malformed_and_stays_inactive() {
        let mut mesh = mesh();
        mesh.active_uv_layer = None;
        mesh.uv_layers[0].coords[1].pop();
        let before = mesh.clone();
        assert!(matches!(
            Triangle::new(&mut mesh, 1),
            Err(MapperError::MalformedFace),
        ));
        assert_eq!(mesh, before);
    }

    #[test]
    fn test_missing_layer_is_created_for_triangle() {
        let mut mesh = mesh();
        mesh.uv_layers.clear();
        mesh.active_uv_layer = None;
        let before = mesh.clone();

        assert!(Triangle::new(&mut mesh, 0).is_err());
        assert_eq!(mesh, before);

        let mut triangle = Triangle::new(&mut mesh, 2).unwrap();
        triangle.set_coords([CoordinatePair::new(1.0, 1.0); 3]).unwrap();
        assert_eq!(mesh.uv_layers.len(), 1);
    }
}
