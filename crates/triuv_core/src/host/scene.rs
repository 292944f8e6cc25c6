use std::path::Path;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::{EditMesh, EditableMesh, MeshHost};
use crate::{Command, DocumentError, MappingState, Outcome, StatusLog};

/// Interaction mode of a scene.
#[derive(Serialize, Deserialize, Debug, Display, Default, Copy, Clone, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Objects can be selected but their data cannot be edited.
    #[default]
    Object,
    /// The active object's mesh is being edited.
    Edit,
}

/// Object in a scene.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SceneObject {
    /// Object name.
    pub name: String,
    /// Object data.
    pub data: ObjectData,
}

/// Data owned by a [`SceneObject`].
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ObjectData {
    /// Polygon mesh.
    Mesh(EditMesh),
    /// Object with no data.
    Empty,
}

/// File format of a scene document.
#[derive(
    Serialize, Deserialize, Debug, Display, EnumString, Default, Copy, Clone, PartialEq, Eq, Hash,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DocumentFormat {
    /// YAML (`.yaml` or `.yml`)
    #[default]
    Yaml,
    /// JSON (`.json`)
    Json,
}
impl DocumentFormat {
    /// Returns the format indicated by a file extension, if it is recognized.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "yaml" | "yml" => Some(Self::Yaml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Editing session document: objects, mode, and the stored mapping state.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(default)]
pub struct Scene {
    /// Current interaction mode.
    pub mode: Mode,
    /// Index of the active object.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_object: Option<usize>,
    /// Objects in the scene.
    pub objects: Vec<SceneObject>,
    /// Stored slots and current mapping.
    pub triuv: MappingState,
}

impl Scene {
    /// Constructs a scene containing a single mesh in edit mode.
    pub fn with_edit_mesh(name: impl Into<String>, mesh: EditMesh) -> Self {
        Self {
            mode: Mode::Edit,
            active_object: Some(0),
            objects: vec![SceneObject {
                name: name.into(),
                data: ObjectData::Mesh(mesh),
            }],
            triuv: MappingState::default(),
        }
    }

    /// Returns the active object.
    pub fn active_object(&self) -> Option<&SceneObject> {
        self.objects.get(self.active_object?)
    }

    /// Returns the mesh being edited, if any.
    pub fn edit_mesh(&self) -> Option<&EditMesh> {
        if self.mode != Mode::Edit {
            return None;
        }
        match &self.active_object()?.data {
            ObjectData::Mesh(mesh) => Some(mesh),
            ObjectData::Empty => None,
        }
    }

    /// Returns the mesh being edited, if any.
    pub fn edit_mesh_mut(&mut self) -> Option<&mut EditMesh> {
        if self.mode != Mode::Edit {
            return None;
        }
        match &mut self.objects.get_mut(self.active_object?)?.data {
            ObjectData::Mesh(mesh) => Some(mesh),
            ObjectData::Empty => None,
        }
    }

    /// Runs a command against this scene's own mapping state.
    pub fn execute(&mut self, command: Command, log: &mut StatusLog) -> Outcome {
        let Scene {
            mode,
            active_object,
            objects,
            triuv,
        } = self;
        let mut host = SceneHost {
            mode: *mode,
            active_object: *active_object,
            objects,
        };
        crate::execute(command, triuv, &mut host, log)
    }

    /// Checks that the active object exists and that every mesh is valid.
    pub fn validate(&self) -> Result<(), DocumentError> {
        if let Some(i) = self.active_object.filter(|&i| i >= self.objects.len()) {
            return Err(DocumentError::ActiveObjectOutOfRange(i));
        }
        for obj in &self.objects {
            if let ObjectData::Mesh(mesh) = &obj.data {
                mesh.validate()
                    .map_err(|source| DocumentError::InvalidMesh {
                        object: obj.name.clone(),
                        source,
                    })?;
            }
        }
        Ok(())
    }

    /// Parses and validates a scene document.
    pub fn from_str(s: &str, format: DocumentFormat) -> Result<Self, DocumentError> {
        let scene: Scene = match format {
            DocumentFormat::Yaml => serde_norway::from_str(s)?,
            DocumentFormat::Json => serde_json::from_str(s)?,
        };
        scene.validate()?;
        Ok(scene)
    }

    /// Serializes the scene document.
    pub fn to_string(&self, format: DocumentFormat) -> Result<String, DocumentError> {
        Ok(match format {
            DocumentFormat::Yaml => serde_norway::to_string(self)?,
            DocumentFormat::Json => serde_json::to_string_pretty(self)? + "\n",
        })
    }

    /// Loads a scene document. The format is chosen by file extension, falling
    /// back to `default_format`.
    pub fn load(path: &Path, default_format: DocumentFormat) -> Result<Self, DocumentError> {
        let format = DocumentFormat::from_path(path).unwrap_or(default_format);
        let s = std::fs::read_to_string(path).map_err(|source| DocumentError::Io {
            path: path.to_owned(),
            source,
        })?;
        let scene = Self::from_str(&s, format)?;
        log::debug!("loaded {format} scene from {}", path.display());
        Ok(scene)
    }

    /// Saves a scene document. The format is chosen by file extension, falling
    /// back to `default_format`.
    pub fn save(&self, path: &Path, default_format: DocumentFormat) -> Result<(), DocumentError> {
        let format = DocumentFormat::from_path(path).unwrap_or(default_format);
        let s = self.to_string(format)?;
        std::fs::write(path, s).map_err(|source| DocumentError::Io {
            path: path.to_owned(),
            source,
        })?;
        log::debug!("saved {format} scene to {}", path.display());
        Ok(())
    }
}

impl MeshHost for Scene {
    fn editable_mesh(&mut self) -> Option<&mut dyn EditableMesh> {
        editable_mesh_in(self.mode, self.active_object, &mut self.objects)
    }
}

/// Host view of a scene whose mapping state is borrowed separately.
struct SceneHost<'a> {
    mode: Mode,
    active_object: Option<usize>,
    objects: &'a mut [SceneObject],
}
impl MeshHost for SceneHost<'_> {
    fn editable_mesh(&mut self) -> Option<&mut dyn EditableMesh> {
        editable_mesh_in(self.mode, self.active_object, self.objects)
    }
}

fn editable_mesh_in(
    mode: Mode,
    active_object: Option<usize>,
    objects: &mut [SceneObject],
) -> Option<&mut dyn EditableMesh> {
    if mode != Mode::Edit {
        return None;
    }
    match &mut objects.get_mut(active_object?)?.data {
        ObjectData::Mesh(mesh) => Some(mesh),
        ObjectData::Empty => None,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{CoordinatePair, MapperError};

    const SCENE_YAML: &str = r#"
mode: edit
active_object: 0
objects:
  - name: Plane
    data:
      type: mesh
      vertices: [[0, 0, 0], [1, 0, 0], [0, 1, 0]]
      faces:
        - verts: [0, 1, 2]
          select: true
      uv_layers:
        - name: UVMap
          coords: [[{x: 0.1, y: 0.2}, {x: 0.3, y: 0.4}, {x: 0.5, y: 0.6}]]
      active_uv_layer: 0
triuv:
  index: 3
"#;

    #[test]
    fn test_parse_scene_document() {
        let scene = Scene::from_str(SCENE_YAML, DocumentFormat::Yaml).unwrap();
        assert_eq!(scene.mode, Mode::Edit);
        assert_eq!(scene.triuv.index.get(), 3);
        let mesh = scene.edit_mesh().unwrap();
        assert_eq!(
            mesh.face_coords(0).unwrap(),
            [
                CoordinatePair::new(0.1, 0.2),
                CoordinatePair::new(0.3, 0.4),
                CoordinatePair::new(0.5, 0.6),
            ],
        );
    }

    #[test]
    fn test_json_round_trip_preserves_scene() {
        let scene = Scene::from_str(SCENE_YAML, DocumentFormat::Yaml).unwrap();
        let json = scene.to_string(DocumentFormat::Json).unwrap();
        assert_eq!(Scene::from_str(&json, DocumentFormat::Json).unwrap(), scene);
    }

    #[test]
    fn test_no_editable_mesh_outside_edit_mode() {
        let mut scene = Scene::from_str(SCENE_YAML, DocumentFormat::Yaml).unwrap();
        assert!(scene.editable_mesh().is_some());

        scene.mode = Mode::Object;
        assert!(scene.editable_mesh().is_none());

        scene.mode = Mode::Edit;
        scene.objects[0].data = ObjectData::Empty;
        assert!(scene.editable_mesh().is_none());

        scene.active_object = None;
        assert!(scene.editable_mesh().is_none());
    }

    #[test]
    fn test_execute_uses_scene_state() {
        let mut scene = Scene::from_str(SCENE_YAML, DocumentFormat::Yaml).unwrap();
        let mut log = StatusLog::new();
        let outcome = scene.execute(Command::Capture, &mut log);
        assert!(outcome.is_success());
        assert_eq!(scene.triuv.slots[1], CoordinatePair::new(0.3, 0.4));

        scene.mode = Mode::Object;
        let outcome = scene.execute(Command::Apply, &mut log);
        assert_eq!(outcome.message, MapperError::NoEditableContext.to_string());
        assert_eq!(scene.triuv.index.get(), 3);
    }

    #[test]
    fn test_invalid_active_object() {
        let mut scene = Scene::from_str(SCENE_YAML, DocumentFormat::Yaml).unwrap();
        scene.active_object = Some(4);
        assert!(matches!(
            scene.validate(),
            Err(DocumentError::ActiveObjectOutOfRange(4)),
        ));
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            DocumentFormat::from_path(Path::new("a/b.YML")),
            Some(DocumentFormat::Yaml),
        );
        assert_eq!(
            DocumentFormat::from_path(Path::new("scene.json")),
            Some(DocumentFormat::Json),
        );
        assert_eq!(DocumentFormat::from_path(Path::new("scene.blend")), None);
        assert_eq!("json".parse::<DocumentFormat>().unwrap(), DocumentFormat::Json);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scene.yaml");
        let scene = Scene::from_str(SCENE_YAML, DocumentFormat::Yaml).unwrap();
        scene.save(&path, DocumentFormat::Json).unwrap();
        let loaded = Scene::load(&path, DocumentFormat::Json).unwrap();
        assert_eq!(loaded, scene);
    }
}
