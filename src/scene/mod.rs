//! Mesh sources: the objects an export runs over.
//!
//! A [`MeshSource`] plays the part of the host application. It hands out the
//! selected objects, each with its world origin, vertex positions and polygon
//! index lists. [`Scene`] is the in-memory implementation, loadable from JSON
//! or Wavefront OBJ.

pub mod obj;

pub use obj::{load_obj, scene_from_obj};

use crate::error::Result;
use crate::types::Polygon;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// What kind of object a scene entry is. Only meshes can be exported.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ObjectKind {
    #[default]
    Mesh,
    /// Any non-mesh object (camera, light, empty, ...), by its type name.
    Other(String),
}

impl From<String> for ObjectKind {
    fn from(value: String) -> Self {
        if value.eq_ignore_ascii_case("mesh") {
            ObjectKind::Mesh
        } else {
            ObjectKind::Other(value)
        }
    }
}

impl From<ObjectKind> for String {
    fn from(value: ObjectKind) -> Self {
        match value {
            ObjectKind::Mesh => "mesh".to_string(),
            ObjectKind::Other(name) => name,
        }
    }
}

impl std::fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ObjectKind::Mesh => write!(f, "mesh"),
            ObjectKind::Other(name) => write!(f, "{}", name),
        }
    }
}

/// One object of a scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneObject {
    pub name: String,
    #[serde(default)]
    pub kind: ObjectKind,
    /// World-space origin of the object.
    #[serde(default)]
    pub location: [f32; 3],
    /// Object-local vertex positions.
    #[serde(default)]
    pub vertices: Vec<[f32; 3]>,
    #[serde(default)]
    pub polygons: Vec<Polygon>,
    #[serde(default = "default_selected")]
    pub selected: bool,
}

fn default_selected() -> bool {
    true
}

impl SceneObject {
    /// A selected mesh object at the world origin.
    pub fn mesh(
        name: impl Into<String>,
        vertices: Vec<[f32; 3]>,
        polygons: impl IntoIterator<Item = impl Into<Polygon>>,
    ) -> Self {
        Self {
            name: name.into(),
            kind: ObjectKind::Mesh,
            location: [0.0; 3],
            vertices,
            polygons: polygons.into_iter().map(Into::into).collect(),
            selected: true,
        }
    }

    /// A selected object of a non-mesh type, without geometry.
    pub fn other(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ObjectKind::Other(kind.into()),
            location: [0.0; 3],
            vertices: Vec::new(),
            polygons: Vec::new(),
            selected: true,
        }
    }

    pub fn with_location(mut self, location: [f32; 3]) -> Self {
        self.location = location;
        self
    }

    pub fn with_selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    pub fn is_mesh(&self) -> bool {
        self.kind == ObjectKind::Mesh
    }

    pub fn origin(&self) -> Vec3 {
        Vec3::from_array(self.location)
    }

    /// Vertex positions as vectors.
    pub fn positions(&self) -> Vec<Vec3> {
        self.vertices.iter().map(|&v| Vec3::from_array(v)).collect()
    }
}

/// Supplier of objects to export.
pub trait MeshSource {
    /// Selected objects in selection order.
    fn selected_objects(&self) -> Box<dyn Iterator<Item = &SceneObject> + '_>;

    /// The object the export was invoked on, if any.
    fn active_object(&self) -> Option<&SceneObject>;
}

/// A flat list of objects with an optional active object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub objects: Vec<SceneObject>,
    /// Name of the active object. Defaults to the first selected object.
    #[serde(default)]
    pub active: Option<String>,
}

impl Scene {
    pub fn new(objects: Vec<SceneObject>) -> Self {
        Self {
            objects,
            active: None,
        }
    }

    pub fn with_active(mut self, name: impl Into<String>) -> Self {
        self.active = Some(name.into());
        self
    }

    pub fn object(&self, name: &str) -> Option<&SceneObject> {
        self.objects.iter().find(|o| o.name == name)
    }
}

impl MeshSource for Scene {
    fn selected_objects(&self) -> Box<dyn Iterator<Item = &SceneObject> + '_> {
        Box::new(self.objects.iter().filter(|o| o.selected))
    }

    fn active_object(&self) -> Option<&SceneObject> {
        match &self.active {
            Some(name) => self.object(name),
            None => self.objects.iter().find(|o| o.selected),
        }
    }
}

/// Parse a JSON scene description.
///
/// ```json
/// {
///   "objects": [
///     { "name": "Liver", "location": [0, 0, 1],
///       "vertices": [[0, 0, 0], [1, 0, 0], [0, 1, 0], [0, 0, 1]],
///       "polygons": [[0, 1, 2], [0, 1, 3], [0, 2, 3], [1, 2, 3]] }
///   ]
/// }
/// ```
pub fn scene_from_json(json: &str) -> Result<Scene> {
    Ok(serde_json::from_str(json)?)
}

/// Load a scene from a `.json` or `.obj` file.
pub fn load_scene<P: AsRef<Path>>(path: P) -> Result<Scene> {
    let path = path.as_ref();
    let is_obj = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("obj"))
        .unwrap_or(false);

    if is_obj {
        load_obj(path)
    } else {
        let json = std::fs::read_to_string(path)?;
        scene_from_json(&json)
    }
}
