//! Wavefront OBJ input.
//!
//! Only what a tetrahedral surface export needs is read: `o` starts a new
//! object, `g` starts one once the current object has faces (before that it
//! names the current object), `v` adds a position, `f` adds a triangle or
//! quad. Texture and
//! normal references in face tokens are ignored. Each object's face indices
//! are re-based so that its first vertex is index 0.

use super::{Scene, SceneObject};
use crate::error::{ExportError, Result};
use crate::types::Polygon;
use std::path::Path;

/// Load an OBJ file. Vertices before the first `o` or `g` line belong to an
/// object named after the file stem.
pub fn load_obj<P: AsRef<Path>>(path: P) -> Result<Scene> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;
    let default_name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "Object".to_string());
    scene_from_obj(&text, &default_name)
}

struct PendingObject {
    name: String,
    named: bool,
    first_vertex: usize,
    polygons: Vec<Polygon>,
}

/// Parse OBJ text into a scene of selected mesh objects at the world origin.
pub fn scene_from_obj(text: &str, default_name: &str) -> Result<Scene> {
    let mut positions: Vec<[f32; 3]> = Vec::new();
    let mut finished: Vec<SceneObject> = Vec::new();
    let mut current = PendingObject {
        name: default_name.to_string(),
        named: false,
        first_vertex: 0,
        polygons: Vec::new(),
    };

    for (i, raw) in text.lines().enumerate() {
        let line_no = i + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let mut parts = line.split_whitespace();
        match parts.next() {
            Some(keyword @ ("o" | "g")) => {
                let name = parts.collect::<Vec<_>>().join(" ");
                // A group inside an object that has no faces yet only names it.
                if keyword == "g" && current.polygons.is_empty() {
                    if !current.named && !name.is_empty() {
                        current.name = name;
                        current.named = true;
                    }
                    continue;
                }
                let next = PendingObject {
                    named: !name.is_empty(),
                    name: if name.is_empty() {
                        format!("{}.{:03}", default_name, finished.len() + 1)
                    } else {
                        name
                    },
                    first_vertex: positions.len(),
                    polygons: Vec::new(),
                };
                let done = std::mem::replace(&mut current, next);
                if let Some(object) = close_object(done, &positions) {
                    finished.push(object);
                }
            }
            Some("v") => {
                let mut xyz = [0.0f32; 3];
                for slot in xyz.iter_mut() {
                    let token = parts
                        .next()
                        .ok_or_else(|| ExportError::parse(line_no, "vertex needs 3 coordinates"))?;
                    *slot = token.parse().map_err(|_| {
                        ExportError::parse(line_no, format!("invalid coordinate '{}'", token))
                    })?;
                }
                positions.push(xyz);
            }
            Some("f") => {
                let polygon = parse_face(parts, line_no, current.first_vertex, positions.len())?;
                current.polygons.push(polygon);
            }
            // vt, vn, s, usemtl, mtllib, l, ...
            _ => {}
        }
    }

    if let Some(object) = close_object(current, &positions) {
        finished.push(object);
    }

    Ok(Scene::new(finished))
}

fn close_object(pending: PendingObject, positions: &[[f32; 3]]) -> Option<SceneObject> {
    let vertices = positions[pending.first_vertex..].to_vec();
    if vertices.is_empty() && pending.polygons.is_empty() {
        return None;
    }
    Some(SceneObject::mesh(pending.name, vertices, pending.polygons))
}

fn parse_face<'a>(
    tokens: impl Iterator<Item = &'a str>,
    line_no: usize,
    first_vertex: usize,
    vertex_count: usize,
) -> Result<Polygon> {
    let mut indices = Vec::with_capacity(4);

    for token in tokens {
        let position = token.split('/').next().unwrap_or(token);
        let raw: i64 = position
            .parse()
            .map_err(|_| ExportError::parse(line_no, format!("invalid face index '{}'", token)))?;

        let global = match raw {
            0 => return Err(ExportError::parse(line_no, "face index 0 is not valid in OBJ")),
            r if r > 0 => r - 1,
            r => vertex_count as i64 + r,
        };

        if global < first_vertex as i64 || global >= vertex_count as i64 {
            return Err(ExportError::parse(
                line_no,
                format!("face index {} is outside the current object", raw),
            ));
        }
        indices.push((global as usize - first_vertex) as u32);
    }

    if !(3..=4).contains(&indices.len()) {
        return Err(ExportError::parse(
            line_no,
            format!("only triangles and quads are supported, got {} corners", indices.len()),
        ));
    }

    Ok(Polygon::new(indices))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_object_with_slashes() {
        let text = "\
# exported
o Tet
v 0 0 0
v 1 0 0
v 0 1 0
v 0 0 1
vn 0 0 1
f 1//1 2//1 3//1
f 1/1/1 2/1/1 4/1/1
f 1 3 4
f 2 3 4
";
        let scene = scene_from_obj(text, "file").unwrap();
        assert_eq!(scene.objects.len(), 1);

        let tet = &scene.objects[0];
        assert_eq!(tet.name, "Tet");
        assert_eq!(tet.vertices.len(), 4);
        assert_eq!(tet.polygons[1], Polygon::from([0, 1, 3]));
        assert!(tet.is_mesh());
        assert!(tet.selected);
    }

    #[test]
    fn test_objects_are_rebased() {
        let text = "\
o A
v 0 0 0
v 1 0 0
v 0 1 0
f 1 2 3
o B
v 5 0 0
v 6 0 0
v 5 1 0
v 5 0 1
f 4 5 6 7
f -4 -3 -1
";
        let scene = scene_from_obj(text, "file").unwrap();
        let names: Vec<_> = scene.objects.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B"]);

        let b = &scene.objects[1];
        assert_eq!(b.vertices[0], [5.0, 0.0, 0.0]);
        assert_eq!(b.polygons[0], Polygon::from([0, 1, 2, 3]));
        assert_eq!(b.polygons[1], Polygon::from([0, 1, 3]));
    }

    #[test]
    fn test_groups_start_objects() {
        let text = "\
g A
v 0 0 0
v 1 0 0
v 0 1 0
f 1 2 3
g B
v 5 0 0
v 6 0 0
v 5 1 0
f 4 5 6
";
        let scene = scene_from_obj(text, "file").unwrap();
        let names: Vec<_> = scene.objects.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B"]);
        assert_eq!(scene.objects[1].vertices[0], [5.0, 0.0, 0.0]);
        assert_eq!(scene.objects[1].polygons[0], Polygon::from([0, 1, 2]));
    }

    #[test]
    fn test_group_after_object_keeps_its_vertices() {
        let text = "\
o Tet
v 0 0 0
v 1 0 0
v 0 1 0
g Tet_Surface
f 1 2 3
";
        let scene = scene_from_obj(text, "file").unwrap();
        assert_eq!(scene.objects.len(), 1);
        assert_eq!(scene.objects[0].name, "Tet");
        assert_eq!(scene.objects[0].polygons[0], Polygon::from([0, 1, 2]));
    }

    #[test]
    fn test_vertices_before_first_object_use_default_name() {
        let text = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n";
        let scene = scene_from_obj(text, "liver").unwrap();
        assert_eq!(scene.objects[0].name, "liver");
    }

    #[test]
    fn test_rejects_ngons() {
        let text = "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nv 0 2 0\nf 1 2 3 4 5\n";
        match scene_from_obj(text, "x") {
            Err(ExportError::Parse { line, .. }) => assert_eq!(line, 6),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_rejects_index_into_previous_object() {
        let text = "o A\nv 0 0 0\nv 1 0 0\nv 0 1 0\no B\nv 2 0 0\nf 1 2 4\n";
        assert!(matches!(
            scene_from_obj(text, "x"),
            Err(ExportError::Parse { line: 7, .. })
        ));
    }

    #[test]
    fn test_rejects_bad_coordinate() {
        assert!(scene_from_obj("v 0 zero 0\n", "x").is_err());
    }
}
