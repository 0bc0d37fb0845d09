//! TetraMaker `.tet` export.
//!
//! The format is line based: a banner comment, the vertex count, one `v x y z`
//! line per vertex, the tetrahedron count and one `t i0 i1 i2 i3` line per
//! cell with 0-based vertex indices.

use crate::error::{ExportError, Result};
use crate::tetra::Tetrahedron;
use crate::types::BoundingBox;
use glam::Vec3;
use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// First line of every file.
pub const TET_BANNER: &str = "# Tetrahedral mesh generated using TetraMaker (c) AGEIA";

/// File extension including the dot.
pub const TET_EXTENSION: &str = ".tet";

/// Contents of one `.tet` file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TetMesh {
    /// Vertex positions, already in the simulator's frame.
    pub vertices: Vec<Vec3>,
    /// Cells referencing `vertices`.
    pub tetrahedra: Vec<Tetrahedron>,
}

impl TetMesh {
    pub fn new(vertices: Vec<Vec3>, tetrahedra: Vec<Tetrahedron>) -> Self {
        Self {
            vertices,
            tetrahedra,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn tetrahedron_count(&self) -> usize {
        self.tetrahedra.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() && self.tetrahedra.is_empty()
    }

    pub fn bounds(&self) -> Option<BoundingBox> {
        BoundingBox::from_points(self.vertices.iter().copied())
    }
}

/// Negative zero is written as `0`.
fn coord(value: f32) -> f32 {
    if value == 0.0 {
        0.0
    } else {
        value
    }
}

impl fmt::Display for TetMesh {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", TET_BANNER)?;
        writeln!(f)?;
        writeln!(f, "# {} vertices", self.vertices.len())?;
        for v in &self.vertices {
            writeln!(f, "v {} {} {}", coord(v.x), coord(v.y), coord(v.z))?;
        }
        writeln!(f)?;
        writeln!(f, "# {} tetrahedra", self.tetrahedra.len())?;
        for tet in &self.tetrahedra {
            let [a, b, c, d] = tet.indices();
            writeln!(f, "t {} {} {} {}", a, b, c, d)?;
        }
        Ok(())
    }
}

/// Render a mesh to `.tet` text.
pub fn format_tet(mesh: &TetMesh) -> String {
    mesh.to_string()
}

/// Stream a mesh to any writer.
pub fn write_tet_to<W: Write>(mesh: &TetMesh, mut writer: W) -> Result<()> {
    write!(writer, "{}", mesh)?;
    writer.flush()?;
    Ok(())
}

/// Create (or truncate) `path` and write the mesh to it.
pub fn write_tet<P: AsRef<Path>>(path: P, mesh: &TetMesh) -> Result<()> {
    let file = File::create(path.as_ref())?;
    write_tet_to(mesh, BufWriter::new(file))
}

/// Parse `.tet` text back into a mesh.
///
/// Header counts, when present, must match the records that follow them.
pub fn parse_tet(text: &str) -> Result<TetMesh> {
    let mut mesh = TetMesh::default();
    let mut declared_vertices = None;
    let mut declared_tetrahedra = None;

    for (i, raw) in text.lines().enumerate() {
        let line_no = i + 1;
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(comment) = line.strip_prefix('#') {
            let mut parts = comment.split_whitespace();
            if let (Some(count), Some(section), None) = (parts.next(), parts.next(), parts.next()) {
                if let Ok(count) = count.parse::<usize>() {
                    match section {
                        "vertices" => declared_vertices = Some(count),
                        "tetrahedra" => declared_tetrahedra = Some(count),
                        _ => {}
                    }
                }
            }
            continue;
        }

        let mut parts = line.split_whitespace();
        match parts.next() {
            Some("v") => {
                let xyz = parse_fields::<f32, 3>(&mut parts, line_no)?;
                mesh.vertices.push(Vec3::from_array(xyz));
            }
            Some("t") => {
                let indices = parse_fields::<u32, 4>(&mut parts, line_no)?;
                mesh.tetrahedra.push(Tetrahedron(indices));
            }
            Some(other) => {
                return Err(ExportError::parse(
                    line_no,
                    format!("unknown record '{}'", other),
                ))
            }
            None => {}
        }
    }

    check_count("vertices", declared_vertices, mesh.vertices.len())?;
    check_count("tetrahedra", declared_tetrahedra, mesh.tetrahedra.len())?;
    Ok(mesh)
}

fn parse_fields<'a, T, const N: usize>(
    parts: &mut impl Iterator<Item = &'a str>,
    line_no: usize,
) -> Result<[T; N]>
where
    T: std::str::FromStr + Copy + Default,
{
    let mut out = [T::default(); N];
    for slot in out.iter_mut() {
        let token = parts
            .next()
            .ok_or_else(|| ExportError::parse(line_no, format!("expected {} values", N)))?;
        *slot = token
            .parse()
            .map_err(|_| ExportError::parse(line_no, format!("invalid number '{}'", token)))?;
    }
    if parts.next().is_some() {
        return Err(ExportError::parse(line_no, format!("expected {} values", N)));
    }
    Ok(out)
}

fn check_count(section: &'static str, declared: Option<usize>, actual: usize) -> Result<()> {
    match declared {
        Some(declared) if declared != actual => Err(ExportError::HeaderMismatch {
            section,
            declared,
            actual,
        }),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TetMesh {
        TetMesh::new(
            vec![
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(0.0, 1.5, 0.0),
                Vec3::new(0.0, 0.0, -0.25),
            ],
            vec![Tetrahedron::new(0, 1, 2, 3)],
        )
    }

    #[test]
    fn test_format_exact() {
        let text = format_tet(&sample());
        let expected = "\
# Tetrahedral mesh generated using TetraMaker (c) AGEIA

# 4 vertices
v 0 0 0
v 1 0 0
v 0 1.5 0
v 0 0 -0.25

# 1 tetrahedra
t 0 1 2 3
";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_negative_zero_written_as_zero() {
        let mesh = TetMesh::new(vec![Vec3::new(-0.0, 2.0, -0.0)], Vec::new());
        assert!(format_tet(&mesh).contains("v 0 2 0\n"));
    }

    #[test]
    fn test_shortest_round_trip_floats() {
        let mesh = TetMesh::new(vec![Vec3::new(0.1, 1.0e-3, -2.5)], Vec::new());
        let parsed = parse_tet(&format_tet(&mesh)).unwrap();
        assert_eq!(parsed.vertices, mesh.vertices);
        assert!(format_tet(&mesh).contains("v 0.1 0.001 -2.5\n"));
    }

    #[test]
    fn test_empty_mesh() {
        let text = format_tet(&TetMesh::default());
        assert!(text.contains("# 0 vertices\n"));
        assert!(text.ends_with("# 0 tetrahedra\n"));
    }

    #[test]
    fn test_header_counts_match_records() {
        let mut mesh = sample();
        mesh.tetrahedra.push(Tetrahedron::new(3, 2, 1, 0));
        let text = format_tet(&mesh);

        let v_lines = text.lines().filter(|l| l.starts_with("v ")).count();
        let t_lines = text.lines().filter(|l| l.starts_with("t ")).count();
        assert!(text.contains(&format!("# {} vertices\n", v_lines)));
        assert!(text.contains(&format!("# {} tetrahedra\n", t_lines)));
        assert_eq!(parse_tet(&text).unwrap(), mesh);
    }

    #[test]
    fn test_parse_rejects_count_mismatch() {
        let text = "# 2 vertices\nv 0 0 0\n\n# 0 tetrahedra\n";
        let err = parse_tet(text).unwrap_err();
        assert!(matches!(
            err,
            ExportError::HeaderMismatch {
                section: "vertices",
                declared: 2,
                actual: 1
            }
        ));
    }

    #[test]
    fn test_parse_reports_line_numbers() {
        let text = "# 1 vertices\nv 0 0\n";
        match parse_tet(text) {
            Err(ExportError::Parse { line, .. }) => assert_eq!(line, 2),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_write_tet_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cube.tet");
        write_tet(&path, &sample()).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, format_tet(&sample()));
    }

    #[test]
    fn test_write_tet_unwritable_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("cube.tet");
        assert!(matches!(write_tet(&path, &sample()), Err(ExportError::Io(_))));
    }
}
