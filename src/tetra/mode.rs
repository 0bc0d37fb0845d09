//! Reconstruction modes and how one is chosen for a mesh.

use super::Diagnostic;
use crate::error::{ExportError, Result};
use crate::types::Polygon;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// How polygons are turned into tetrahedra.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TetrahedraMode {
    /// Every four consecutive triangles are the facets of one tetrahedron.
    TriangleFacets,
    /// Every four consecutive quads jointly reference one tetrahedron's corners.
    GroupedQuads,
    /// Each 4-vertex polygon already lists one tetrahedron's corners.
    Direct,
}

impl TetrahedraMode {
    /// Number of tetrahedra a well-formed mesh with `polygon_count` polygons yields.
    pub fn expected_count(&self, polygon_count: usize) -> usize {
        match self {
            TetrahedraMode::TriangleFacets | TetrahedraMode::GroupedQuads => polygon_count / 4,
            TetrahedraMode::Direct => polygon_count,
        }
    }

    /// True for the modes that consume polygons four at a time.
    pub fn is_grouped(&self) -> bool {
        !matches!(self, TetrahedraMode::Direct)
    }

    fn as_str(&self) -> &'static str {
        match self {
            TetrahedraMode::TriangleFacets => "triangle-facets",
            TetrahedraMode::GroupedQuads => "grouped-quads",
            TetrahedraMode::Direct => "direct",
        }
    }
}

impl std::fmt::Display for TetrahedraMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Strategy for picking a [`TetrahedraMode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ModeSelection {
    /// Look at the first polygon only: a triangle selects
    /// [`TetrahedraMode::TriangleFacets`], anything else
    /// [`TetrahedraMode::GroupedQuads`].
    #[default]
    FirstFace,
    /// Like `FirstFace`, but every polygon must have the same arity.
    Uniform,
    /// Always use the given mode.
    Fixed(TetrahedraMode),
}

impl ModeSelection {
    /// Decide the mode for `polygons`.
    ///
    /// Non-fatal findings (mixed arity under `FirstFace`) are returned as
    /// diagnostics; `Uniform` turns the same finding into an error.
    pub fn resolve(&self, polygons: &[Polygon]) -> Result<(TetrahedraMode, Vec<Diagnostic>)> {
        let mut diagnostics = Vec::new();

        let mode = match self {
            ModeSelection::Fixed(mode) => *mode,
            ModeSelection::FirstFace => {
                if let Some((polygon, first, found)) = first_mixed_arity(polygons) {
                    let diag = Diagnostic::MixedArity {
                        first,
                        found,
                        polygon,
                    };
                    warn!("{}", diag);
                    diagnostics.push(diag);
                }
                from_first_face(polygons)
            }
            ModeSelection::Uniform => {
                if let Some((polygon, first, found)) = first_mixed_arity(polygons) {
                    return Err(ExportError::MixedFaceArity {
                        first,
                        found,
                        polygon,
                    });
                }
                from_first_face(polygons)
            }
        };

        debug!(
            "Selected {} mode for {} polygons ({:?})",
            mode,
            polygons.len(),
            self
        );
        Ok((mode, diagnostics))
    }
}

fn from_first_face(polygons: &[Polygon]) -> TetrahedraMode {
    match polygons.first() {
        Some(p) if p.is_triangle() => TetrahedraMode::TriangleFacets,
        _ => TetrahedraMode::GroupedQuads,
    }
}

/// Returns (polygon index, first arity, offending arity) for the first polygon
/// whose arity differs from the first one.
fn first_mixed_arity(polygons: &[Polygon]) -> Option<(usize, usize, usize)> {
    let first = polygons.first()?.arity();
    polygons
        .iter()
        .enumerate()
        .skip(1)
        .find(|(_, p)| p.arity() != first)
        .map(|(i, p)| (i, first, p.arity()))
}

impl std::str::FromStr for ModeSelection {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "first-face" | "auto" => Ok(ModeSelection::FirstFace),
            "uniform" => Ok(ModeSelection::Uniform),
            "triangle-facets" => Ok(ModeSelection::Fixed(TetrahedraMode::TriangleFacets)),
            "grouped-quads" => Ok(ModeSelection::Fixed(TetrahedraMode::GroupedQuads)),
            "direct" => Ok(ModeSelection::Fixed(TetrahedraMode::Direct)),
            other => Err(format!("Unknown tetrahedra mode '{}'", other)),
        }
    }
}

impl std::fmt::Display for ModeSelection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModeSelection::FirstFace => f.write_str("first-face"),
            ModeSelection::Uniform => f.write_str("uniform"),
            ModeSelection::Fixed(mode) => write!(f, "{}", mode),
        }
    }
}

impl TryFrom<String> for ModeSelection {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ModeSelection> for String {
    fn from(value: ModeSelection) -> Self {
        value.to_string()
    }
}
