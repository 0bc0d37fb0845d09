//! Tetrahedron reconstruction from polygon lists.
//!
//! Tetrahedral meshes arrive as surface polygons: either every tetrahedron
//! contributes four consecutive faces (triangles or quads) or, in direct mode,
//! every polygon is one tetrahedron. This module recovers the four corner
//! indices of each cell.

mod mode;

pub use mode::{ModeSelection, TetrahedraMode};

use crate::types::Polygon;
use tracing::{debug, warn};

/// Polygons consumed per tetrahedron in the grouped modes.
pub const GROUP_SIZE: usize = 4;

/// One tetrahedral cell: four distinct vertex indices in discovery order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tetrahedron(pub [u32; 4]);

impl Tetrahedron {
    pub fn new(i0: u32, i1: u32, i2: u32, i3: u32) -> Self {
        Self([i0, i1, i2, i3])
    }

    pub fn indices(&self) -> [u32; 4] {
        self.0
    }

    /// Largest referenced vertex index.
    pub fn max_index(&self) -> u32 {
        self.0.iter().copied().max().unwrap_or(0)
    }

    /// Build from the first four entries of an already deduplicated list.
    fn from_unique(unique: &[u32]) -> Option<Self> {
        match unique {
            [a, b, c, d, ..] => Some(Self::new(*a, *b, *c, *d)),
            _ => None,
        }
    }
}

/// Non-fatal problem found while reconstructing or exporting a mesh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A group (or direct polygon) had fewer than four distinct indices; no
    /// tetrahedron was emitted for it.
    DegenerateGroup { group: usize, unique: Vec<u32> },
    /// A group referenced more than four distinct indices; only the first four
    /// were kept.
    ExcessIndices { group: usize, unique: usize },
    /// The mesh mixes face arities; mode was still chosen from the first face.
    MixedArity {
        first: usize,
        found: usize,
        polygon: usize,
    },
    /// Trailing polygons that did not fill a whole group were dropped.
    TrailingPolygons { count: usize },
    /// A tetrahedron referenced a vertex past the end of the vertex list and
    /// was dropped.
    IndexOutOfRange {
        tetrahedron: usize,
        index: u32,
        vertex_count: usize,
    },
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Diagnostic::DegenerateGroup { group, unique } => write!(
                f,
                "group {} has only {} unique vertices {:?}, skipped",
                group,
                unique.len(),
                unique
            ),
            Diagnostic::ExcessIndices { group, unique } => write!(
                f,
                "group {} references {} unique vertices, keeping the first 4",
                group, unique
            ),
            Diagnostic::MixedArity {
                first,
                found,
                polygon,
            } => write!(
                f,
                "polygon {} has {} vertices but the first polygon has {}",
                polygon, found, first
            ),
            Diagnostic::TrailingPolygons { count } => {
                write!(f, "{} trailing polygons do not form a full group, dropped", count)
            }
            Diagnostic::IndexOutOfRange {
                tetrahedron,
                index,
                vertex_count,
            } => write!(
                f,
                "tetrahedron {} references vertex {} but the mesh has {} vertices, dropped",
                tetrahedron, index, vertex_count
            ),
        }
    }
}

/// Result of reconstructing tetrahedra from one polygon list.
#[derive(Debug, Clone, PartialEq)]
pub struct TetrahedraBuild {
    /// Mode the polygons were interpreted with.
    pub mode: TetrahedraMode,
    /// Number of input polygons.
    pub polygon_count: usize,
    /// Reconstructed cells, in polygon order.
    pub tetrahedra: Vec<Tetrahedron>,
    /// Problems encountered along the way.
    pub diagnostics: Vec<Diagnostic>,
}

impl TetrahedraBuild {
    fn empty(mode: TetrahedraMode, polygon_count: usize) -> Self {
        Self {
            mode,
            polygon_count,
            tetrahedra: Vec::with_capacity(mode.expected_count(polygon_count)),
            diagnostics: Vec::new(),
        }
    }

    /// Count a well-formed input would have produced.
    pub fn expected_count(&self) -> usize {
        self.mode.expected_count(self.polygon_count)
    }

    /// True when every group produced a tetrahedron.
    pub fn is_complete(&self) -> bool {
        self.tetrahedra.len() == self.expected_count()
    }

    fn report(&mut self, diagnostic: Diagnostic) {
        warn!("{}", diagnostic);
        self.diagnostics.push(diagnostic);
    }

    fn push_unique(&mut self, group: usize, unique: Vec<u32>) {
        if unique.len() > 4 {
            self.report(Diagnostic::ExcessIndices {
                group,
                unique: unique.len(),
            });
        }
        match Tetrahedron::from_unique(&unique) {
            Some(tet) => self.tetrahedra.push(tet),
            None => self.report(Diagnostic::DegenerateGroup { group, unique }),
        }
    }
}

/// Reconstruct tetrahedra from `polygons` using `mode`.
///
/// A group (or, in direct mode, a polygon) with fewer than four distinct
/// indices yields no tetrahedron and a [`Diagnostic::DegenerateGroup`], so
/// degenerate input produces fewer cells than [`TetrahedraBuild::expected_count`].
pub fn build_tetrahedra(polygons: &[Polygon], mode: TetrahedraMode) -> TetrahedraBuild {
    let build = TetrahedraBuild::empty(mode, polygons.len());

    match mode {
        TetrahedraMode::TriangleFacets | TetrahedraMode::GroupedQuads => {
            let groups = polygons.chunks_exact(GROUP_SIZE);
            let trailing = groups.remainder().len();

            let mut build = groups.enumerate().fold(build, |mut build, (group, chunk)| {
                let unique = unify(chunk);
                debug!("group {}: unified {:?}", group, unique);
                build.push_unique(group, unique);
                build
            });

            if trailing > 0 {
                build.report(Diagnostic::TrailingPolygons { count: trailing });
            }
            build
        }
        TetrahedraMode::Direct => {
            polygons
                .iter()
                .enumerate()
                .fold(build, |mut build, (index, polygon)| {
                    build.push_unique(index, unify(std::slice::from_ref(polygon)));
                    build
                })
        }
    }
}

/// Collect the vertex indices of `polygons`, keeping the first occurrence of
/// each in order.
pub fn unify(polygons: &[Polygon]) -> Vec<u32> {
    let mut unique = Vec::with_capacity(GROUP_SIZE * 2);
    for &index in polygons.iter().flat_map(|p| p.indices()) {
        if !unique.contains(&index) {
            unique.push(index);
        }
    }
    unique
}

#[cfg(test)]
mod tests {
    use super::*;

    fn polys(lists: &[&[u32]]) -> Vec<Polygon> {
        lists.iter().map(|l| Polygon::new(l.to_vec())).collect()
    }

    #[test]
    fn test_unify_preserves_first_seen_order() {
        let group = polys(&[&[0, 1, 2, 3], &[0, 1, 4, 5], &[0, 2, 4, 6], &[1, 3, 5, 7]]);
        assert_eq!(unify(&group), vec![0, 1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn test_grouped_quads_two_groups() {
        let polygons = polys(&[
            &[0, 1, 2, 3],
            &[0, 1, 4, 5],
            &[0, 2, 4, 6],
            &[1, 3, 5, 7],
            &[4, 5, 6, 7],
            &[4, 5, 8, 9],
            &[5, 6, 8, 9],
            &[4, 6, 7, 9],
        ]);
        let build = build_tetrahedra(&polygons, TetrahedraMode::GroupedQuads);

        assert_eq!(
            build.tetrahedra,
            vec![Tetrahedron::new(0, 1, 2, 3), Tetrahedron::new(4, 5, 6, 7)]
        );
        assert!(build.is_complete());
    }

    #[test]
    fn test_triangle_facets_of_one_tetrahedron() {
        // Four faces of the tetrahedron (3, 1, 2, 0)
        let polygons = polys(&[&[3, 1, 2], &[3, 0, 1], &[3, 2, 0], &[0, 2, 1]]);
        let build = build_tetrahedra(&polygons, TetrahedraMode::TriangleFacets);

        assert_eq!(build.tetrahedra, vec![Tetrahedron::new(3, 1, 2, 0)]);
        assert!(build.diagnostics.is_empty());
    }

    #[test]
    fn test_twelve_triangles_make_three_tetrahedra() {
        let mut polygons = Vec::new();
        for t in 0..3u32 {
            let b = t * 4;
            polygons.extend(polys(&[
                &[b, b + 1, b + 2],
                &[b, b + 1, b + 3],
                &[b, b + 2, b + 3],
                &[b + 1, b + 2, b + 3],
            ]));
        }
        let build = build_tetrahedra(&polygons, TetrahedraMode::TriangleFacets);

        assert_eq!(build.expected_count(), 3);
        assert_eq!(build.tetrahedra.len(), 3);
        assert_eq!(build.tetrahedra[2], Tetrahedron::new(8, 9, 10, 11));
    }

    #[test]
    fn test_every_group_of_4k_polygons_yields_k_tetrahedra() {
        for k in 0..6u32 {
            let polygons: Vec<Polygon> = (0..k * 4)
                .map(|i| Polygon::from([i, i + 1, i + 2, i + 3]))
                .collect();
            let build = build_tetrahedra(&polygons, TetrahedraMode::GroupedQuads);
            assert_eq!(build.tetrahedra.len(), k as usize);

            for (group, tet) in build.tetrahedra.iter().enumerate() {
                let start = group * GROUP_SIZE;
                let expected = unify(&polygons[start..start + GROUP_SIZE]);
                assert_eq!(tet.indices().to_vec(), expected[..4].to_vec());
            }
        }
    }

    #[test]
    fn test_partial_group_is_dropped() {
        let polygons = polys(&[
            &[0, 1, 2, 3],
            &[0, 1, 3],
            &[1, 2, 3],
            &[0, 2, 3],
            &[4, 5, 6, 7],
            &[4, 5, 6],
        ]);
        let build = build_tetrahedra(&polygons, TetrahedraMode::GroupedQuads);

        assert_eq!(build.tetrahedra, vec![Tetrahedron::new(0, 1, 2, 3)]);
        assert_eq!(build.expected_count(), 1);
        assert_eq!(build.diagnostics, vec![Diagnostic::TrailingPolygons { count: 2 }]);
    }

    #[test]
    fn test_degenerate_group_is_skipped() {
        let polygons = polys(&[&[0, 1, 2], &[0, 1, 2], &[2, 1, 0], &[1, 2, 0]]);
        let build = build_tetrahedra(&polygons, TetrahedraMode::TriangleFacets);

        assert!(build.tetrahedra.is_empty());
        assert!(!build.is_complete());
        assert_eq!(
            build.diagnostics,
            vec![Diagnostic::DegenerateGroup {
                group: 0,
                unique: vec![0, 1, 2]
            }]
        );
    }

    #[test]
    fn test_excess_indices_keep_first_four() {
        let polygons = polys(&[&[9, 8, 7, 6], &[5, 4, 3, 2], &[9, 5, 1, 0], &[8, 4, 1, 0]]);
        let build = build_tetrahedra(&polygons, TetrahedraMode::GroupedQuads);

        assert_eq!(build.tetrahedra, vec![Tetrahedron::new(9, 8, 7, 6)]);
        assert_eq!(
            build.diagnostics,
            vec![Diagnostic::ExcessIndices { group: 0, unique: 10 }]
        );
    }

    #[test]
    fn test_direct_mode_one_tetrahedron_per_polygon() {
        let polygons = polys(&[&[0, 1, 2, 3], &[4, 5, 6, 7], &[1, 1, 2, 3]]);
        let build = build_tetrahedra(&polygons, TetrahedraMode::Direct);

        assert_eq!(
            build.tetrahedra,
            vec![Tetrahedron::new(0, 1, 2, 3), Tetrahedron::new(4, 5, 6, 7)]
        );
        assert_eq!(build.expected_count(), 3);
        assert_eq!(
            build.diagnostics,
            vec![Diagnostic::DegenerateGroup {
                group: 2,
                unique: vec![1, 2, 3]
            }]
        );
    }

    #[test]
    fn test_empty_input() {
        let build = build_tetrahedra(&[], TetrahedraMode::GroupedQuads);
        assert!(build.tetrahedra.is_empty());
        assert!(build.diagnostics.is_empty());
        assert!(build.is_complete());
    }

    #[test]
    fn test_max_index() {
        assert_eq!(Tetrahedron::new(3, 9, 1, 4).max_index(), 9);
    }
}
