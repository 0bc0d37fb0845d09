//! # Tet Exporter
//!
//! A Rust library for exporting tetrahedral meshes to the TetraMaker `.tet`
//! format read by the Arthros and Hystsim simulators.
//!
//! ## Overview
//!
//! Each object goes through the same pipeline:
//!
//! 1. vertices are offset by the object's origin and remapped into the
//!    simulator's axis convention ([`mapper`]);
//! 2. tetrahedra are rebuilt from the polygon list, four faces per cell
//!    ([`tetra`]);
//! 3. the result is written as `.tet` text ([`export::tet`]).
//!
//! ## Quick Start
//!
//! ```ignore
//! use tet_exporter::{load_scene, export_selection, ExportConfig, SimulatorType};
//!
//! // Load selected objects from a JSON scene or an OBJ file
//! let scene = load_scene("liver.obj")?;
//!
//! // One object writes to the path as given, several get `<name>.tet` appended
//! let report = export_selection(&scene, "liver.tet", SimulatorType::Hystsim, &ExportConfig::default())?;
//! ```
//!
//! ## Library Integration
//!
//! Hosts with their own object storage can implement [`MeshSource`], or build
//! an [`ExportRequest`] per object directly:
//!
//! ```ignore
//! use tet_exporter::{export_arthros, ExportConfig, ExportRequest, SimulatorType};
//!
//! let request = ExportRequest::new("Knee", "knee.tet", SimulatorType::Arthros)
//!     .with_origin(origin)
//!     .with_geometry(vertices, polygons);
//! let report = export_arthros(&request, &ExportConfig::default())?;
//! ```

pub mod error;
pub mod types;
pub mod scene;
pub mod mapper;
pub mod tetra;
pub mod export;
pub mod exporter;

// Re-export main types for convenience
pub use error::{ExportError, Result};
pub use types::{BoundingBox, Polygon, SimulatorType};
pub use scene::{load_obj, MeshSource, ObjectKind, Scene, SceneObject};
pub use mapper::{map_vertex, map_vertices};
pub use tetra::{build_tetrahedra, Diagnostic, ModeSelection, TetrahedraBuild, TetrahedraMode, Tetrahedron};
pub use export::tet::{format_tet, parse_tet, write_tet, TetMesh};
pub use exporter::{
    build_tet_mesh, export_arthros, export_hystsim, export_request, export_selection,
    ExportConfig, ExportReport, ExportRequest, ObjectReport, PreparedExport, SkippedObject,
};

/// Load a scene from a file path (`.obj`, otherwise JSON).
pub fn load_scene<P: AsRef<std::path::Path>>(path: P) -> Result<Scene> {
    scene::load_scene(path)
}

/// Parse a scene from a JSON string (for WASM compatibility).
pub fn load_scene_from_json(json: &str) -> Result<Scene> {
    scene::scene_from_json(json)
}

#[cfg(feature = "wasm")]
pub mod wasm;
