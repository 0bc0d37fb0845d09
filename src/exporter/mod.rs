//! The export pipeline: map coordinates, rebuild tetrahedra, write the file.

mod selection;

pub use selection::{export_selection, object_destination, ExportReport, SkippedObject};

use crate::error::{ExportError, Result};
use crate::export::tet::{write_tet, TetMesh, TET_EXTENSION};
use crate::mapper::map_vertices;
use crate::scene::SceneObject;
use crate::tetra::{build_tetrahedra, Diagnostic, ModeSelection, TetrahedraMode};
use crate::types::{Polygon, SimulatorType};
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Export configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// How the tetrahedra reconstruction mode is chosen.
    pub mode: ModeSelection,
    /// Appended after the object name when several objects are exported.
    pub extension: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            mode: ModeSelection::FirstFace,
            extension: TET_EXTENSION.to_string(),
        }
    }
}

impl ExportConfig {
    pub fn with_mode(mut self, mode: ModeSelection) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }
}

/// Everything needed to export one object.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportRequest {
    pub object_name: String,
    /// World-space origin added to every vertex.
    pub world_origin: Vec3,
    pub simulator: SimulatorType,
    pub destination: PathBuf,
    /// Object-local vertex positions.
    pub vertices: Vec<Vec3>,
    pub polygons: Vec<Polygon>,
}

impl ExportRequest {
    pub fn new(
        object_name: impl Into<String>,
        destination: impl Into<PathBuf>,
        simulator: SimulatorType,
    ) -> Self {
        Self {
            object_name: object_name.into(),
            world_origin: Vec3::ZERO,
            simulator,
            destination: destination.into(),
            vertices: Vec::new(),
            polygons: Vec::new(),
        }
    }

    pub fn with_origin(mut self, origin: Vec3) -> Self {
        self.world_origin = origin;
        self
    }

    pub fn with_geometry(mut self, vertices: Vec<Vec3>, polygons: Vec<Polygon>) -> Self {
        self.vertices = vertices;
        self.polygons = polygons;
        self
    }

    /// Build a request from a scene object. Fails for non-mesh objects.
    pub fn from_object(
        object: &SceneObject,
        destination: impl Into<PathBuf>,
        simulator: SimulatorType,
    ) -> Result<Self> {
        if !object.is_mesh() {
            return Err(ExportError::InvalidInput(format!(
                "'{}' is not a mesh object ({})",
                object.name, object.kind
            )));
        }
        Ok(Self::new(object.name.clone(), destination, simulator)
            .with_origin(object.origin())
            .with_geometry(object.positions(), object.polygons.clone()))
    }
}

/// A mesh ready to be written, plus what was learned building it.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedExport {
    pub mesh: TetMesh,
    pub mode: TetrahedraMode,
    /// Count a well-formed input would have produced.
    pub expected_tetrahedra: usize,
    pub diagnostics: Vec<Diagnostic>,
}

/// Outcome of exporting one object.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectReport {
    pub object_name: String,
    pub path: PathBuf,
    pub simulator: SimulatorType,
    pub mode: TetrahedraMode,
    pub vertex_count: usize,
    pub tetrahedron_count: usize,
    pub expected_tetrahedra: usize,
    pub diagnostics: Vec<Diagnostic>,
}

/// Run the pipeline for `request` without touching the filesystem.
pub fn build_tet_mesh(request: &ExportRequest, config: &ExportConfig) -> Result<PreparedExport> {
    prepare(request, request.simulator, config)
}

fn prepare(
    request: &ExportRequest,
    simulator: SimulatorType,
    config: &ExportConfig,
) -> Result<PreparedExport> {
    let (mode, mut diagnostics) = config.mode.resolve(&request.polygons)?;
    debug!(
        "{}: {} vertices, {} polygons, {} mode",
        request.object_name,
        request.vertices.len(),
        request.polygons.len(),
        mode
    );

    let vertices = map_vertices(&request.vertices, request.world_origin, simulator);
    let build = build_tetrahedra(&request.polygons, mode);
    let expected_tetrahedra = build.expected_count();
    diagnostics.extend(build.diagnostics);

    let vertex_count = vertices.len();
    let mut tetrahedra = Vec::with_capacity(build.tetrahedra.len());
    for (index, tet) in build.tetrahedra.into_iter().enumerate() {
        let max = tet.max_index();
        if max as usize >= vertex_count {
            let diag = Diagnostic::IndexOutOfRange {
                tetrahedron: index,
                index: max,
                vertex_count,
            };
            warn!("{}: {}", request.object_name, diag);
            diagnostics.push(diag);
        } else {
            tetrahedra.push(tet);
        }
    }

    Ok(PreparedExport {
        mesh: TetMesh::new(vertices, tetrahedra),
        mode,
        expected_tetrahedra,
        diagnostics,
    })
}

fn export_as(
    request: &ExportRequest,
    simulator: SimulatorType,
    config: &ExportConfig,
) -> Result<ObjectReport> {
    let prepared = prepare(request, simulator, config)?;
    write_to(&request.destination, &request.object_name, simulator, prepared)
}

fn write_to(
    path: &Path,
    object_name: &str,
    simulator: SimulatorType,
    prepared: PreparedExport,
) -> Result<ObjectReport> {
    info!("Saving {} to {:?}", object_name, path);
    write_tet(path, &prepared.mesh)?;
    info!(
        "Exported {} for {}: {} vertices, {} tetrahedra ({} mode)",
        object_name,
        simulator.name(),
        prepared.mesh.vertex_count(),
        prepared.mesh.tetrahedron_count(),
        prepared.mode
    );

    Ok(ObjectReport {
        object_name: object_name.to_string(),
        path: path.to_path_buf(),
        simulator,
        mode: prepared.mode,
        vertex_count: prepared.mesh.vertex_count(),
        tetrahedron_count: prepared.mesh.tetrahedron_count(),
        expected_tetrahedra: prepared.expected_tetrahedra,
        diagnostics: prepared.diagnostics,
    })
}

/// Export one object to `request.destination` for `request.simulator`.
pub fn export_request(request: &ExportRequest, config: &ExportConfig) -> Result<ObjectReport> {
    export_as(request, request.simulator, config)
}

/// Export one object in the Arthros convention, whatever `request.simulator` says.
pub fn export_arthros(request: &ExportRequest, config: &ExportConfig) -> Result<ObjectReport> {
    export_as(request, SimulatorType::Arthros, config)
}

/// Export one object in the Hystsim convention, whatever `request.simulator` says.
pub fn export_hystsim(request: &ExportRequest, config: &ExportConfig) -> Result<ObjectReport> {
    export_as(request, SimulatorType::Hystsim, config)
}
