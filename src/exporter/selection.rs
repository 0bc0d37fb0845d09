//! Exporting every selected object of a mesh source.

use super::{export_request, ExportConfig, ExportRequest, ObjectReport};
use crate::error::{ExportError, Result};
use crate::scene::MeshSource;
use crate::types::SimulatorType;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// An object left out of a selection export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedObject {
    pub name: String,
    pub reason: String,
}

/// Outcome of a selection export.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExportReport {
    /// Objects written, in selection order.
    pub objects: Vec<ObjectReport>,
    /// Objects left out, with the reason.
    pub skipped: Vec<SkippedObject>,
}

impl ExportReport {
    pub fn files_written(&self) -> usize {
        self.objects.len()
    }

    pub fn diagnostic_count(&self) -> usize {
        self.objects.iter().map(|o| o.diagnostics.len()).sum()
    }
}

/// Destination for one object of a multi-object export: the object name and
/// extension are appended to the path as given (`out/` + `Knee` + `.tet`).
pub fn object_destination(destination: &Path, object_name: &str, extension: &str) -> PathBuf {
    let mut path = OsString::from(destination.as_os_str());
    path.push(object_name);
    path.push(extension);
    PathBuf::from(path)
}

/// Export every selected object of `source`.
///
/// With one selected object the file goes to `destination` unchanged; with
/// more, each object gets its own file named by [`object_destination`].
/// Non-mesh objects, and objects whose export fails for any reason other than
/// I/O, are skipped with a warning. An I/O error stops the export; files
/// already written stay on disk.
pub fn export_selection<S: MeshSource + ?Sized>(
    source: &S,
    destination: impl AsRef<Path>,
    simulator: SimulatorType,
    config: &ExportConfig,
) -> Result<ExportReport> {
    let destination = destination.as_ref();

    if source.active_object().is_none() {
        warn!("No active object");
        return Err(ExportError::NoActiveSelection);
    }

    let selected: Vec<_> = source.selected_objects().collect();
    if selected.is_empty() {
        warn!("Nothing selected");
        return Err(ExportError::NoActiveSelection);
    }

    let multiple = selected.len() > 1;
    let mut report = ExportReport::default();

    for object in selected {
        if !object.is_mesh() {
            warn!("{} is not a mesh object, skipping", object.name);
            report.skipped.push(SkippedObject {
                name: object.name.clone(),
                reason: format!("not a mesh ({})", object.kind),
            });
            continue;
        }

        let path = if multiple {
            object_destination(destination, &object.name, &config.extension)
        } else {
            destination.to_path_buf()
        };

        let exported = ExportRequest::from_object(object, path, simulator)
            .and_then(|request| export_request(&request, config));
        match exported {
            Ok(object_report) => report.objects.push(object_report),
            Err(err @ ExportError::Io(_)) => return Err(err),
            Err(err) => {
                warn!("{} could not be exported, skipping: {}", object.name, err);
                report.skipped.push(SkippedObject {
                    name: object.name.clone(),
                    reason: err.to_string(),
                });
            }
        }
    }

    info!(
        "Exported {} object(s) for {}, skipped {}",
        report.files_written(),
        simulator.name(),
        report.skipped.len()
    );
    Ok(report)
}
