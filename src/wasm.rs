//! WASM bindings for tet-exporter.
//!
//! This module provides JavaScript-friendly APIs for use in the browser.

use crate::{MeshSource, SimulatorType};
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn init() {
    // Set up better panic messages in the browser console
    console_error_panic_hook::set_once();
}

/// Export options.
#[wasm_bindgen]
pub struct ExportOptions {
    mode: crate::ModeSelection,
    object: Option<String>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl ExportOptions {
    #[wasm_bindgen(constructor)]
    pub fn new() -> ExportOptions {
        ExportOptions {
            mode: crate::ModeSelection::FirstFace,
            object: None,
        }
    }

    /// Tetrahedra mode, e.g. "first-face", "uniform" or "direct".
    pub fn set_mode(&mut self, value: &str) -> Result<(), JsError> {
        self.mode = value.parse().map_err(|e: String| JsError::new(&e))?;
        Ok(())
    }

    /// Export this object instead of the active one.
    #[wasm_bindgen(setter)]
    pub fn set_object(&mut self, value: String) {
        self.object = Some(value);
    }
}

/// Tet export result containing the file text.
#[wasm_bindgen]
pub struct TetResult {
    text: String,
    vertex_count: usize,
    tetrahedron_count: usize,
    diagnostics: Vec<String>,
}

#[wasm_bindgen]
impl TetResult {
    /// Get the .tet file contents.
    #[wasm_bindgen(getter)]
    pub fn text(&self) -> String {
        self.text.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    #[wasm_bindgen(getter)]
    pub fn tetrahedron_count(&self) -> usize {
        self.tetrahedron_count
    }

    /// Warnings raised while rebuilding tetrahedra, one message each.
    #[wasm_bindgen(getter)]
    pub fn diagnostics(&self) -> Vec<String> {
        self.diagnostics.clone()
    }
}

/// Export one object of a JSON scene and return the .tet text.
///
/// JSON format:
/// ```json
/// {
///   "objects": [
///     { "name": "Liver", "location": [0, 0, 0],
///       "vertices": [[0, 0, 0], [1, 0, 0], [0, 1, 0], [0, 0, 1]],
///       "polygons": [[0, 1, 2], [0, 1, 3], [0, 2, 3], [1, 2, 3]] }
///   ]
/// }
/// ```
#[wasm_bindgen]
pub fn export_tet_json(
    json: &str,
    simulator: &str,
    options: Option<ExportOptions>,
) -> Result<TetResult, JsError> {
    let simulator: SimulatorType = simulator.parse().map_err(|e: String| JsError::new(&e))?;
    let options = options.unwrap_or_default();

    let scene = crate::load_scene_from_json(json)
        .map_err(|e| JsError::new(&format!("Invalid JSON: {}", e)))?;

    let object = match &options.object {
        Some(name) => scene.object(name),
        None => scene.active_object(),
    }
    .ok_or_else(|| JsError::new(&crate::ExportError::NoActiveSelection.to_string()))?;

    let request = crate::ExportRequest::from_object(object, object.name.clone(), simulator)
        .map_err(|e| JsError::new(&e.to_string()))?;
    let config = crate::ExportConfig::default().with_mode(options.mode);
    let prepared = crate::build_tet_mesh(&request, &config)
        .map_err(|e| JsError::new(&e.to_string()))?;

    Ok(TetResult {
        text: crate::format_tet(&prepared.mesh),
        vertex_count: prepared.mesh.vertex_count(),
        tetrahedron_count: prepared.mesh.tetrahedron_count(),
        diagnostics: prepared.diagnostics.iter().map(|d| d.to_string()).collect(),
    })
}
