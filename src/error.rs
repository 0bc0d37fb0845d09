//! Error types for the tet exporter.

use thiserror::Error;

/// Result type alias using ExportError.
pub type Result<T> = std::result::Result<T, ExportError>;

/// Main error type for tetrahedral mesh export.
#[derive(Error, Debug)]
pub enum ExportError {
    /// I/O error while reading input or writing a .tet file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse a JSON scene description.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Syntax error in a text input (OBJ or .tet).
    #[error("Parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    /// The object handed to the exporter cannot be exported (e.g. not a mesh).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Nothing is selected, or there is no active object.
    #[error("No active object to export")]
    NoActiveSelection,

    /// Faces of differing arity where a uniform mesh was required.
    #[error("Polygon {polygon} has {found} vertices, expected {first} like the first polygon")]
    MixedFaceArity {
        first: usize,
        found: usize,
        polygon: usize,
    },

    /// A .tet header count disagrees with the records that follow it.
    #[error("Header declares {declared} {section} but the body has {actual}")]
    HeaderMismatch {
        section: &'static str,
        declared: usize,
        actual: usize,
    },
}

impl ExportError {
    pub(crate) fn parse(line: usize, message: impl Into<String>) -> Self {
        ExportError::Parse {
            line,
            message: message.into(),
        }
    }
}
