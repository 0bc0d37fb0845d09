//! Mesh export formats.

pub mod tet;

pub use tet::{format_tet, parse_tet, write_tet, write_tet_to, TetMesh};
