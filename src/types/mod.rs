//! Shared types used throughout the library.

mod simulator;

pub use simulator::SimulatorType;

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// A polygon as an ordered list of vertex indices (3 or 4 entries).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Polygon(pub Vec<u32>);

impl Polygon {
    pub fn new(indices: impl Into<Vec<u32>>) -> Self {
        Self(indices.into())
    }

    /// Vertex indices in winding order.
    pub fn indices(&self) -> &[u32] {
        &self.0
    }

    /// Number of corners.
    pub fn arity(&self) -> usize {
        self.0.len()
    }

    pub fn is_triangle(&self) -> bool {
        self.0.len() == 3
    }
}

impl From<Vec<u32>> for Polygon {
    fn from(indices: Vec<u32>) -> Self {
        Self(indices)
    }
}

impl<const N: usize> From<[u32; N]> for Polygon {
    fn from(indices: [u32; N]) -> Self {
        Self(indices.to_vec())
    }
}

/// An axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min: [f32; 3],
    pub max: [f32; 3],
}

impl BoundingBox {
    pub fn new(min: [f32; 3], max: [f32; 3]) -> Self {
        Self { min, max }
    }

    pub fn from_points(points: impl Iterator<Item = Vec3>) -> Option<Self> {
        let mut min = Vec3::splat(f32::MAX);
        let mut max = Vec3::splat(f32::MIN);
        let mut has_points = false;

        for p in points {
            has_points = true;
            min = min.min(p);
            max = max.max(p);
        }

        if has_points {
            Some(Self {
                min: min.to_array(),
                max: max.to_array(),
            })
        } else {
            None
        }
    }

    pub fn dimensions(&self) -> [f32; 3] {
        [
            self.max[0] - self.min[0],
            self.max[1] - self.min[1],
            self.max[2] - self.min[2],
        ]
    }
}
