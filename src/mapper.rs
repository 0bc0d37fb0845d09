//! Coordinate mapping from object space into a simulator's frame.
//!
//! Vertices are offset by the object's origin only. Object rotation and scale
//! are not applied.

use crate::types::SimulatorType;
use glam::Vec3;

/// Map one object-local vertex into the target simulator's coordinates.
pub fn map_vertex(local: Vec3, origin: Vec3, simulator: SimulatorType) -> Vec3 {
    simulator.remap(local + origin)
}

/// Map every vertex of an object, preserving order.
pub fn map_vertices(vertices: &[Vec3], origin: Vec3, simulator: SimulatorType) -> Vec<Vec3> {
    vertices
        .iter()
        .map(|&v| map_vertex(v, origin, simulator))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn samples() -> Vec<Vec3> {
        vec![
            Vec3::ZERO,
            Vec3::new(1.0, 2.0, 3.0),
            Vec3::new(-0.5, 0.25, -4.0),
            Vec3::new(100.0, -7.5, 0.125),
        ]
    }

    #[test]
    fn test_arthros_adds_origin() {
        let origin = Vec3::new(10.0, -2.0, 0.5);
        for v in samples() {
            assert_eq!(map_vertex(v, origin, SimulatorType::Arthros), v + origin);
        }
    }

    #[test]
    fn test_hystsim_remaps_after_origin() {
        let origin = Vec3::new(10.0, -2.0, 0.5);
        for v in samples() {
            let expected = Vec3::new(v.x + origin.x, v.z + origin.z, -(v.y + origin.y));
            assert_eq!(map_vertex(v, origin, SimulatorType::Hystsim), expected);
        }
    }

    #[test]
    fn test_map_vertices_keeps_order() {
        let verts = samples();
        let mapped = map_vertices(&verts, Vec3::ZERO, SimulatorType::Hystsim);
        assert_eq!(mapped.len(), verts.len());
        assert_eq!(mapped[1], Vec3::new(1.0, 3.0, -2.0));
        assert_eq!(mapped[2], Vec3::new(-0.5, -4.0, -0.25));
    }
}
