//! Simulator targets and their axis conventions.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Downstream simulator a .tet file is written for.
///
/// The two simulators read the same file format but disagree on which axis
/// points up, so each one selects its own remap of world coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SimulatorType {
    /// Keeps the source's Z-up axes.
    #[default]
    Arthros,
    /// Y-up: writes (x, z, -y).
    Hystsim,
}

impl SimulatorType {
    /// Both simulators in declaration order.
    pub const ALL: [SimulatorType; 2] = [SimulatorType::Arthros, SimulatorType::Hystsim];

    /// Apply this simulator's axis convention to a world-space position.
    pub fn remap(&self, world: Vec3) -> Vec3 {
        match self {
            SimulatorType::Arthros => world,
            SimulatorType::Hystsim => Vec3::new(world.x, world.z, -world.y),
        }
    }

    /// Display name as used in log output.
    pub fn name(&self) -> &'static str {
        match self {
            SimulatorType::Arthros => "Arthros",
            SimulatorType::Hystsim => "Hystsim",
        }
    }
}

impl std::str::FromStr for SimulatorType {
    type Err = String;

    /// Parse from string (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "arthros" => Ok(SimulatorType::Arthros),
            "hystsim" => Ok(SimulatorType::Hystsim),
            other => Err(format!(
                "Unknown simulator '{}'. Expected 'arthros' or 'hystsim'",
                other
            )),
        }
    }
}

impl std::fmt::Display for SimulatorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SimulatorType::Arthros => write!(f, "arthros"),
            SimulatorType::Hystsim => write!(f, "hystsim"),
        }
    }
}
