//! Simulation configuration

use serde::{Deserialize, Serialize};

/// Physics world configuration
///
/// The defaults are the service's fixed parameters: a downward gravity of
/// 980 units along -Z, a 60 Hz tick, and a deterministic solver tuned for
/// stacks of bouncing spheres.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Gravity vector (default: -980 in Z)
    pub gravity: [f32; 3],

    /// Fixed timestep for one simulation tick
    pub timestep: f32,

    /// Solver iterations for velocity
    pub velocity_iterations: usize,

    /// Solver iterations for position
    pub position_iterations: usize,

    /// Enable sleeping for inactive bodies
    pub sleeping_enabled: bool,

    /// Seconds of inactivity before a body may sleep
    pub time_before_sleep: f32,

    /// Point velocity threshold below which a body counts as inactive
    pub sleep_velocity_threshold: f32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            gravity: [0.0, 0.0, -980.0],
            timestep: 1.0 / 60.0,
            velocity_iterations: 10,
            position_iterations: 2,
            sleeping_enabled: true,
            time_before_sleep: 0.5,
            sleep_velocity_threshold: 0.03,
        }
    }
}

impl SimulationConfig {
    /// Set gravity
    pub fn with_gravity(mut self, x: f32, y: f32, z: f32) -> Self {
        self.gravity = [x, y, z];
        self
    }

    /// Set timestep
    pub fn with_timestep(mut self, timestep: f32) -> Self {
        self.timestep = timestep;
        self
    }

    /// Set solver iteration counts
    pub fn with_solver_iterations(mut self, velocity: usize, position: usize) -> Self {
        self.velocity_iterations = velocity;
        self.position_iterations = position;
        self
    }
}
