//! Physics world - scoped simulation container

use crate::body::{BodyDesc, BodyHandle};
use crate::config::SimulationConfig;
use crate::error::{PhysicsError, Result};
use rapier3d::prelude as rapier;
use std::num::NonZeroUsize;

/// The physics world containing all engine state for one simulation.
///
/// Created on Init and dropped on Clear; dropping releases every body,
/// collider, and solver resource in one move.
pub struct PhysicsWorld {
    /// Configuration
    config: SimulationConfig,

    /// Rapier physics pipeline
    pipeline: rapier::PhysicsPipeline,

    /// Gravity
    gravity: rapier::Vector<f32>,

    /// Integration parameters
    integration_params: rapier::IntegrationParameters,

    /// Island manager
    islands: rapier::IslandManager,

    /// Broad phase
    broad_phase: rapier::DefaultBroadPhase,

    /// Narrow phase
    narrow_phase: rapier::NarrowPhase,

    /// Impulse joint set
    impulse_joints: rapier::ImpulseJointSet,

    /// Multibody joint set
    multibody_joints: rapier::MultibodyJointSet,

    /// CCD solver
    ccd_solver: rapier::CCDSolver,

    /// Rigid body set
    bodies: rapier::RigidBodySet,

    /// Collider set
    colliders: rapier::ColliderSet,
}

impl PhysicsWorld {
    /// Create a new physics world
    pub fn new(config: SimulationConfig) -> Self {
        let gravity = rapier::Vector::new(config.gravity[0], config.gravity[1], config.gravity[2]);

        let mut integration_params = rapier::IntegrationParameters::default();
        integration_params.dt = config.timestep;
        integration_params.num_solver_iterations =
            NonZeroUsize::new(config.velocity_iterations).unwrap_or(NonZeroUsize::MIN);

        log::debug!(
            "Creating physics world (gravity {:?}, dt {})",
            config.gravity,
            config.timestep
        );

        Self {
            config,
            pipeline: rapier::PhysicsPipeline::new(),
            gravity,
            integration_params,
            islands: rapier::IslandManager::new(),
            broad_phase: rapier::DefaultBroadPhase::new(),
            narrow_phase: rapier::NarrowPhase::new(),
            impulse_joints: rapier::ImpulseJointSet::new(),
            multibody_joints: rapier::MultibodyJointSet::new(),
            ccd_solver: rapier::CCDSolver::new(),
            bodies: rapier::RigidBodySet::new(),
            colliders: rapier::ColliderSet::new(),
        }
    }

    /// Get the simulation configuration
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Set gravity
    pub fn set_gravity(&mut self, x: f32, y: f32, z: f32) {
        self.gravity = rapier::Vector::new(x, y, z);
    }

    /// Get gravity
    pub fn gravity(&self) -> [f32; 3] {
        [self.gravity.x, self.gravity.y, self.gravity.z]
    }

    // ==================== Rigid Bodies ====================

    /// Create a rigid body with its collision shape
    pub fn create_body(&mut self, desc: BodyDesc) -> Result<BodyHandle> {
        let handle = self.bodies.insert(desc.to_rapier_builder());
        self.colliders
            .insert_with_parent(desc.to_rapier_collider(), handle, &mut self.bodies);
        Ok(BodyHandle(handle))
    }

    /// Remove a rigid body and its attached colliders
    pub fn remove_body(&mut self, handle: BodyHandle) -> Result<()> {
        self.bodies
            .remove(
                handle.0,
                &mut self.islands,
                &mut self.colliders,
                &mut self.impulse_joints,
                &mut self.multibody_joints,
                true, // Remove attached colliders
            )
            .map(|_| ())
            .ok_or(PhysicsError::BodyNotFound(handle))
    }

    /// Get a body's center-of-mass position and orientation as Euler angles
    /// (roll, pitch, yaw in radians)
    pub fn body_transform(&self, handle: BodyHandle) -> Result<([f32; 3], [f32; 3])> {
        self.bodies
            .get(handle.0)
            .map(|b| {
                let pos = b.translation();
                let (roll, pitch, yaw) = b.rotation().euler_angles();
                ([pos.x, pos.y, pos.z], [roll, pitch, yaw])
            })
            .ok_or(PhysicsError::BodyNotFound(handle))
    }

    /// Check whether a body is currently sleeping
    pub fn is_sleeping(&self, handle: BodyHandle) -> Result<bool> {
        self.bodies
            .get(handle.0)
            .map(|b| b.is_sleeping())
            .ok_or(PhysicsError::BodyNotFound(handle))
    }

    // ==================== Simulation ====================

    /// Advance the world by exactly one fixed tick.
    ///
    /// The tick length is `config.timestep` regardless of wall-clock time
    /// between calls; callers control simulation rate by call frequency.
    pub fn step_once(&mut self) {
        self.pipeline.step(
            &self.gravity,
            &self.integration_params,
            &mut self.islands,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            None,
            &(),
            &(),
        );
    }

    // ==================== Debug ====================

    /// Get number of rigid bodies
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Get number of colliders
    pub fn collider_count(&self) -> usize {
        self.colliders.len()
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new(SimulationConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::BodyShape;

    #[test]
    fn test_create_world() {
        let world = PhysicsWorld::new(SimulationConfig::default());
        assert_eq!(world.body_count(), 0);
        assert_eq!(world.collider_count(), 0);
        assert_eq!(world.gravity(), [0.0, 0.0, -980.0]);
    }

    #[test]
    fn test_create_and_remove_body() {
        let mut world = PhysicsWorld::new(SimulationConfig::default());

        let body = world
            .create_body(BodyDesc::dynamic(BodyShape::sphere(50.0)).with_position(0.0, 0.0, 100.0))
            .unwrap();
        assert_eq!(world.body_count(), 1);
        assert_eq!(world.collider_count(), 1);

        world.remove_body(body).unwrap();
        assert_eq!(world.body_count(), 0);
        assert_eq!(world.collider_count(), 0);
        assert!(matches!(
            world.body_transform(body),
            Err(PhysicsError::BodyNotFound(_))
        ));
    }

    #[test]
    fn test_gravity_fall() {
        let mut world = PhysicsWorld::new(SimulationConfig::default());

        let body = world
            .create_body(BodyDesc::dynamic(BodyShape::sphere(50.0)).with_position(0.0, 0.0, 500.0))
            .unwrap();

        let (initial, _) = world.body_transform(body).unwrap();

        for _ in 0..60 {
            world.step_once();
        }

        let (fallen, _) = world.body_transform(body).unwrap();
        assert!(fallen[2] < initial[2], "Body should fall along -Z");
    }

    #[test]
    fn test_sphere_rests_on_floor() {
        let mut world = PhysicsWorld::new(SimulationConfig::default());

        world
            .create_body(
                BodyDesc::fixed(BodyShape::cuboid(1000.0, 1000.0, 100.0)).with_friction(1.0),
            )
            .unwrap();
        let ball = world
            .create_body(
                BodyDesc::dynamic(BodyShape::sphere(50.0))
                    .with_position(0.0, 0.0, 400.0)
                    .with_restitution(0.0),
            )
            .unwrap();

        for _ in 0..600 {
            world.step_once();
        }

        // Floor top is at z=100, so the sphere center settles near 150.
        let (pos, _) = world.body_transform(ball).unwrap();
        approx::assert_abs_diff_eq!(pos[2], 150.0, epsilon = 5.0);
    }
}
