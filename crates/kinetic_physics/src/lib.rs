//! Kinetic Physics - Rapier 3D Facade
//!
//! Scoped physics world for the Kinetic stepping service, built on Rapier 3D.
//! The whole engine state lives inside a single [`PhysicsWorld`] value that is
//! constructed when a session initializes a simulation and dropped when the
//! simulation is cleared - no process-wide singletons.
//!
//! The service layer consumes only this narrow surface:
//!
//! - create a static or dynamic rigid body from a shape descriptor
//! - advance the world by one fixed tick
//! - query a body's position and orientation (Euler angles)
//! - remove and destroy a body
//! - set global parameters (gravity, solver iterations, sleeping)
//!
//! # Example
//!
//! ```ignore
//! use kinetic_physics::prelude::*;
//!
//! let mut world = PhysicsWorld::new(SimulationConfig::default());
//!
//! let ball = world.create_body(
//!     BodyDesc::dynamic(BodyShape::sphere(50.0)).with_position(0.0, 0.0, 200.0),
//! )?;
//!
//! world.step_once();
//! let (position, rotation) = world.body_transform(ball)?;
//! ```

pub mod body;
pub mod config;
pub mod error;
pub mod world;

pub mod prelude {
    //! Common imports for the physics facade
    pub use crate::body::{BodyDesc, BodyHandle, BodyShape, MotionType};
    pub use crate::config::SimulationConfig;
    pub use crate::error::{PhysicsError, Result};
    pub use crate::world::PhysicsWorld;
}

pub use prelude::*;
