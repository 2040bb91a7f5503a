//! Rigid body descriptors and handles

use rapier3d::prelude as rapier;
use serde::{Deserialize, Serialize};

/// Handle to a rigid body in the physics world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BodyHandle(pub(crate) rapier::RigidBodyHandle);

impl BodyHandle {
    /// Create from raw Rapier handle
    pub fn from_raw(handle: rapier::RigidBodyHandle) -> Self {
        Self(handle)
    }

    /// Get the raw Rapier handle
    pub fn raw(&self) -> rapier::RigidBodyHandle {
        self.0
    }
}

/// Motion type of a rigid body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MotionType {
    /// Static body - never moves, infinite mass
    Static,
    /// Dynamic body - fully simulated
    #[default]
    Dynamic,
}

impl From<MotionType> for rapier::RigidBodyType {
    fn from(t: MotionType) -> Self {
        match t {
            MotionType::Static => rapier::RigidBodyType::Fixed,
            MotionType::Dynamic => rapier::RigidBodyType::Dynamic,
        }
    }
}

/// Collision shape of a rigid body
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum BodyShape {
    /// Sphere with radius
    Sphere { radius: f32 },
    /// Box with half-extents
    Box { half_extents: [f32; 3] },
}

impl BodyShape {
    /// Create a sphere shape
    pub fn sphere(radius: f32) -> Self {
        Self::Sphere { radius }
    }

    /// Create a box shape from half-extents
    pub fn cuboid(hx: f32, hy: f32, hz: f32) -> Self {
        Self::Box {
            half_extents: [hx, hy, hz],
        }
    }

    /// Build a Rapier shared shape
    pub(crate) fn to_rapier(self) -> rapier::SharedShape {
        match self {
            Self::Sphere { radius } => rapier::SharedShape::ball(radius),
            Self::Box { half_extents } => rapier::SharedShape::cuboid(
                half_extents[0],
                half_extents[1],
                half_extents[2],
            ),
        }
    }
}

/// Description for creating a rigid body with its collision shape
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BodyDesc {
    /// Motion type
    pub motion: MotionType,
    /// Collision shape
    pub shape: BodyShape,
    /// Initial position (orientation is always identity)
    pub position: [f32; 3],
    /// Friction coefficient
    pub friction: f32,
    /// Restitution (bounciness)
    pub restitution: f32,
    /// Can this body sleep when inactive
    pub can_sleep: bool,
}

impl BodyDesc {
    /// Create a static body description
    pub fn fixed(shape: BodyShape) -> Self {
        Self {
            motion: MotionType::Static,
            shape,
            position: [0.0, 0.0, 0.0],
            friction: 0.5,
            restitution: 0.0,
            can_sleep: true,
        }
    }

    /// Create a dynamic body description
    pub fn dynamic(shape: BodyShape) -> Self {
        Self {
            motion: MotionType::Dynamic,
            ..Self::fixed(shape)
        }
    }

    /// Set position
    pub fn with_position(mut self, x: f32, y: f32, z: f32) -> Self {
        self.position = [x, y, z];
        self
    }

    /// Set friction
    pub fn with_friction(mut self, friction: f32) -> Self {
        self.friction = friction;
        self
    }

    /// Set restitution
    pub fn with_restitution(mut self, restitution: f32) -> Self {
        self.restitution = restitution;
        self
    }

    /// Build a Rapier rigid body builder
    pub(crate) fn to_rapier_builder(&self) -> rapier::RigidBodyBuilder {
        rapier::RigidBodyBuilder::new(self.motion.into())
            .translation(rapier::Vector::new(
                self.position[0],
                self.position[1],
                self.position[2],
            ))
            .can_sleep(self.can_sleep)
    }

    /// Build a Rapier collider builder
    pub(crate) fn to_rapier_collider(&self) -> rapier::ColliderBuilder {
        rapier::ColliderBuilder::new(self.shape.to_rapier())
            .friction(self.friction)
            .restitution(self.restitution)
    }
}
