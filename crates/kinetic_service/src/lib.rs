//! # Kinetic Service
//!
//! Session protocol and simulation-orchestration layer for the Kinetic
//! remote physics stepping service.
//!
//! A client (a game or simulation front-end) connects over raw TCP, submits
//! an `Init` message describing a population of sphere actors, then drives
//! the simulation one fixed tick at a time with `Step` messages, receiving
//! back the transform of every tracked actor.
//!
//! ## Layers
//!
//! - [`codec`] - text wire protocol: sentinel framing, record parsing,
//!   response encoding
//! - [`registry`] - insertion-ordered bookkeeping of live body identifiers
//! - [`orchestrator`] - Init/Step/Clear state machine over the physics world
//! - [`timing`] - per-step engine cost samples, persisted at session end
//! - [`session`] - one TCP connection end-to-end: accept, receive loop,
//!   dispatch, drain, close
//!
//! ## Usage
//!
//! ```ignore
//! let mut session = PhysicsSession::new(SessionConfig::default());
//! session.run()?;
//! ```

pub mod codec;
pub mod orchestrator;
pub mod registry;
pub mod session;
pub mod timing;

pub use codec::{ActorSpawn, Command, CodecError, FrameEntry, MessageBuffer};
pub use orchestrator::{SimulationOrchestrator, SimulationState};
pub use registry::{BodyRecord, BodyRegistry, RegistryError, FLOOR_ID};
pub use session::{PhysicsSession, SessionConfig, SessionError, SessionState};
pub use timing::TimingRecorder;
