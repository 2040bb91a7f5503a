//! Simulation orchestrator - Init/Step/Clear over the physics world
//!
//! Owns the scoped [`PhysicsWorld`] plus the [`BodyRegistry`] and timing
//! recorder for one session. The world is built on Init and torn down on
//! Clear; no engine state outlives the orchestrator's Ready span.

use std::collections::HashMap;
use std::time::Instant;

use kinetic_physics::{
    BodyDesc, BodyHandle, BodyShape, MotionType, PhysicsError, PhysicsWorld, SimulationConfig,
};
use thiserror::Error;

use crate::codec::{self, ActorSpawn, CodecError, FrameEntry};
use crate::registry::{BodyRecord, BodyRegistry, FLOOR_ID};
use crate::timing::TimingRecorder;

/// Radius of every actor sphere
pub const ACTOR_RADIUS: f32 = 50.0;
/// Restitution of every actor sphere
pub const ACTOR_RESTITUTION: f32 = 1.0;
/// Half-extents of the implicit static floor box
pub const FLOOR_HALF_EXTENTS: [f32; 3] = [1000.0, 1000.0, 100.0];
/// Friction of the floor
pub const FLOOR_FRICTION: f32 = 1.0;

/// Orchestrator lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulationState {
    /// No world exists; Step returns an empty frame
    Uninitialized,
    /// World is live and steppable
    Ready,
    /// World exists but the floor invariant is broken; only Clear is useful
    Faulted,
}

/// Errors that abort an Init attempt
#[derive(Debug, Error)]
pub enum InitError {
    /// Malformed init payload; no world was created
    #[error(transparent)]
    Decode(#[from] CodecError),

    /// The floor body could not be created; the world is faulted
    #[error("Floor creation failed: {0}")]
    Floor(#[from] PhysicsError),
}

/// Per-body failures during Init; the body is skipped, the batch continues
#[derive(Debug, Error)]
enum SpawnError {
    #[error(transparent)]
    Registry(#[from] crate::registry::RegistryError),

    #[error(transparent)]
    Engine(#[from] PhysicsError),
}

/// Init/Step/Clear state machine owning one physics world
pub struct SimulationOrchestrator {
    config: SimulationConfig,
    state: SimulationState,
    world: Option<PhysicsWorld>,
    registry: BodyRegistry,
    handles: HashMap<u32, BodyHandle>,
    timing: TimingRecorder,
}

impl SimulationOrchestrator {
    /// Create an orchestrator in the Uninitialized state
    pub fn new(config: SimulationConfig) -> Self {
        Self {
            config,
            state: SimulationState::Uninitialized,
            world: None,
            registry: BodyRegistry::new(),
            handles: HashMap::new(),
            timing: TimingRecorder::new(),
        }
    }

    /// Current lifecycle state
    pub fn state(&self) -> SimulationState {
        self.state
    }

    /// Number of live actors (floor excluded)
    pub fn actor_count(&self) -> usize {
        self.registry.actor_ids().len()
    }

    /// Per-step timing samples recorded so far
    pub fn timing(&self) -> &TimingRecorder {
        &self.timing
    }

    /// Build a new world from a raw Init payload.
    ///
    /// Valid from any state; an existing world is cleared first. A malformed
    /// record aborts the whole Init and leaves the orchestrator
    /// Uninitialized. A per-body engine creation failure only skips that
    /// body.
    pub fn init(&mut self, payload: &str) -> Result<(), InitError> {
        self.clear();

        let spawns = codec::parse_init(payload)?;

        log::info!("Initializing physics world with {} actors", spawns.len());
        let mut world = PhysicsWorld::new(self.config.clone());

        let floor_desc = BodyDesc::fixed(BodyShape::cuboid(
            FLOOR_HALF_EXTENTS[0],
            FLOOR_HALF_EXTENTS[1],
            FLOOR_HALF_EXTENTS[2],
        ))
        .with_friction(FLOOR_FRICTION);

        match world.create_body(floor_desc.clone()) {
            Ok(handle) => {
                self.handles.insert(FLOOR_ID, handle);
                let _ = self.registry.add(BodyRecord {
                    id: FLOOR_ID,
                    shape: floor_desc.shape,
                    motion: MotionType::Static,
                    position: floor_desc.position,
                });
            }
            Err(e) => {
                log::error!("Floor creation failed: {}", e);
                self.world = Some(world);
                self.state = SimulationState::Faulted;
                return Err(InitError::Floor(e));
            }
        }

        for spawn in spawns {
            if let Err(e) = self.spawn_actor(&mut world, spawn) {
                log::warn!("Skipping actor {}: {}", spawn.id, e);
            }
        }

        self.world = Some(world);
        self.state = SimulationState::Ready;
        log::info!(
            "Physics world ready ({} actors + floor)",
            self.actor_count()
        );
        Ok(())
    }

    fn spawn_actor(&mut self, world: &mut PhysicsWorld, spawn: ActorSpawn) -> Result<(), SpawnError> {
        let record = BodyRecord {
            id: spawn.id,
            shape: BodyShape::sphere(ACTOR_RADIUS),
            motion: MotionType::Dynamic,
            position: spawn.position,
        };
        self.registry.add(record)?;

        let desc = BodyDesc::dynamic(BodyShape::sphere(ACTOR_RADIUS))
            .with_position(spawn.position[0], spawn.position[1], spawn.position[2])
            .with_restitution(ACTOR_RESTITUTION);

        match world.create_body(desc) {
            Ok(handle) => {
                self.handles.insert(spawn.id, handle);
                Ok(())
            }
            Err(e) => {
                // Keep registry and world consistent when the engine refuses
                let _ = self.registry.remove(spawn.id);
                Err(e.into())
            }
        }
    }

    /// Advance the world one fixed tick and report every actor's transform
    /// in registry insertion order.
    ///
    /// Returns an empty frame unless Ready. The advance-plus-query span is
    /// timed and appended to the recorder.
    pub fn step(&mut self) -> Vec<FrameEntry> {
        if self.state != SimulationState::Ready {
            log::debug!("Step requested with no world; returning empty frame");
            return Vec::new();
        }
        let world = match self.world.as_mut() {
            Some(world) => world,
            None => return Vec::new(),
        };

        let started = Instant::now();
        world.step_once();

        let mut frame = Vec::with_capacity(self.handles.len());
        for id in self.registry.actor_ids() {
            let Some(&handle) = self.handles.get(&id) else {
                log::warn!("No engine handle for actor {}", id);
                continue;
            };
            match world.body_transform(handle) {
                Ok((position, rotation)) => frame.push(FrameEntry {
                    id,
                    position,
                    rotation,
                }),
                Err(e) => log::warn!("Transform query failed for actor {}: {}", id, e),
            }
        }
        self.timing.record(started.elapsed());

        frame
    }

    /// Tear the world down: remove and destroy every tracked body (actors
    /// then floor), release engine resources, empty the registry.
    ///
    /// Idempotent; a no-op when already Uninitialized.
    pub fn clear(&mut self) {
        if self.state == SimulationState::Uninitialized {
            return;
        }

        log::info!("Clearing physics world");
        if let Some(world) = self.world.as_mut() {
            for id in self.registry.actor_ids() {
                if let Some(handle) = self.handles.remove(&id) {
                    if let Err(e) = world.remove_body(handle) {
                        log::warn!("Removing actor {} failed: {}", id, e);
                    }
                }
            }
            if let Some(handle) = self.handles.remove(&FLOOR_ID) {
                if let Err(e) = world.remove_body(handle) {
                    log::warn!("Removing floor failed: {}", e);
                }
            }
        }

        self.registry.clear();
        self.handles.clear();
        self.world = None;
        self.state = SimulationState::Uninitialized;
    }
}

impl Default for SimulationOrchestrator {
    fn default() -> Self {
        Self::new(SimulationConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_actor_payload() -> &'static str {
        "Init\n1;0;0;500\n2;200;0;500\nEndMessage\n"
    }

    #[test]
    fn test_init_builds_actors_and_floor() {
        let mut orchestrator = SimulationOrchestrator::default();
        orchestrator.init(two_actor_payload()).unwrap();

        assert_eq!(orchestrator.state(), SimulationState::Ready);
        assert_eq!(orchestrator.actor_count(), 2);
    }

    #[test]
    fn test_step_reports_in_submission_order() {
        let mut orchestrator = SimulationOrchestrator::default();
        orchestrator.init("Init\n9;0;0;500\n3;200;0;500\n7;400;0;500\nEndMessage\n").unwrap();

        let frame = orchestrator.step();
        let ids: Vec<u32> = frame.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![9, 3, 7]);
    }

    #[test]
    fn test_step_without_init_is_empty() {
        let mut orchestrator = SimulationOrchestrator::default();
        assert!(orchestrator.step().is_empty());
        assert!(orchestrator.step().is_empty());
        assert_eq!(orchestrator.state(), SimulationState::Uninitialized);
    }

    #[test]
    fn test_gravity_pulls_actors_down() {
        let mut orchestrator = SimulationOrchestrator::default();
        orchestrator.init(two_actor_payload()).unwrap();

        let first = orchestrator.step();
        let mut last = Vec::new();
        for _ in 0..30 {
            last = orchestrator.step();
        }
        assert!(last[0].position[2] < first[0].position[2]);
        assert!(last[1].position[2] < first[1].position[2]);
    }

    #[test]
    fn test_malformed_record_aborts_whole_init() {
        let mut orchestrator = SimulationOrchestrator::default();
        let err = orchestrator.init("Init\n1;0;0;0\n5;1;2\nEndMessage\n");

        assert!(matches!(err, Err(InitError::Decode(_))));
        assert_eq!(orchestrator.state(), SimulationState::Uninitialized);
        assert_eq!(orchestrator.actor_count(), 0);
        assert!(orchestrator.step().is_empty());
    }

    #[test]
    fn test_reinit_fully_replaces_world() {
        let mut orchestrator = SimulationOrchestrator::default();
        orchestrator.init(two_actor_payload()).unwrap();
        orchestrator.init("Init\n8;0;0;500\nEndMessage\n").unwrap();

        let ids: Vec<u32> = orchestrator.step().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![8]);
    }

    #[test]
    fn test_reinit_may_reuse_identifiers() {
        let mut orchestrator = SimulationOrchestrator::default();
        orchestrator.init(two_actor_payload()).unwrap();
        orchestrator.init(two_actor_payload()).unwrap();

        assert_eq!(orchestrator.state(), SimulationState::Ready);
        assert_eq!(orchestrator.actor_count(), 2);
    }

    #[test]
    fn test_duplicate_spawn_in_one_payload_is_skipped() {
        let mut orchestrator = SimulationOrchestrator::default();
        orchestrator.init("Init\n1;0;0;500\n1;99;99;99\nEndMessage\n").unwrap();

        assert_eq!(orchestrator.actor_count(), 1);
        let frame = orchestrator.step();
        assert_eq!(frame.len(), 1);
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut orchestrator = SimulationOrchestrator::default();
        orchestrator.clear();
        assert_eq!(orchestrator.state(), SimulationState::Uninitialized);

        orchestrator.init(two_actor_payload()).unwrap();
        orchestrator.clear();
        orchestrator.clear();
        assert_eq!(orchestrator.state(), SimulationState::Uninitialized);
        assert_eq!(orchestrator.actor_count(), 0);
    }

    #[test]
    fn test_timing_sample_per_step() {
        let mut orchestrator = SimulationOrchestrator::default();
        orchestrator.init(two_actor_payload()).unwrap();

        for _ in 0..5 {
            orchestrator.step();
        }
        assert_eq!(orchestrator.timing().len(), 5);

        // Steps without a world are not engine work and record nothing
        orchestrator.clear();
        orchestrator.step();
        assert_eq!(orchestrator.timing().len(), 5);
    }
}
