//! Session loop - one TCP connection end-to-end
//!
//! Blocking, single-threaded: the process binds, accepts exactly one
//! inbound connection, then stops listening. A receive-and-dispatch cycle
//! runs until the peer closes or the transport fails, after which the
//! timing samples are persisted and the connection is shut down.

use std::io::{Read, Write};
use std::net::{Shutdown, TcpListener, TcpStream};
use std::path::PathBuf;

use kinetic_physics::SimulationConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::codec::{self, Command, MessageBuffer};
use crate::orchestrator::SimulationOrchestrator;

/// Port the service listens on
pub const DEFAULT_PORT: u16 = 27015;
/// Receive chunk size. For bigger Init messages, raise this.
pub const RECV_BUFFER_LEN: usize = 1024 * 1024;

/// Session errors (all transport-level; protocol errors never kill a session)
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Transport error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for session operations
pub type SessionResult<T> = Result<T, SessionError>;

/// Session lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Awaiting the single inbound connection
    Listening,
    /// Receive-and-dispatch cycle running
    Connected,
    /// Peer gone; persisting timing samples
    Draining,
    /// Stream shut down, handle released
    Closed,
}

/// Session configuration. All values have fixed defaults; there are no
/// command-line flags or environment variables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Address to bind (all interfaces by default)
    pub bind_addr: String,
    /// Listen port
    pub port: u16,
    /// Directory for the persisted timing series, relative to the working
    /// directory
    pub timing_dir: PathBuf,
    /// Simulation parameters handed to the orchestrator
    pub simulation: SimulationConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            timing_dir: PathBuf::from("step_timings"),
            simulation: SimulationConfig::default(),
        }
    }
}

/// One client session: connection lifecycle, dispatch, teardown
pub struct PhysicsSession {
    config: SessionConfig,
    state: SessionState,
    buffer: MessageBuffer,
    orchestrator: SimulationOrchestrator,
}

impl PhysicsSession {
    /// Create a session awaiting its connection
    pub fn new(config: SessionConfig) -> Self {
        let orchestrator = SimulationOrchestrator::new(config.simulation.clone());
        Self {
            config,
            state: SessionState::Listening,
            buffer: MessageBuffer::new(),
            orchestrator,
        }
    }

    /// Current lifecycle state
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Bind from config and serve the single connection to completion
    pub fn run(&mut self) -> SessionResult<()> {
        let listener = TcpListener::bind((self.config.bind_addr.as_str(), self.config.port))?;
        self.run_on(listener)
    }

    /// Serve the single connection on a pre-bound listener.
    ///
    /// Accepts once, drops the listener, then runs the receive loop. The
    /// timing series is persisted exactly once when the Connected state
    /// ends, whether by peer close or transport error.
    pub fn run_on(&mut self, listener: TcpListener) -> SessionResult<()> {
        log::info!(
            "Awaiting client connection on {}",
            listener.local_addr().map(|a| a.to_string()).unwrap_or_default()
        );

        let (stream, peer) = listener.accept()?;
        // Single-client service: stop listening as soon as we have our peer
        drop(listener);

        log::info!("Client connected from {}", peer);
        self.state = SessionState::Connected;

        let served = self.serve(&stream);

        self.state = SessionState::Draining;
        if let Err(e) = self.orchestrator.timing().persist(&self.config.timing_dir) {
            log::error!("Failed to persist step timings: {}", e);
        }

        if let Err(e) = stream.shutdown(Shutdown::Both) {
            log::debug!("Shutdown after close: {}", e);
        }
        self.state = SessionState::Closed;
        log::info!("Session closed");

        served
    }

    /// Receive-and-dispatch cycle. Returns Ok on orderly peer close and the
    /// transport error otherwise; teardown happens in the caller either way.
    fn serve(&mut self, mut stream: &TcpStream) -> SessionResult<()> {
        let mut chunk = vec![0u8; RECV_BUFFER_LEN];

        loop {
            let received = match stream.read(&mut chunk) {
                Ok(0) => {
                    log::info!("Client closed the connection (0 bytes)");
                    return Ok(());
                }
                Ok(n) => n,
                Err(e) => {
                    log::error!("Receive failed: {}", e);
                    return Err(e.into());
                }
            };

            self.buffer.accumulate(&chunk[..received]);

            match self.buffer.try_decode() {
                Some(Command::Init(payload)) => match self.orchestrator.init(&payload) {
                    Ok(()) => stream.write_all(codec::encode_init_ack().as_bytes())?,
                    // Acknowledgment withheld; the session keeps serving
                    Err(e) => log::warn!("Init aborted: {}", e),
                },
                Some(Command::Step) => {
                    let frame = self.orchestrator.step();
                    stream.write_all(codec::encode_step_result(&frame).as_bytes())?;
                }
                // Partial frame; await more bytes
                None => {}
            }
        }
    }
}
