//! Kinetic physics stepping service
//!
//! Binds a TCP endpoint, serves exactly one client connection, then exits:
//! the client initializes a population of sphere actors and advances the
//! simulation one fixed tick per Step request. Per-step engine timings are
//! written to disk when the client disconnects.
//!
//! Run with: cargo run -p kinetic_server

use kinetic_service::session::{PhysicsSession, SessionConfig};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = SessionConfig::default();
    log::info!(
        "Kinetic physics service starting on {}:{}",
        config.bind_addr,
        config.port
    );

    let mut session = PhysicsSession::new(config);
    if let Err(e) = session.run() {
        log::error!("Session ended with transport error: {}", e);
        std::process::exit(1);
    }
}
