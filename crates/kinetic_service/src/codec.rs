//! Wire codec for the text protocol
//!
//! Framing is done by sentinel search over an accumulating buffer, not by
//! length prefixes: a buffer holding both `Init` and `EndMessage` is a
//! complete Init frame, and any buffer holding `Step` is a Step request.
//! This matches the protocol's existing clients; a value field containing a
//! sentinel substring would misroute, so fields must stay numeric.

use std::mem;
use thiserror::Error;

/// Sentinel opening an Init frame
pub const INIT_TOKEN: &str = "Init";
/// Sentinel closing an Init frame
pub const END_TOKEN: &str = "EndMessage";
/// Step request token
pub const STEP_TOKEN: &str = "Step";
/// Acknowledgment token
pub const ACK: &str = "OK";

/// Codec errors
#[derive(Debug, Error)]
pub enum CodecError {
    /// Record with fewer than 4 `;`-separated fields
    #[error("Malformed init record (need at least 4 fields): {0:?}")]
    MalformedRecord(String),

    /// Field that failed numeric parsing
    #[error("Invalid numeric field {field:?} in record {record:?}")]
    InvalidField { record: String, field: String },
}

/// One actor spawn request decoded from an Init record
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActorSpawn {
    /// Caller-supplied body identifier
    pub id: u32,
    /// Initial position
    pub position: [f32; 3],
}

/// One row of a Step response: an actor's transform after the tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameEntry {
    /// Body identifier
    pub id: u32,
    /// Center-of-mass position
    pub position: [f32; 3],
    /// Orientation as Euler angles (radians)
    pub rotation: [f32; 3],
}

/// A complete command recognized in the receive buffer
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Init frame, carrying the raw payload between (and including) the
    /// sentinels for the orchestrator to decode
    Init(String),
    /// Step request
    Step,
}

/// Accumulating receive buffer with sentinel-based frame detection
#[derive(Debug, Default)]
pub struct MessageBuffer {
    pending: String,
}

impl MessageBuffer {
    /// Create an empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Append raw received bytes to the pending buffer
    pub fn accumulate(&mut self, bytes: &[u8]) {
        self.pending.push_str(&String::from_utf8_lossy(bytes));
    }

    /// Bytes currently held pending a complete frame
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Try to recognize a complete command in the buffer.
    ///
    /// Init is checked before Step, so an Init payload containing the
    /// `Step` substring still routes as Init. On a match the buffer is
    /// consumed; otherwise it is retained awaiting more bytes.
    pub fn try_decode(&mut self) -> Option<Command> {
        if self.pending.contains(INIT_TOKEN) && self.pending.contains(END_TOKEN) {
            return Some(Command::Init(mem::take(&mut self.pending)));
        }
        if self.pending.contains(STEP_TOKEN) {
            self.pending.clear();
            return Some(Command::Step);
        }
        None
    }
}

/// Parse an Init payload into actor spawn requests.
///
/// The first record (the `Init` marker) and the last record (the
/// `EndMessage` marker) are discarded; each remaining record is split on
/// `;` into `id;x;y;z` with any extra fields ignored. A record with fewer
/// than 4 fields or a non-numeric field aborts the whole Init.
pub fn parse_init(payload: &str) -> Result<Vec<ActorSpawn>, CodecError> {
    let records: Vec<&str> = payload.lines().collect();
    if records.len() < 3 {
        // Just the sentinels (or less): a valid, empty population.
        return Ok(Vec::new());
    }

    let mut spawns = Vec::with_capacity(records.len() - 2);
    for record in &records[1..records.len() - 1] {
        let fields: Vec<&str> = record.split(';').collect();
        if fields.len() < 4 {
            return Err(CodecError::MalformedRecord(record.to_string()));
        }

        let id = parse_field(record, fields[0])?;
        let x = parse_field(record, fields[1])?;
        let y = parse_field(record, fields[2])?;
        let z = parse_field(record, fields[3])?;

        spawns.push(ActorSpawn {
            id,
            position: [x, y, z],
        });
    }

    Ok(spawns)
}

fn parse_field<T: std::str::FromStr>(record: &str, field: &str) -> Result<T, CodecError> {
    field.trim().parse().map_err(|_| CodecError::InvalidField {
        record: record.to_string(),
        field: field.to_string(),
    })
}

/// Encode the Init acknowledgment (no trailing newline)
pub fn encode_init_ack() -> &'static str {
    ACK
}

/// Encode a Step response: one `id;x;y;z;rotX;rotY;rotZ` line per actor in
/// registry order, followed by a trailing acknowledgment line.
pub fn encode_step_result(frame: &[FrameEntry]) -> String {
    let mut out = String::with_capacity(frame.len() * 64 + 4);
    for entry in frame {
        out.push_str(&format!(
            "{};{:.6};{:.6};{:.6};{:.6};{:.6};{:.6}\n",
            entry.id,
            entry.position[0],
            entry.position[1],
            entry.position[2],
            entry.rotation[0],
            entry.rotation[1],
            entry.rotation[2],
        ));
    }
    out.push_str(ACK);
    out.push('\n');
    out
}
