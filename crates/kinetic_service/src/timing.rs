//! Per-step timing instrumentation
//!
//! Records the engine-only wall-clock cost of each Step (advance plus
//! transform queries, excluding network I/O) and persists the series once
//! at session teardown.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// File name for the persisted sample series
pub const TIMING_FILE_NAME: &str = "step_engine_micros.txt";

/// Append-only sequence of per-step engine durations
#[derive(Debug, Default)]
pub struct TimingRecorder {
    samples: Vec<u64>,
}

impl TimingRecorder {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one sample
    pub fn record(&mut self, elapsed: Duration) {
        self.samples.push(elapsed.as_micros() as u64);
    }

    /// Recorded samples in step order
    pub fn samples(&self) -> &[u64] {
        &self.samples
    }

    /// Number of recorded samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether any samples were recorded
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Write the series as newline-separated decimal microseconds into
    /// `dir`, creating the directory if absent and overwriting any prior
    /// file of the same name. Returns the path written.
    pub fn persist(&self, dir: &Path) -> io::Result<PathBuf> {
        fs::create_dir_all(dir)?;
        let path = dir.join(TIMING_FILE_NAME);

        let mut contents = String::with_capacity(self.samples.len() * 8);
        for sample in &self.samples {
            contents.push_str(&sample.to_string());
            contents.push('\n');
        }
        fs::write(&path, contents)?;

        log::info!(
            "Persisted {} step timing samples to {}",
            self.samples.len(),
            path.display()
        );
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("kinetic_timing_{}_{}", tag, std::process::id()))
    }

    #[test]
    fn test_record_and_samples() {
        let mut recorder = TimingRecorder::new();
        assert!(recorder.is_empty());

        recorder.record(Duration::from_micros(120));
        recorder.record(Duration::from_micros(85));
        assert_eq!(recorder.samples(), &[120, 85]);
        assert_eq!(recorder.len(), 2);
    }

    #[test]
    fn test_persist_writes_newline_separated_values() {
        let dir = temp_dir("persist");
        let mut recorder = TimingRecorder::new();
        recorder.record(Duration::from_micros(10));
        recorder.record(Duration::from_micros(20));

        let path = recorder.persist(&dir).unwrap();
        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "10\n20\n");

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_persist_overwrites_prior_file() {
        let dir = temp_dir("overwrite");

        let mut first = TimingRecorder::new();
        first.record(Duration::from_micros(999));
        first.persist(&dir).unwrap();

        let mut second = TimingRecorder::new();
        second.record(Duration::from_micros(1));
        let path = second.persist(&dir).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "1\n");
        fs::remove_dir_all(&dir).unwrap();
    }
}
