//! Ordered record of every event a session produced.
//!
//! Replicas exchange events instead of state deltas. The journal keeps the
//! stream in publication order and condenses it into a SHA-256 fingerprint
//! over the bincode encoding of each event, so two replicas can confirm they
//! saw the same match with a single string comparison.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use sha2::{Digest, Sha256};

use crate::error::{Result, RuntimeError};
use crate::events::Event;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventJournal {
    events: Vec<Event>,
}

impl EventJournal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Hex-encoded SHA-256 over the length-prefixed bincode encoding of
    /// every event, in order.
    pub fn fingerprint(&self) -> Result<String> {
        let mut hasher = Sha256::new();
        for event in &self.events {
            let bytes = bincode::serialize(event).map_err(RuntimeError::Encode)?;
            hasher.update((bytes.len() as u64).to_le_bytes());
            hasher.update(&bytes);
        }
        Ok(hex::encode(hasher.finalize()))
    }

    /// Writes the journal as newline-delimited JSON.
    pub fn export_jsonl(&self, path: &Path) -> Result<()> {
        let io_err = |source| RuntimeError::JournalIo {
            path: path.to_path_buf(),
            source,
        };
        let mut writer = BufWriter::new(File::create(path).map_err(io_err)?);
        for event in &self.events {
            serde_json::to_writer(&mut writer, event).map_err(|e| io_err(e.into()))?;
            writer.write_all(b"\n").map_err(io_err)?;
        }
        writer.flush().map_err(io_err)
    }

    /// Reads a journal written by [`EventJournal::export_jsonl`]. Blank lines are skipped.
    pub fn import_jsonl(path: &Path) -> Result<Self> {
        let io_err = |source| RuntimeError::JournalIo {
            path: path.to_path_buf(),
            source,
        };
        let reader = BufReader::new(File::open(path).map_err(io_err)?);
        let mut journal = Self::new();
        for (index, line) in reader.lines().enumerate() {
            let line = line.map_err(io_err)?;
            if line.trim().is_empty() {
                continue;
            }
            let event = serde_json::from_str(&line).map_err(|source| RuntimeError::JournalFormat {
                path: path.to_path_buf(),
                line: index + 1,
                source,
            })?;
            journal.record(event);
        }
        Ok(journal)
    }
}
