//! Persisted session record and the key-value store seam.
//!
//! The record is written as one bincode blob. The current level and the last
//! hint grant time are also written as separate scalar keys, so progress
//! survives a record that later fails to decode.
//!
//! Loading never fails outward: anything that does not decode or does not
//! fit the requested level is logged and dropped, and the session falls back
//! to a fresh board.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::{Board, EngineError, Result};
use crate::level::Difficulty;
use crate::rules::is_won;

use super::clock::Timestamp;

/// Key of the full session record.
pub const RECORD_KEY: &str = "session";
/// Key of the current level scalar.
pub const LEVEL_KEY: &str = "level";
/// Key of the last hint grant time scalar.
pub const LAST_GRANT_KEY: &str = "last_hint_grant";

/// Everything needed to resume a session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub level: u32,
    pub board: Board,
    pub hints_remaining: u32,
    pub last_hint_grant: Option<Timestamp>,
}

impl SessionRecord {
    /// Encode as bincode.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        bincode::serialize(self).map_err(|e| EngineError::CorruptedState(e.to_string()))
    }

    /// Decode from bincode.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        bincode::deserialize(bytes).map_err(|e| EngineError::CorruptedState(e.to_string()))
    }

    /// Check that the saved board can be resumed as `level`.
    ///
    /// The level must match, the board must have that level's shape, and it
    /// must not already be solved (a record saved right after a win carries
    /// the next level number with the finished board).
    pub fn validate_for(&self, level: u32) -> Result<()> {
        if self.level != level {
            return Err(EngineError::CorruptedState(format!(
                "record is for level {}, requested {}",
                self.level, level
            )));
        }
        let difficulty = Difficulty::for_level(level);
        self.board.check_shape(difficulty.colors, difficulty.tube_count())?;
        if is_won(&self.board) {
            return Err(EngineError::CorruptedState("saved board is already solved".into()));
        }
        Ok(())
    }
}

/// Byte-oriented key-value storage supplied by the host.
pub trait PersistenceStore {
    fn load(&self, key: &str) -> Option<Vec<u8>>;
    fn save(&mut self, key: &str, value: Vec<u8>);
    fn remove(&mut self, key: &str);
}

/// In-memory store.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: FxHashMap<String, Vec<u8>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl PersistenceStore for MemoryStore {
    fn load(&self, key: &str) -> Option<Vec<u8>> {
        self.entries.get(key).cloned()
    }

    fn save(&mut self, key: &str, value: Vec<u8>) {
        self.entries.insert(key.to_string(), value);
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }
}

/// Write the record and its scalar copies.
pub fn save_record(store: &mut impl PersistenceStore, record: &SessionRecord) -> Result<()> {
    store.save(RECORD_KEY, record.to_bytes()?);
    store.save(LEVEL_KEY, encode_scalar(&record.level)?);
    if let Some(at) = record.last_hint_grant {
        store.save(LAST_GRANT_KEY, encode_scalar(&at)?);
    }
    Ok(())
}

/// Read the record, discarding it if it does not decode.
pub fn load_record(store: &impl PersistenceStore) -> Option<SessionRecord> {
    let bytes = store.load(RECORD_KEY)?;
    match SessionRecord::from_bytes(&bytes) {
        Ok(record) => Some(record),
        Err(e) => {
            warn!(error = %e, "discarding undecodable session record");
            None
        }
    }
}

/// Read the saved current level.
pub fn load_level(store: &impl PersistenceStore) -> Option<u32> {
    let level: u32 = decode_scalar(&store.load(LEVEL_KEY)?)?;
    (level >= 1).then_some(level)
}

/// Read the saved last hint grant time.
pub fn load_last_grant(store: &impl PersistenceStore) -> Option<Timestamp> {
    decode_scalar(&store.load(LAST_GRANT_KEY)?)
}

/// Remove everything the session writes.
pub fn clear(store: &mut impl PersistenceStore) {
    store.remove(RECORD_KEY);
    store.remove(LEVEL_KEY);
    store.remove(LAST_GRANT_KEY);
}

fn encode_scalar<T: Serialize>(value: &T) -> Result<Vec<u8>> {
    bincode::serialize(value).map_err(|e| EngineError::CorruptedState(e.to_string()))
}

fn decode_scalar<T: for<'de> Deserialize<'de>>(bytes: &[u8]) -> Option<T> {
    match bincode::deserialize(bytes) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(error = %e, "discarding undecodable scalar");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(level: u32) -> SessionRecord {
        SessionRecord {
            level,
            board: Board::from_rows(&[&[0, 1, 2, 0], &[1, 2, 0, 1], &[2, 0, 1, 2], &[], &[], &[]]).unwrap(),
            hints_remaining: 4,
            last_hint_grant: Some(Timestamp::from_millis(123_456)),
        }
    }

    #[test]
    fn test_record_bytes_round_trip() {
        let rec = record(3);
        let bytes = rec.to_bytes().unwrap();
        assert_eq!(SessionRecord::from_bytes(&bytes).unwrap(), rec);
    }

    #[test]
    fn test_garbage_bytes_are_corrupted() {
        let result = SessionRecord::from_bytes(&[0xff, 0x01]);
        assert!(matches!(result, Err(EngineError::CorruptedState(_))));
    }

    #[test]
    fn test_validate_for_level() {
        let rec = record(3);
        assert!(rec.validate_for(3).is_ok());
        assert!(rec.validate_for(4).is_err());
        // Level 20 expects four colors on seven tubes.
        assert!(record(20).validate_for(20).is_err());
    }

    #[test]
    fn test_validate_rejects_solved_board() {
        let mut rec = record(2);
        rec.board = Board::from_rows(&[&[0, 0, 0, 0], &[1, 1, 1, 1], &[2, 2, 2, 2], &[], &[], &[]]).unwrap();
        assert!(rec.validate_for(2).is_err());
    }

    #[test]
    fn test_store_round_trip() {
        let mut store = MemoryStore::new();
        let rec = record(5);
        save_record(&mut store, &rec).unwrap();

        assert_eq!(store.len(), 3);
        assert_eq!(load_record(&store), Some(rec));
        assert_eq!(load_level(&store), Some(5));
        assert_eq!(load_last_grant(&store), Some(Timestamp::from_millis(123_456)));

        clear(&mut store);
        assert!(store.is_empty());
        assert_eq!(load_record(&store), None);
    }

    #[test]
    fn test_corrupted_record_is_dropped() {
        let mut store = MemoryStore::new();
        store.save(RECORD_KEY, vec![1, 2, 3]);
        store.save(LEVEL_KEY, vec![9]);

        assert_eq!(load_record(&store), None);
        assert_eq!(load_level(&store), None);
    }
}
