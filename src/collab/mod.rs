//! Storage seams for user records and accepted run data.
//!
//! The validator itself is storage-agnostic; callers plug in whatever backs
//! their deployment. The in-memory store here backs tests and the CLI.

use hashbrown::HashMap;
use thiserror::Error;
use uuid::Uuid;

use crate::protocol::{CharacterInfo, GameplayLogEntry, VirtueInfo};

#[derive(Debug, Error)]
pub enum CollabError {
    #[error("no record for user: {0}")]
    UnknownUser(String),

    #[error("storage backend failure: {0}")]
    Backend(String),
}

/// Per-user attempt bookkeeping
pub trait UserRecordStore {
    /// Wall-clock milliseconds at which the user's latest attempt was
    /// granted, if any.
    fn last_attempt_granted_ms(&self, user_name: &str) -> Result<Option<u64>, CollabError>;

    /// Stamp a fresh attempt grant for the user.
    fn grant_attempt(&mut self, user_name: &str, granted_at_ms: u64) -> Result<(), CollabError>;
}

/// One accepted run, as persisted
#[derive(Debug, Clone)]
pub struct GameDataRow {
    pub id: Uuid,
    pub user_name: String,
    pub claimed_score: i64,
    pub canonical_score: i64,
    pub character_info: CharacterInfo,
    pub virtue_info: VirtueInfo,
    pub gameplay_log: Vec<GameplayLogEntry>,
}

/// Persistence for accepted runs
pub trait GameDataStore {
    fn persist(&mut self, row: GameDataRow) -> Result<(), CollabError>;
}

/// HashMap-backed store for tests and single-process use
#[derive(Debug, Default)]
pub struct MemoryStore {
    grants: HashMap<String, u64>,
    rows: Vec<GameDataRow>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> &[GameDataRow] {
        &self.rows
    }
}

impl UserRecordStore for MemoryStore {
    fn last_attempt_granted_ms(&self, user_name: &str) -> Result<Option<u64>, CollabError> {
        Ok(self.grants.get(user_name).copied())
    }

    fn grant_attempt(&mut self, user_name: &str, granted_at_ms: u64) -> Result<(), CollabError> {
        self.grants.insert(user_name.to_string(), granted_at_ms);
        Ok(())
    }
}

impl GameDataStore for MemoryStore {
    fn persist(&mut self, row: GameDataRow) -> Result<(), CollabError> {
        self.rows.push(row);
        Ok(())
    }
}
