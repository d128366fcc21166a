//! Evaluation history storage.
//!
//! The history is an explicit, injectable collaborator of the evaluator
//! (no process-wide singleton), keyed by bounty id with last-write-wins
//! semantics. The in-memory implementation is unbounded and keeps entries
//! for the life of the process; nothing survives a restart. Both are
//! documented limitations, not bugs to fix here — a persistent backend
//! would implement [`HistoryStore`] and be injected in its place.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::EvaluationResult;

/// Errors from a history store backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("history store backend failed: {0}")]
    Backend(String),
}

/// Result type for history store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Keyed history of evaluation results.
///
/// `upsert` overwrites any previous entry for the same bounty id; when
/// evaluations of the same bounty race, the later completion wins. No
/// compare-and-swap or versioning exists.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Insert or replace the entry for `evaluation.bounty_id`.
    async fn upsert(&self, evaluation: EvaluationResult) -> StoreResult<()>;

    /// Fetch the latest entry for a bounty id.
    async fn get(&self, bounty_id: &str) -> StoreResult<Option<EvaluationResult>>;

    /// Snapshot of all entries, keyed by bounty id.
    async fn snapshot(&self) -> StoreResult<HashMap<String, EvaluationResult>>;
}

/// In-memory history store backed by a `HashMap<bounty_id, EvaluationResult>`.
#[derive(Debug, Default)]
pub struct MemoryHistoryStore {
    entries: Mutex<HashMap<String, EvaluationResult>>,
}

impl MemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, HashMap<String, EvaluationResult>>> {
        self.entries
            .lock()
            .map_err(|_| StoreError::Backend("history mutex poisoned".to_string()))
    }
}

#[async_trait]
impl HistoryStore for MemoryHistoryStore {
    async fn upsert(&self, evaluation: EvaluationResult) -> StoreResult<()> {
        let mut entries = self.lock()?;
        entries.insert(evaluation.bounty_id.clone(), evaluation);
        Ok(())
    }

    async fn get(&self, bounty_id: &str) -> StoreResult<Option<EvaluationResult>> {
        let entries = self.lock()?;
        Ok(entries.get(bounty_id).cloned())
    }

    async fn snapshot(&self) -> StoreResult<HashMap<String, EvaluationResult>> {
        let entries = self.lock()?;
        Ok(entries.clone())
    }
}
