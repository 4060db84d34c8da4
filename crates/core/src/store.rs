//! Persistence seam for character records.
//!
//! The engines in [`crate::reconcile`] and [`crate::admin`] depend only on
//! [`CharacterStore`]; the PostgreSQL implementation lives in `charbot-db`
//! and an in-memory one in [`crate::memory`].

use async_trait::async_trait;

use crate::character::CharacterRecord;
use crate::types::CharId;

/// Errors surfaced by a [`CharacterStore`] backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The backend enforces a uniqueness constraint that the write violated.
    #[error("Duplicate key: {0}")]
    DuplicateKey(String),

    /// Connection, I/O or query failure in the backend.
    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// Which branch an atomic upsert took.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Upserted {
    Inserted(CharacterRecord),
    Updated(CharacterRecord),
}

/// Operations the bot needs from the character collection.
///
/// Every method is a suspension point; implementations must be safe to call
/// from many concurrently handled updates.
#[async_trait]
pub trait CharacterStore: Send + Sync {
    async fn find_by_char_id(&self, char_id: CharId)
        -> Result<Option<CharacterRecord>, StoreError>;

    /// Return the first record (by insertion order) carrying `photo_ref`.
    async fn find_by_photo_ref(
        &self,
        photo_ref: &str,
    ) -> Result<Option<CharacterRecord>, StoreError>;

    async fn insert(&self, record: &CharacterRecord) -> Result<CharacterRecord, StoreError>;

    /// Overwrite `name` and `photo_ref` of the record with `char_id`.
    ///
    /// Returns `None` if no such record exists.
    async fn update_by_char_id(
        &self,
        char_id: CharId,
        name: &str,
        photo_ref: &str,
    ) -> Result<Option<CharacterRecord>, StoreError>;

    /// Insert `record`, or overwrite `name`/`photo_ref` of the record with the
    /// same `char_id`, as a single atomic step.
    async fn upsert_by_char_id(&self, record: &CharacterRecord) -> Result<Upserted, StoreError>;

    /// Cheap connectivity probe.
    async fn ping(&self) -> Result<(), StoreError>;
}
