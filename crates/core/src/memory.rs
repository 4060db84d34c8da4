//! In-process [`CharacterStore`] backed by a vector.
//!
//! Keeps records in insertion order so reverse lookup semantics match the
//! database implementation. Used by tests across the workspace.

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::character::CharacterRecord;
use crate::store::{CharacterStore, StoreError, Upserted};
use crate::types::CharId;

#[derive(Debug, Default)]
pub struct MemoryCharacterStore {
    records: Mutex<Vec<CharacterRecord>>,
}

impl MemoryCharacterStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every stored record, oldest first.
    pub async fn records(&self) -> Vec<CharacterRecord> {
        self.records.lock().await.clone()
    }

    /// Number of stored records sharing `char_id`.
    pub async fn count_by_char_id(&self, char_id: CharId) -> usize {
        self.records
            .lock()
            .await
            .iter()
            .filter(|r| r.char_id == char_id)
            .count()
    }
}

fn overwrite(records: &mut [CharacterRecord], record: &CharacterRecord) -> Option<CharacterRecord> {
    let existing = records.iter_mut().find(|r| r.char_id == record.char_id)?;
    existing.name.clone_from(&record.name);
    existing.photo_ref.clone_from(&record.photo_ref);
    Some(existing.clone())
}

#[async_trait]
impl CharacterStore for MemoryCharacterStore {
    async fn find_by_char_id(
        &self,
        char_id: CharId,
    ) -> Result<Option<CharacterRecord>, StoreError> {
        let records = self.records.lock().await;
        Ok(records.iter().find(|r| r.char_id == char_id).cloned())
    }

    async fn find_by_photo_ref(
        &self,
        photo_ref: &str,
    ) -> Result<Option<CharacterRecord>, StoreError> {
        let records = self.records.lock().await;
        Ok(records.iter().find(|r| r.photo_ref == photo_ref).cloned())
    }

    async fn insert(&self, record: &CharacterRecord) -> Result<CharacterRecord, StoreError> {
        self.records.lock().await.push(record.clone());
        Ok(record.clone())
    }

    async fn update_by_char_id(
        &self,
        char_id: CharId,
        name: &str,
        photo_ref: &str,
    ) -> Result<Option<CharacterRecord>, StoreError> {
        let update = CharacterRecord {
            name: name.to_string(),
            char_id,
            photo_ref: photo_ref.to_string(),
        };
        Ok(overwrite(&mut self.records.lock().await, &update))
    }

    async fn upsert_by_char_id(&self, record: &CharacterRecord) -> Result<Upserted, StoreError> {
        let mut records = self.records.lock().await;
        match overwrite(&mut records, record) {
            Some(updated) => Ok(Upserted::Updated(updated)),
            None => {
                records.push(record.clone());
                Ok(Upserted::Inserted(record.clone()))
            }
        }
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
