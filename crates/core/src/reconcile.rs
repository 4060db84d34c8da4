//! Reconciliation of parsed captions against stored characters, and the
//! reverse lookup from a photo back to its character.

use crate::character::{CharacterFragment, CharacterRecord};
use crate::error::CoreError;
use crate::store::{CharacterStore, Upserted};

/// Result of submitting a parsed caption.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// No record had this `char_id`; a new one was created.
    Added(CharacterRecord),
    /// The record with this `char_id` now carries the new name and photo.
    Updated(CharacterRecord),
}

impl Outcome {
    pub fn record(&self) -> &CharacterRecord {
        match self {
            Outcome::Added(record) | Outcome::Updated(record) => record,
        }
    }
}

/// Insert or update the character described by `fragment`, keyed on
/// `char_id`, associating it with `photo_ref`.
///
/// Uses the store's atomic upsert so concurrent submissions of the same
/// `char_id` never produce duplicates.
pub async fn reconcile(
    store: &dyn CharacterStore,
    fragment: CharacterFragment,
    photo_ref: &str,
) -> Result<Outcome, CoreError> {
    let record = fragment.with_photo(photo_ref);
    let outcome = match store.upsert_by_char_id(&record).await? {
        Upserted::Inserted(record) => Outcome::Added(record),
        Upserted::Updated(record) => Outcome::Updated(record),
    };

    tracing::info!(
        char_id = outcome.record().char_id,
        photo_ref,
        added = matches!(outcome, Outcome::Added(_)),
        "Character reconciled"
    );
    Ok(outcome)
}

/// Resolve a photo identifier to the character stored with it.
pub async fn lookup(
    store: &dyn CharacterStore,
    photo_ref: &str,
) -> Result<Option<CharacterRecord>, CoreError> {
    Ok(store.find_by_photo_ref(photo_ref).await?)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use assert_matches::assert_matches;

    use super::*;
    use crate::memory::MemoryCharacterStore;

    fn fragment(name: &str, char_id: i64) -> CharacterFragment {
        CharacterFragment {
            name: name.to_string(),
            char_id,
        }
    }

    #[tokio::test]
    async fn first_submission_adds() {
        let store = MemoryCharacterStore::new();
        let outcome = reconcile(&store, fragment("Thor", 7), "p7").await.unwrap();

        assert_matches!(outcome, Outcome::Added(ref r) if r.name == "Thor" && r.char_id == 7);
        assert_eq!(store.records().await.len(), 1);
    }

    #[tokio::test]
    async fn resubmission_updates_without_duplicating() {
        let store = MemoryCharacterStore::new();
        let first = reconcile(&store, fragment("Thor", 7), "p7").await.unwrap();
        let second = reconcile(&store, fragment("Thor", 7), "p7").await.unwrap();

        assert_matches!(first, Outcome::Added(_));
        assert_matches!(second, Outcome::Updated(_));
        assert_eq!(store.count_by_char_id(7).await, 1);
    }

    #[tokio::test]
    async fn resubmission_reassigns_photo_and_name() {
        let store = MemoryCharacterStore::new();
        reconcile(&store, fragment("Hulk", 42), "A").await.unwrap();
        let outcome = reconcile(&store, fragment("Bruce Banner", 42), "B")
            .await
            .unwrap();

        assert_matches!(outcome, Outcome::Updated(_));
        let records = store.records().await;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].photo_ref, "B");
        assert_eq!(records[0].name, "Bruce Banner");
        assert!(lookup(&store, "A").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn distinct_ids_are_independent() {
        let store = MemoryCharacterStore::new();
        reconcile(&store, fragment("Thor", 7), "p7").await.unwrap();
        reconcile(&store, fragment("Loki", 8), "p8").await.unwrap();

        assert_eq!(store.records().await.len(), 2);
    }

    #[tokio::test]
    async fn lookup_round_trip() {
        let store = MemoryCharacterStore::new();
        reconcile(&store, fragment("Thor", 7), "p7").await.unwrap();

        let found = lookup(&store, "p7").await.unwrap().unwrap();
        assert_eq!(found.name, "Thor");
        assert_eq!(found.char_id, 7);
        assert!(lookup(&store, "unknown").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn lookup_with_shared_photo_returns_oldest() {
        let store = MemoryCharacterStore::new();
        reconcile(&store, fragment("Thor", 7), "shared").await.unwrap();
        reconcile(&store, fragment("Loki", 8), "shared").await.unwrap();

        let found = lookup(&store, "shared").await.unwrap().unwrap();
        assert_eq!(found.char_id, 7);
    }

    #[tokio::test]
    async fn concurrent_submissions_leave_one_record() {
        let store = Arc::new(MemoryCharacterStore::new());
        let payloads: Vec<(String, String)> = (0..16)
            .map(|i| (format!("Name {i}"), format!("photo-{i}")))
            .collect();

        let tasks = payloads.iter().cloned().map(|(name, photo)| {
            let store = Arc::clone(&store);
            tokio::spawn(async move {
                reconcile(store.as_ref(), fragment(&name, 42), &photo).await
            })
        });
        for result in futures::future::join_all(tasks).await {
            result.unwrap().unwrap();
        }

        let records = store.records().await;
        assert_eq!(records.len(), 1);
        assert!(payloads
            .iter()
            .any(|(name, photo)| records[0].name == *name && records[0].photo_ref == *photo));
    }
}
