//! PostgreSQL implementation of [`CharacterStore`].

use async_trait::async_trait;
use charbot_core::character::CharacterRecord;
use charbot_core::store::{CharacterStore, StoreError, Upserted};
use charbot_core::types::CharId;

use crate::repositories::CharacterRepo;
use crate::DbPool;

/// [`CharacterStore`] over a shared connection pool.
///
/// Cloning is cheap; clones share the pool.
#[derive(Clone)]
pub struct PgCharacterStore {
    pool: DbPool,
}

impl PgCharacterStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map a sqlx error onto the store's taxonomy.
///
/// PostgreSQL unique violations (SQLSTATE 23505) become
/// [`StoreError::DuplicateKey`]; everything else is a backend failure.
/// Callers log the failure.
fn to_store_error(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some("23505") {
            let constraint = db_err.constraint().unwrap_or("unknown");
            return StoreError::DuplicateKey(constraint.to_string());
        }
    }
    StoreError::Backend(err.to_string())
}

#[async_trait]
impl CharacterStore for PgCharacterStore {
    async fn find_by_char_id(
        &self,
        char_id: CharId,
    ) -> Result<Option<CharacterRecord>, StoreError> {
        let row = CharacterRepo::find_by_char_id(&self.pool, char_id)
            .await
            .map_err(to_store_error)?;
        Ok(row.map(Into::into))
    }

    async fn find_by_photo_ref(
        &self,
        photo_ref: &str,
    ) -> Result<Option<CharacterRecord>, StoreError> {
        let row = CharacterRepo::find_by_photo_ref(&self.pool, photo_ref)
            .await
            .map_err(to_store_error)?;
        Ok(row.map(Into::into))
    }

    async fn insert(&self, record: &CharacterRecord) -> Result<CharacterRecord, StoreError> {
        let row = CharacterRepo::create(&self.pool, record)
            .await
            .map_err(to_store_error)?;
        Ok(row.into())
    }

    async fn update_by_char_id(
        &self,
        char_id: CharId,
        name: &str,
        photo_ref: &str,
    ) -> Result<Option<CharacterRecord>, StoreError> {
        let row = CharacterRepo::update_by_char_id(&self.pool, char_id, name, photo_ref)
            .await
            .map_err(to_store_error)?;
        Ok(row.map(Into::into))
    }

    async fn upsert_by_char_id(&self, record: &CharacterRecord) -> Result<Upserted, StoreError> {
        let (row, inserted) = CharacterRepo::upsert_by_char_id(&self.pool, record)
            .await
            .map_err(to_store_error)?;
        Ok(if inserted {
            Upserted::Inserted(row.into())
        } else {
            Upserted::Updated(row.into())
        })
    }

    async fn ping(&self) -> Result<(), StoreError> {
        crate::health_check(&self.pool)
            .await
            .map_err(to_store_error)
    }
}
