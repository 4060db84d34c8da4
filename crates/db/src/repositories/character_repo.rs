//! Repository for the `characters` table.

use charbot_core::character::CharacterRecord;
use charbot_core::types::CharId;
use sqlx::PgPool;

use crate::models::character::Character;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, char_id, photo_ref, created_at, updated_at";

/// Provides the lookups and writes the bot performs on characters.
///
/// `char_id` is not unique at the schema level (see the migration), so every
/// single-row query picks the oldest matching row.
pub struct CharacterRepo;

impl CharacterRepo {
    /// Insert a new character, returning the created row.
    pub async fn create(pool: &PgPool, input: &CharacterRecord) -> Result<Character, sqlx::Error> {
        sqlx::query_as::<_, Character>(&insert_query())
            .bind(&input.name)
            .bind(input.char_id)
            .bind(&input.photo_ref)
            .fetch_one(pool)
            .await
    }

    /// Find the oldest character with the given business id.
    pub async fn find_by_char_id(
        pool: &PgPool,
        char_id: CharId,
    ) -> Result<Option<Character>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM characters
             WHERE char_id = $1
             ORDER BY id ASC
             LIMIT 1"
        );
        sqlx::query_as::<_, Character>(&query)
            .bind(char_id)
            .fetch_optional(pool)
            .await
    }

    /// Find the oldest character whose photo has the given unique id.
    pub async fn find_by_photo_ref(
        pool: &PgPool,
        photo_ref: &str,
    ) -> Result<Option<Character>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM characters
             WHERE photo_ref = $1
             ORDER BY id ASC
             LIMIT 1"
        );
        sqlx::query_as::<_, Character>(&query)
            .bind(photo_ref)
            .fetch_optional(pool)
            .await
    }

    /// Overwrite name and photo of the oldest row with `char_id`.
    ///
    /// Returns `None` if no row with the given `char_id` exists.
    pub async fn update_by_char_id(
        pool: &PgPool,
        char_id: CharId,
        name: &str,
        photo_ref: &str,
    ) -> Result<Option<Character>, sqlx::Error> {
        sqlx::query_as::<_, Character>(&update_oldest_query())
            .bind(char_id)
            .bind(name)
            .bind(photo_ref)
            .fetch_optional(pool)
            .await
    }

    /// Insert or update by `char_id` in one transaction.
    ///
    /// A transaction-scoped advisory lock on `char_id` serializes concurrent
    /// upserts of the same character across connections and processes.
    /// Returns the resulting row and `true` if it was inserted.
    pub async fn upsert_by_char_id(
        pool: &PgPool,
        input: &CharacterRecord,
    ) -> Result<(Character, bool), sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("SELECT pg_advisory_xact_lock($1)")
            .bind(input.char_id)
            .execute(&mut *tx)
            .await?;

        let updated = sqlx::query_as::<_, Character>(&update_oldest_query())
            .bind(input.char_id)
            .bind(&input.name)
            .bind(&input.photo_ref)
            .fetch_optional(&mut *tx)
            .await?;

        let result = match updated {
            Some(row) => (row, false),
            None => {
                let row = sqlx::query_as::<_, Character>(&insert_query())
                    .bind(&input.name)
                    .bind(input.char_id)
                    .bind(&input.photo_ref)
                    .fetch_one(&mut *tx)
                    .await?;
                (row, true)
            }
        };

        tx.commit().await?;
        Ok(result)
    }

    /// Count rows carrying `char_id`.
    pub async fn count_by_char_id(pool: &PgPool, char_id: CharId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM characters WHERE char_id = $1")
            .bind(char_id)
            .fetch_one(pool)
            .await
    }
}

fn insert_query() -> String {
    format!(
        "INSERT INTO characters (name, char_id, photo_ref)
         VALUES ($1, $2, $3)
         RETURNING {COLUMNS}"
    )
}

fn update_oldest_query() -> String {
    format!(
        "UPDATE characters SET name = $2, photo_ref = $3
         WHERE id = (
             SELECT id FROM characters WHERE char_id = $1 ORDER BY id ASC LIMIT 1
         )
         RETURNING {COLUMNS}"
    )
}
