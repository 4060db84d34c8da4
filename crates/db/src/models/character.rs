//! Character row model.

use charbot_core::character::CharacterRecord;
use charbot_core::types::{CharId, DbId};
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `characters` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Character {
    pub id: DbId,
    pub name: String,
    pub char_id: CharId,
    pub photo_ref: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Character> for CharacterRecord {
    fn from(row: Character) -> Self {
        CharacterRecord {
            name: row.name,
            char_id: row.char_id,
            photo_ref: row.photo_ref,
        }
    }
}
