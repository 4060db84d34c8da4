//! Character record types shared by every layer.

use serde::{Deserialize, Serialize};

use crate::types::CharId;

/// A character as the bot knows it: a display name, the business id, and the
/// content-derived identifier of the photo it was submitted with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterRecord {
    pub name: String,
    pub char_id: CharId,
    /// Telegram `file_unique_id` of the photo. Not unique across records.
    pub photo_ref: String,
}

/// The part of a record that can be recovered from caption text alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterFragment {
    pub name: String,
    pub char_id: CharId,
}

impl CharacterFragment {
    /// Attach the photo identifier, producing a storable record.
    pub fn with_photo(self, photo_ref: impl Into<String>) -> CharacterRecord {
        CharacterRecord {
            name: self.name,
            char_id: self.char_id,
            photo_ref: photo_ref.into(),
        }
    }
}
