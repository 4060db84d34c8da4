//! Manual character registration by privileged users.

use std::collections::HashSet;

use crate::character::CharacterRecord;
use crate::error::CoreError;
use crate::store::CharacterStore;
use crate::types::{CharId, UserId};

/// Static set of user ids allowed to register characters by hand.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdminAllowList {
    ids: HashSet<UserId>,
}

impl AdminAllowList {
    pub fn new(ids: impl IntoIterator<Item = UserId>) -> Self {
        Self {
            ids: ids.into_iter().collect(),
        }
    }

    /// Parse a comma-separated id list such as `"123, 456"`. Empty entries are
    /// skipped.
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        raw.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| {
                s.parse::<UserId>()
                    .map_err(|_| CoreError::Validation(format!("Invalid admin id '{s}'")))
            })
            .collect::<Result<HashSet<_>, _>>()
            .map(|ids| Self { ids })
    }

    pub fn contains(&self, user_id: UserId) -> bool {
        self.ids.contains(&user_id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Register a character on behalf of `actor_id`.
///
/// Authorization is checked before input validation, and neither failure
/// touches the store. Unlike caption reconciliation this always inserts, so an
/// admin can create a second record for an existing `char_id`.
pub async fn register_manual(
    store: &dyn CharacterStore,
    admins: &AdminAllowList,
    actor_id: UserId,
    name: &str,
    char_id: &str,
    photo_ref: &str,
) -> Result<CharacterRecord, CoreError> {
    if !admins.contains(actor_id) {
        tracing::warn!(actor_id, "Rejected manual registration from non-admin");
        return Err(CoreError::Unauthorized(
            "Only admins can register characters".to_string(),
        ));
    }

    let name = name.trim();
    if name.is_empty() {
        return Err(CoreError::Validation(
            "Character name must not be empty".to_string(),
        ));
    }
    let char_id: CharId = char_id
        .trim()
        .parse()
        .map_err(|_| CoreError::Validation(format!("Character id '{char_id}' is not a number")))?;

    let record = store
        .insert(&CharacterRecord {
            name: name.to_string(),
            char_id,
            photo_ref: photo_ref.to_string(),
        })
        .await?;

    tracing::info!(actor_id, char_id, photo_ref, "Character registered manually");
    Ok(record)
}
