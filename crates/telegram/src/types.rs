//! Bot API wire types.
//!
//! Only the fields the bot reads are modelled; serde ignores the rest.

use serde::{Deserialize, Serialize};

/// Envelope every Bot API method responds with.
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    pub ok: bool,
    pub result: Option<T>,
    pub description: Option<String>,
    pub error_code: Option<i32>,
}

/// An incoming update. Non-message updates carry `message: None`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Update {
    pub update_id: i64,
    #[serde(default)]
    pub message: Option<Message>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub message_id: i64,
    #[serde(default)]
    pub from: Option<User>,
    pub chat: Chat,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub caption: Option<String>,
    /// Available sizes of the photo, smallest first.
    #[serde(default)]
    pub photo: Option<Vec<PhotoSize>>,
    #[serde(default)]
    pub reply_to_message: Option<Box<Message>>,
}

impl Message {
    /// The largest available size of the attached photo.
    ///
    /// Each size has its own `file_unique_id`, so always reading the largest
    /// keeps identifiers stable across messages carrying the same image.
    pub fn largest_photo(&self) -> Option<&PhotoSize> {
        self.photo
            .as_deref()?
            .iter()
            .max_by_key(|p| u64::from(p.width) * u64::from(p.height))
    }

    pub fn is_private(&self) -> bool {
        self.chat.kind == ChatKind::Private
    }

    pub fn sender_id(&self) -> Option<i64> {
        self.from.as_ref().map(|u| u.id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    #[serde(default)]
    pub is_bot: bool,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub username: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chat {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: ChatKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatKind {
    Private,
    Group,
    Supergroup,
    Channel,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhotoSize {
    pub file_id: String,
    /// Stable across bots and time for the same file; used as `photo_ref`.
    pub file_unique_id: String,
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub file_size: Option<u64>,
}

/// Entry for `setMyCommands`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BotCommand {
    pub command: String,
    pub description: String,
}

impl BotCommand {
    pub fn new(command: &str, description: &str) -> Self {
        Self {
            command: command.to_string(),
            description: description.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ParseMode {
    #[serde(rename = "HTML")]
    Html,
}

/// A text message to send in reply to an incoming one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingReply {
    pub chat_id: i64,
    pub reply_to_message_id: i64,
    pub text: String,
    pub parse_mode: Option<ParseMode>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn photo_message_json() -> serde_json::Value {
        serde_json::json!({
            "update_id": 10,
            "message": {
                "message_id": 5,
                "from": { "id": 77, "is_bot": false, "first_name": "Ann" },
                "chat": { "id": 77, "type": "private" },
                "date": 1700000000,
                "caption": "👤 ɴᴀᴍᴇ: Thor\n🆔 ɪᴅ: 7",
                "photo": [
                    { "file_id": "s", "file_unique_id": "small", "width": 90, "height": 90 },
                    { "file_id": "l", "file_unique_id": "large", "width": 1280, "height": 960 },
                    { "file_id": "m", "file_unique_id": "medium", "width": 320, "height": 240 }
                ]
            }
        })
    }

    #[test]
    fn decodes_photo_message() {
        let update: Update = serde_json::from_value(photo_message_json()).unwrap();
        let message = update.message.unwrap();

        assert!(message.is_private());
        assert_eq!(message.sender_id(), Some(77));
        assert_eq!(message.largest_photo().unwrap().file_unique_id, "large");
    }

    #[test]
    fn decodes_unknown_chat_type() {
        let chat: Chat =
            serde_json::from_value(serde_json::json!({ "id": 1, "type": "forum_topic" })).unwrap();
        assert_eq!(chat.kind, ChatKind::Unknown);
    }

    #[test]
    fn non_message_update_has_no_message() {
        let update: Update =
            serde_json::from_value(serde_json::json!({ "update_id": 3, "edited_message": {} }))
                .unwrap();
        assert!(update.message.is_none());
    }

    #[test]
    fn message_without_photo_has_no_largest_photo() {
        let message: Message = serde_json::from_value(serde_json::json!({
            "message_id": 1,
            "chat": { "id": 1, "type": "group" },
            "text": "/name"
        }))
        .unwrap();
        assert!(message.largest_photo().is_none());
        assert!(!message.is_private());
    }

    #[test]
    fn parse_mode_serializes_as_bot_api_name() {
        assert_eq!(serde_json::to_value(ParseMode::Html).unwrap(), "HTML");
    }
}
