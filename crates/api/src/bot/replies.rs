//! User-facing reply texts.
//!
//! Replies are sent with HTML parse mode; user-supplied names are escaped.

use charbot_core::character::CharacterRecord;
use charbot_telegram::types::ParseMode;

/// Everything the bot can say back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// A captioned photo created a new character.
    Added(CharacterRecord),
    /// A captioned photo refreshed an existing character.
    Updated(CharacterRecord),
    /// An admin registered a character with `/addchar`.
    Registered(CharacterRecord),
    /// `/name` found the character for the replied-to photo.
    Identified(CharacterRecord),
    /// `/name` found nothing for the replied-to photo.
    NotFound,
    /// `/name` was not a reply to a photo.
    ReplyToPhoto,
    /// `/addchar` was not a reply to a photo.
    ReplyToPhotoWithCommand,
    /// `/addchar` from someone outside the admin list.
    Unauthorized,
    /// `/addchar` with missing or malformed arguments.
    AddCharUsage,
    /// Any persistence failure.
    Failed,
}

impl Reply {
    pub fn parse_mode(&self) -> Option<ParseMode> {
        Some(ParseMode::Html)
    }

    pub fn text(&self) -> String {
        match self {
            Reply::Added(record) => format!("✅ Character added!\n\n{}", card(record)),
            Reply::Updated(record) => format!("✅ Character updated!\n\n{}", card(record)),
            Reply::Registered(record) => {
                format!("✅ Character added successfully!\n\n{}", card(record))
            }
            Reply::Identified(record) => format!(
                "🔍 Character identified!\n\n\
                 👤 Character name: {name}\n\
                 🆔 ID: {id}\n\n\
                 💡 Use: <code>/collect {name}</code>",
                name = escape_html(&record.name),
                id = record.char_id,
            ),
            Reply::NotFound => "❌ Character not found in database!".to_string(),
            Reply::ReplyToPhoto => "❌ Please reply to a character image!".to_string(),
            Reply::ReplyToPhotoWithCommand => {
                "❌ Please reply to a character image with the command!".to_string()
            }
            Reply::Unauthorized => "❌ Only admins can add characters!".to_string(),
            Reply::AddCharUsage => "❌ Please provide character name and id!\n\
                                    Usage: <code>/addchar &lt;name&gt; &lt;id&gt;</code>"
                .to_string(),
            Reply::Failed => "❌ An error occurred!".to_string(),
        }
    }
}

fn card(record: &CharacterRecord) -> String {
    format!(
        "👤 Name: {}\n🆔 ID: {}",
        escape_html(&record.name),
        record.char_id
    )
}

/// Escape the three characters Telegram's HTML mode requires escaped.
fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
