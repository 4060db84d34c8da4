//! Caption parsing.
//!
//! Character cards arrive as photos whose caption contains, among other
//! decorative lines, a labelled name line and a labelled id line:
//!
//! ```text
//! 👤 ɴᴀᴍᴇ: Iron Man
//! 🆔 ɪᴅ: 1042
//! ```
//!
//! The labels use small-capital glyphs, not ASCII. Anything else in the
//! caption is ignored.

use std::sync::LazyLock;

use regex::Regex;

use crate::character::CharacterFragment;

// ---------------------------------------------------------------------------
// Patterns
// ---------------------------------------------------------------------------

/// Name marker; captures the rest of the line. Horizontal whitespace only
/// after the colon so an empty name line never swallows the next line.
pub const NAME_PATTERN: &str = r"👤\s*ɴᴀᴍᴇ:[^\S\n]*([^\n]*)";

/// Id marker; captures the leading run of ASCII digits.
pub const ID_PATTERN: &str = r"🆔\s*ɪᴅ:\s*([0-9]+)";

static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(NAME_PATTERN).expect("valid regex"));

static ID_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(ID_PATTERN).expect("valid regex"));

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Extract a character fragment from caption text.
///
/// Returns `None` when either marker is missing, the name is blank, or the id
/// does not fit in an `i64`. Malformed captions are expected (most photos are
/// not character cards), so this never errors.
pub fn parse(text: &str) -> Option<CharacterFragment> {
    let name = NAME_RE.captures(text)?.get(1)?.as_str().trim();
    if name.is_empty() {
        return None;
    }

    let char_id = ID_RE.captures(text)?.get(1)?.as_str().parse().ok()?;

    Some(CharacterFragment {
        name: name.to_string(),
        char_id,
    })
}

/// [`parse`] for an optional caption; a missing caption is never a card.
pub fn parse_optional(text: Option<&str>) -> Option<CharacterFragment> {
    text.and_then(parse)
}
