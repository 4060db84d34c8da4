//! Slash-command parsing.

use charbot_telegram::types::BotCommand;

/// Commands the bot understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    /// `/name`: identify the character in the replied-to photo.
    Name,
    /// `/addchar <name> <id>`: admin-only manual registration.
    AddChar,
}

impl CommandKind {
    pub fn from_name(name: &str) -> Option<Self> {
        if name.eq_ignore_ascii_case("name") {
            Some(Self::Name)
        } else if name.eq_ignore_ascii_case("addchar") {
            Some(Self::AddChar)
        } else {
            None
        }
    }
}

/// Entries published with `setMyCommands` at startup.
pub fn menu() -> Vec<BotCommand> {
    vec![
        BotCommand::new("name", "Identify character name from image"),
        BotCommand::new("addchar", "Add a character to database (Admin only)"),
    ]
}

/// A `/command[@bot] args...` split into parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedCommand<'a> {
    pub name: &'a str,
    /// Bot username after `@`, when addressed explicitly.
    pub mention: Option<&'a str>,
    /// Everything after the command token, trimmed.
    pub args: &'a str,
}

impl ParsedCommand<'_> {
    /// Whether this command is meant for the bot called `username`.
    ///
    /// Unaddressed commands are for everyone; addressed ones only for the
    /// named bot. Without a known username every command is accepted.
    pub fn is_for(&self, username: Option<&str>) -> bool {
        match (self.mention, username) {
            (Some(mention), Some(username)) => mention.eq_ignore_ascii_case(username),
            _ => true,
        }
    }
}

/// Split text starting with `/` into a command. Returns `None` for ordinary
/// text or a bare `/`.
pub fn parse(text: &str) -> Option<ParsedCommand<'_>> {
    let rest = text.trim_start().strip_prefix('/')?;
    let (token, args) = rest
        .split_once(char::is_whitespace)
        .unwrap_or((rest, ""));

    let (name, mention) = match token.split_once('@') {
        Some((name, mention)) => (name, Some(mention)),
        None => (token, None),
    };
    if name.is_empty() {
        return None;
    }

    Some(ParsedCommand {
        name,
        mention,
        args: args.trim(),
    })
}

/// Split `/addchar` arguments into `(name, id)`.
///
/// Exactly two whitespace-separated tokens are accepted. The id is not
/// validated here.
pub fn split_name_and_id(args: &str) -> Option<(&str, &str)> {
    let mut tokens = args.split_whitespace();
    match (tokens.next(), tokens.next(), tokens.next()) {
        (Some(name), Some(id), None) => Some((name, id)),
        _ => None,
    }
}
