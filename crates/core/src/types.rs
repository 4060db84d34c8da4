/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// Business identifier of a character, as printed in captions.
pub type CharId = i64;

/// Telegram user identifier.
pub type UserId = i64;
