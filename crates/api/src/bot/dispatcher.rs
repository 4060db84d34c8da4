//! Routes incoming updates to the caption, `/name` and `/addchar` flows.
//!
//! Each update is handled independently. Every failure stays inside
//! [`Dispatcher::handle`]: persistence errors are logged with context and
//! answered with a generic notice, send failures are logged and dropped.

use std::sync::Arc;

use charbot_core::admin::{register_manual, AdminAllowList};
use charbot_core::caption;
use charbot_core::error::CoreError;
use charbot_core::reconcile::{lookup, reconcile, Outcome};
use charbot_core::store::CharacterStore;
use charbot_telegram::types::{Message, OutgoingReply, Update};
use charbot_telegram::Messenger;

use crate::bot::command::{self, CommandKind};
use crate::bot::replies::Reply;

pub struct Dispatcher {
    store: Arc<dyn CharacterStore>,
    messenger: Arc<dyn Messenger>,
    admins: AdminAllowList,
    /// Own username, used to ignore commands addressed to other bots.
    bot_username: Option<String>,
}

impl Dispatcher {
    pub fn new(
        store: Arc<dyn CharacterStore>,
        messenger: Arc<dyn Messenger>,
        admins: AdminAllowList,
        bot_username: Option<String>,
    ) -> Self {
        Self {
            store,
            messenger,
            admins,
            bot_username,
        }
    }

    pub fn store(&self) -> &dyn CharacterStore {
        self.store.as_ref()
    }

    pub fn messenger(&self) -> &dyn Messenger {
        self.messenger.as_ref()
    }

    /// Handle one update end to end: decide the reply and send it.
    pub async fn handle(&self, update: Update) {
        let Some(message) = update.message else {
            return;
        };
        let Some(reply) = self.route(&message).await else {
            return;
        };

        let outgoing = OutgoingReply {
            chat_id: message.chat.id,
            reply_to_message_id: message.message_id,
            text: reply.text(),
            parse_mode: reply.parse_mode(),
        };
        if let Err(e) = self.messenger.send(&outgoing).await {
            tracing::warn!(
                update_id = update.update_id,
                chat_id = outgoing.chat_id,
                error = %e,
                "Failed to send reply"
            );
        }
    }

    /// Decide how to answer `message`, performing any store writes.
    ///
    /// Returns `None` when the message is silently ignored. Commands the bot
    /// does not know fall through, so a captioned photo is still submitted.
    pub async fn route(&self, message: &Message) -> Option<Reply> {
        let content = message.text.as_deref().or(message.caption.as_deref());

        if let Some(cmd) = content.and_then(command::parse) {
            if !cmd.is_for(self.bot_username.as_deref()) {
                return None;
            }
            match CommandKind::from_name(cmd.name) {
                Some(CommandKind::Name) => return Some(self.identify(message).await),
                Some(CommandKind::AddChar) => {
                    return Some(self.add_character(message, cmd.args).await)
                }
                None => {}
            }
        }

        if message.is_private() {
            return self.submit_caption(message).await;
        }
        None
    }

    /// Photo with a character caption: reconcile it by `char_id`.
    async fn submit_caption(&self, message: &Message) -> Option<Reply> {
        let photo = message.largest_photo()?;
        let fragment = caption::parse_optional(message.caption.as_deref())?;
        let char_id = fragment.char_id;

        match reconcile(self.store(), fragment, &photo.file_unique_id).await {
            Ok(Outcome::Added(record)) => Some(Reply::Added(record)),
            Ok(Outcome::Updated(record)) => Some(Reply::Updated(record)),
            Err(e) => {
                tracing::error!(
                    char_id,
                    photo_ref = %photo.file_unique_id,
                    chat_id = message.chat.id,
                    error = %e,
                    "Error handling character message"
                );
                Some(Reply::Failed)
            }
        }
    }

    /// `/name` in reply to a photo: reverse lookup by the photo's unique id.
    async fn identify(&self, message: &Message) -> Reply {
        let Some(photo) = message
            .reply_to_message
            .as_deref()
            .and_then(Message::largest_photo)
        else {
            return Reply::ReplyToPhoto;
        };

        match lookup(self.store(), &photo.file_unique_id).await {
            Ok(Some(record)) => Reply::Identified(record),
            Ok(None) => Reply::NotFound,
            Err(e) => {
                tracing::error!(
                    photo_ref = %photo.file_unique_id,
                    chat_id = message.chat.id,
                    error = %e,
                    "Error in name command"
                );
                Reply::Failed
            }
        }
    }

    /// `/addchar <name> <id>` in reply to a photo, admins only.
    ///
    /// Checks run in order: privilege, reply target, arguments.
    async fn add_character(&self, message: &Message, args: &str) -> Reply {
        let Some(actor_id) = message.sender_id().filter(|id| self.admins.contains(*id)) else {
            tracing::warn!(
                sender_id = ?message.sender_id(),
                chat_id = message.chat.id,
                "Non-admin attempted /addchar"
            );
            return Reply::Unauthorized;
        };

        let Some(photo) = message
            .reply_to_message
            .as_deref()
            .and_then(Message::largest_photo)
        else {
            return Reply::ReplyToPhotoWithCommand;
        };

        let Some((name, char_id)) = command::split_name_and_id(args) else {
            return Reply::AddCharUsage;
        };

        match register_manual(
            self.store(),
            &self.admins,
            actor_id,
            name,
            char_id,
            &photo.file_unique_id,
        )
        .await
        {
            Ok(record) => Reply::Registered(record),
            Err(CoreError::Unauthorized(_)) => Reply::Unauthorized,
            Err(CoreError::Validation(_)) => Reply::AddCharUsage,
            Err(e @ CoreError::Persistence(_)) => {
                tracing::error!(
                    actor_id,
                    photo_ref = %photo.file_unique_id,
                    error = %e,
                    "Error in add_character"
                );
                Reply::Failed
            }
        }
    }
}
