//! Message type for the core model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{chat::Chat, user::User};

/// A single incoming message. `user` is `None` for channel posts and other sender-less updates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub user: Option<User>,
    pub chat: Chat,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Sender id, or 0 when the message has no sender. Used for log fields only.
    pub fn user_id(&self) -> i64 {
        self.user.as_ref().map(|u| u.id).unwrap_or_default()
    }

    /// Key of the per-(user, chat) context: `telegram_{user_id}_{chat_id}`. `None` without a sender.
    pub fn context_key(&self) -> Option<String> {
        self.user
            .as_ref()
            .map(|user| format!("telegram_{}_{}", user.id, self.chat.id))
    }
}
