//! Conversation types and data structures.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Minimal identity projection of a chat participant.
///
/// This is the only shape either read path exposes about a user; both the
/// preview and the detail share it so they can never drift apart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Participant {
    /// User id.
    pub id: Uuid,
    /// Display name.
    pub name: String,
}

/// A two-party conversation.
///
/// `{user1_id, user2_id}` is an unordered pair: (A, B) and (B, A) denote
/// the same logical thread and resolve to the same stored row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Conversation {
    /// Unique identifier.
    pub id: Uuid,
    /// First party, in whatever orientation the creator supplied.
    pub user1_id: Uuid,
    /// Second party.
    pub user2_id: Uuid,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Conversation {
    /// Returns `true` if the given user is one of the two parties.
    #[must_use]
    pub fn includes(&self, user_id: Uuid) -> bool {
        self.user1_id == user_id || self.user2_id == user_id
    }
}

/// A message within a conversation. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    /// Unique identifier; also the stable tie-break for equal timestamps.
    pub id: Uuid,
    /// Owning conversation id.
    pub chat_id: Uuid,
    /// Sending user id.
    pub sender_id: Uuid,
    /// Message body.
    pub body: String,
    /// Creation timestamp; the primary ordering key.
    pub created_at: DateTime<Utc>,
}

/// Input for appending a message to a conversation.
#[derive(Debug, Clone)]
pub struct NewMessage {
    /// Owning conversation id.
    pub chat_id: Uuid,
    /// Sending user id.
    pub sender_id: Uuid,
    /// Message body.
    pub body: String,
}

/// A conversation annotated with at most its single most recent message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatPreview {
    /// The conversation.
    pub chat: Conversation,
    /// The message with the maximum `created_at`, if any exist.
    pub last_message: Option<Message>,
    /// First party projection.
    pub user1: Participant,
    /// Second party projection.
    pub user2: Participant,
}

/// A conversation with its full message history in reading order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatDetail {
    /// The conversation.
    pub chat: Conversation,
    /// All messages, ordered by `created_at` ascending, id as tie-break.
    pub messages: Vec<Message>,
    /// First party projection.
    pub user1: Participant,
    /// Second party projection.
    pub user2: Participant,
}
