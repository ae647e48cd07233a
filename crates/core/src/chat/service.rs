//! Conversation resolver and thread query service.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use super::error::ChatError;
use super::types::{ChatDetail, ChatPreview, Conversation, Message, NewMessage};
use crate::outcome::Outcome;

/// Repository trait for conversation persistence.
///
/// Implemented by the db crate. Ordering is part of the contract:
/// `list_with_previews` annotates each conversation with the single most
/// recent message by `created_at` (descending, limit 1), and `find_detail`
/// returns messages ordered by `created_at` ascending with id as the
/// tie-break for equal timestamps. Uniqueness of the unordered pair is
/// enforced by a storage-level constraint; `create` reports a violation as
/// `ChatError::DuplicatePair`.
pub trait ChatRepository: Send + Sync {
    /// Finds the conversation for an unordered pair, matching either
    /// orientation.
    fn find_by_user_pair(
        &self,
        id_a: Uuid,
        id_b: Uuid,
    ) -> impl std::future::Future<Output = Result<Option<Conversation>, ChatError>> + Send;

    /// Creates a conversation with the pair in the supplied orientation.
    fn create(
        &self,
        user1_id: Uuid,
        user2_id: Uuid,
    ) -> impl std::future::Future<Output = Result<Conversation, ChatError>> + Send;

    /// Finds a conversation by id, regardless of membership.
    fn find_by_id(
        &self,
        chat_id: Uuid,
    ) -> impl std::future::Future<Output = Result<Option<Conversation>, ChatError>> + Send;

    /// Lists every conversation the user takes part in, each with its
    /// latest message and both participant projections.
    fn list_with_previews(
        &self,
        user_id: Uuid,
    ) -> impl std::future::Future<Output = Result<Vec<ChatPreview>, ChatError>> + Send;

    /// Loads a conversation with its full ordered message history.
    fn find_detail(
        &self,
        chat_id: Uuid,
    ) -> impl std::future::Future<Output = Result<Option<ChatDetail>, ChatError>> + Send;

    /// Appends a message to a conversation.
    fn append_message(
        &self,
        message: NewMessage,
    ) -> impl std::future::Future<Output = Result<Message, ChatError>> + Send;
}

/// Service for resolving conversations and querying threads.
pub struct ChatService<R: ChatRepository> {
    repo: Arc<R>,
}

impl<R: ChatRepository> ChatService<R> {
    /// Creates a new chat service.
    #[must_use]
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Returns the existing conversation between two users, or creates
    /// exactly one.
    ///
    /// Lookup is symmetric in the pair, so a thread created as (A, B) is
    /// found again as (B, A). When two first contacts race past the
    /// lookup, the storage unique-pair constraint rejects the loser, and
    /// the resolver re-runs the lookup to return the winner's row.
    ///
    /// # Errors
    ///
    /// Returns `ChatError::Repository` when storage fails for a
    /// non-business reason.
    pub async fn resolve_or_create(
        &self,
        user_id: Uuid,
        other_id: Uuid,
    ) -> Result<Outcome<Conversation>, ChatError> {
        if user_id == other_id {
            return Ok(Outcome::failure("cannot open a conversation with yourself"));
        }

        if let Some(chat) = self.repo.find_by_user_pair(user_id, other_id).await? {
            return Ok(Outcome::success(chat));
        }

        match self.repo.create(user_id, other_id).await {
            Ok(chat) => {
                info!(chat_id = %chat.id, "conversation created");
                Ok(Outcome::success(chat))
            }
            // Lost a first-contact race; the winner's row is now visible.
            Err(ChatError::DuplicatePair) => self
                .repo
                .find_by_user_pair(user_id, other_id)
                .await?
                .map(Outcome::success)
                .ok_or_else(|| {
                    ChatError::repository("pair reported duplicate but lookup found nothing")
                }),
            Err(ChatError::UnknownParticipant) => {
                Ok(Outcome::failure("both participants must exist"))
            }
            Err(err) => Err(err),
        }
    }

    /// Lists the user's conversations, each with at most one message: the
    /// most recent by `created_at`. Conversations with no messages yield
    /// an empty preview.
    ///
    /// # Errors
    ///
    /// Returns `ChatError::Repository` when storage fails.
    pub async fn list_threads(&self, user_id: Uuid) -> Result<Vec<ChatPreview>, ChatError> {
        self.repo.list_with_previews(user_id).await
    }

    /// Loads one conversation with its full history in reading order
    /// (`created_at` ascending).
    ///
    /// A request from a user who is not one of the two parties returns
    /// `None`, indistinguishable from a missing chat, so thread existence
    /// never leaks.
    ///
    /// # Errors
    ///
    /// Returns `ChatError::Repository` when storage fails.
    pub async fn thread_detail(
        &self,
        user_id: Uuid,
        chat_id: Uuid,
    ) -> Result<Option<ChatDetail>, ChatError> {
        let detail = self.repo.find_detail(chat_id).await?;
        Ok(detail.filter(|d| d.chat.includes(user_id)))
    }

    /// Appends a message to a conversation the sender takes part in.
    ///
    /// Returns `Ok(None)` when the chat does not exist or the sender is
    /// not a member (the two are deliberately indistinguishable), and
    /// `Some(Outcome::Failure)` for a blank body.
    ///
    /// # Errors
    ///
    /// Returns `ChatError::Repository` when storage fails.
    pub async fn send_message(
        &self,
        sender_id: Uuid,
        chat_id: Uuid,
        body: String,
    ) -> Result<Option<Outcome<Message>>, ChatError> {
        let Some(chat) = self.repo.find_by_id(chat_id).await? else {
            return Ok(None);
        };
        if !chat.includes(sender_id) {
            return Ok(None);
        }
        if body.trim().is_empty() {
            return Ok(Some(Outcome::failure("message body must not be empty")));
        }

        let message = self
            .repo
            .append_message(NewMessage {
                chat_id,
                sender_id,
                body,
            })
            .await?;
        Ok(Some(Outcome::success(message)))
    }
}
