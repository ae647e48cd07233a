//! Chat repository for database operations.
//!
//! Implements the core `ChatRepository` trait using `SeaORM`. Pair lookup
//! is symmetric (both orientations in one query); uniqueness of the
//! unordered pair is enforced by the `uq_chats_user_pair` index and
//! surfaced as `ChatError::DuplicatePair` for the resolver to recover
//! from.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait,
    FromQueryResult, QueryFilter, QueryOrder, QuerySelect, Set, SqlErr,
};
use uuid::Uuid;

use crate::entities::{chats, messages, users};
use pawhome_core::chat::{
    ChatDetail, ChatError, ChatPreview, ChatRepository as ChatRepoTrait, Conversation, Message,
    NewMessage, Participant,
};

/// The only columns either read path selects from a user row.
#[derive(Debug, FromQueryResult)]
struct ParticipantRow {
    id: Uuid,
    name: String,
}

/// Chat repository implementation.
///
/// `Clone` mirrors SeaORM's own gating: `DatabaseConnection` is only
/// `Clone` when the `mock` feature is off.
#[derive(Debug)]
#[cfg_attr(not(feature = "mock"), derive(Clone))]
pub struct ChatRepository {
    db: DatabaseConnection,
}

impl ChatRepository {
    /// Creates a new chat repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Loads the minimal identity projection for one participant.
    async fn participant(&self, id: Uuid) -> Result<Participant, ChatError> {
        users::Entity::find_by_id(id)
            .select_only()
            .column(users::Column::Id)
            .column(users::Column::Name)
            .into_model::<ParticipantRow>()
            .one(&self.db)
            .await
            .map_err(|e| ChatError::repository(e.to_string()))?
            .map(|row| Participant {
                id: row.id,
                name: row.name,
            })
            .ok_or_else(|| ChatError::repository(format!("participant {id} has no user row")))
    }

    /// Condition matching either orientation of an unordered pair.
    fn pair_condition(id_a: Uuid, id_b: Uuid) -> Condition {
        Condition::any()
            .add(
                Condition::all()
                    .add(chats::Column::User1Id.eq(id_a))
                    .add(chats::Column::User2Id.eq(id_b)),
            )
            .add(
                Condition::all()
                    .add(chats::Column::User1Id.eq(id_b))
                    .add(chats::Column::User2Id.eq(id_a)),
            )
    }
}

impl ChatRepoTrait for ChatRepository {
    async fn find_by_user_pair(
        &self,
        id_a: Uuid,
        id_b: Uuid,
    ) -> Result<Option<Conversation>, ChatError> {
        let model = chats::Entity::find()
            .filter(Self::pair_condition(id_a, id_b))
            .one(&self.db)
            .await
            .map_err(|e| ChatError::repository(e.to_string()))?;

        Ok(model.map(to_conversation))
    }

    async fn create(&self, user1_id: Uuid, user2_id: Uuid) -> Result<Conversation, ChatError> {
        let chat = chats::ActiveModel {
            id: Set(Uuid::new_v4()),
            user1_id: Set(user1_id),
            user2_id: Set(user2_id),
            created_at: Set(Utc::now().into()),
        };

        let model = chat.insert(&self.db).await.map_err(|e| map_write_err(&e))?;
        Ok(to_conversation(model))
    }

    async fn find_by_id(&self, chat_id: Uuid) -> Result<Option<Conversation>, ChatError> {
        let model = chats::Entity::find_by_id(chat_id)
            .one(&self.db)
            .await
            .map_err(|e| ChatError::repository(e.to_string()))?;

        Ok(model.map(to_conversation))
    }

    async fn list_with_previews(&self, user_id: Uuid) -> Result<Vec<ChatPreview>, ChatError> {
        let models = chats::Entity::find()
            .filter(
                Condition::any()
                    .add(chats::Column::User1Id.eq(user_id))
                    .add(chats::Column::User2Id.eq(user_id)),
            )
            .order_by_desc(chats::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| ChatError::repository(e.to_string()))?;

        let mut previews = Vec::with_capacity(models.len());
        for model in models {
            // Latest message only: created_at descending, id breaks ties.
            let last_message = messages::Entity::find()
                .filter(messages::Column::ChatId.eq(model.id))
                .order_by_desc(messages::Column::CreatedAt)
                .order_by_desc(messages::Column::Id)
                .one(&self.db)
                .await
                .map_err(|e| ChatError::repository(e.to_string()))?;

            let user1 = self.participant(model.user1_id).await?;
            let user2 = self.participant(model.user2_id).await?;

            previews.push(ChatPreview {
                chat: to_conversation(model),
                last_message: last_message.map(to_message),
                user1,
                user2,
            });
        }

        Ok(previews)
    }

    async fn find_detail(&self, chat_id: Uuid) -> Result<Option<ChatDetail>, ChatError> {
        let Some(model) = chats::Entity::find_by_id(chat_id)
            .one(&self.db)
            .await
            .map_err(|e| ChatError::repository(e.to_string()))?
        else {
            return Ok(None);
        };

        // Reading order: created_at ascending, id breaks ties.
        let history = messages::Entity::find()
            .filter(messages::Column::ChatId.eq(chat_id))
            .order_by_asc(messages::Column::CreatedAt)
            .order_by_asc(messages::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| ChatError::repository(e.to_string()))?;

        let user1 = self.participant(model.user1_id).await?;
        let user2 = self.participant(model.user2_id).await?;

        Ok(Some(ChatDetail {
            chat: to_conversation(model),
            messages: history.into_iter().map(to_message).collect(),
            user1,
            user2,
        }))
    }

    async fn append_message(&self, message: NewMessage) -> Result<Message, ChatError> {
        let model = messages::ActiveModel {
            // v7 ids are time-ordered, giving a stable chronological
            // tie-break when timestamps collide.
            id: Set(Uuid::now_v7()),
            chat_id: Set(message.chat_id),
            sender_id: Set(message.sender_id),
            body: Set(message.body),
            created_at: Set(Utc::now().into()),
        };

        let model = model.insert(&self.db).await.map_err(|e| map_write_err(&e))?;
        Ok(to_message(model))
    }
}

/// Maps a database write error onto the chat error channel.
fn map_write_err(err: &DbErr) -> ChatError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => ChatError::DuplicatePair,
        Some(SqlErr::ForeignKeyConstraintViolation(_)) => ChatError::UnknownParticipant,
        _ => ChatError::repository(err.to_string()),
    }
}

/// Converts a database model to the domain conversation.
fn to_conversation(model: chats::Model) -> Conversation {
    Conversation {
        id: model.id,
        user1_id: model.user1_id,
        user2_id: model.user2_id,
        created_at: model.created_at.with_timezone(&Utc),
    }
}

/// Converts a database model to the domain message.
fn to_message(model: messages::Model) -> Message {
    Message {
        id: model.id,
        chat_id: model.chat_id,
        sender_id: model.sender_id,
        body: model.body,
        created_at: model.created_at.with_timezone(&Utc),
    }
}
