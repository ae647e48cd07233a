//! Initial schema: users, animals, animal pictures, chats, messages.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(INITIAL_SQL).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(
            "DROP TABLE IF EXISTS messages, chats, animal_pictures, animals, users CASCADE;",
        )
        .await?;
        Ok(())
    }
}

const INITIAL_SQL: &str = r"
-- Users are owned by the identity subsystem; this service only references them.
CREATE TABLE users (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    name VARCHAR(255) NOT NULL,
    email VARCHAR(255) NOT NULL UNIQUE,
    password_hash VARCHAR(255) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE TABLE animals (
    id UUID PRIMARY KEY,
    name VARCHAR(255) NOT NULL,
    species VARCHAR(64) NOT NULL,
    gender VARCHAR(32) NOT NULL,
    race VARCHAR(128) NOT NULL,
    description TEXT NOT NULL DEFAULT '',
    user_id UUID NOT NULL REFERENCES users(id),
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_animals_user ON animals(user_id);

-- Pictures are positionally 1:1 with the submission order.
CREATE TABLE animal_pictures (
    id UUID PRIMARY KEY,
    animal_id UUID NOT NULL REFERENCES animals(id) ON DELETE CASCADE,
    position INTEGER NOT NULL,
    data BYTEA NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT uq_animal_pictures_position UNIQUE (animal_id, position)
);

CREATE TABLE chats (
    id UUID PRIMARY KEY,
    user1_id UUID NOT NULL REFERENCES users(id),
    user2_id UUID NOT NULL REFERENCES users(id),
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_chats_distinct_parties CHECK (user1_id <> user2_id)
);

-- At most one chat per unordered pair: normalize the pair before indexing,
-- so (A, B) and (B, A) collide. This is the serialization point for
-- concurrent first contacts; the application never takes locks for it.
CREATE UNIQUE INDEX uq_chats_user_pair
    ON chats (LEAST(user1_id, user2_id), GREATEST(user1_id, user2_id));

CREATE TABLE messages (
    id UUID PRIMARY KEY,
    chat_id UUID NOT NULL REFERENCES chats(id) ON DELETE CASCADE,
    sender_id UUID NOT NULL REFERENCES users(id),
    body TEXT NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

-- Covers both read orders: ascending history and latest-message preview.
CREATE INDEX idx_messages_chat_created ON messages(chat_id, created_at, id);
";
