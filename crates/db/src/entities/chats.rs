//! `SeaORM` Entity for chats table.
//!
//! `(user1_id, user2_id)` is an unordered pair; a unique index over the
//! normalized pair (see the initial migration) guarantees at most one row
//! per pair regardless of orientation.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "chats")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user1_id: Uuid,
    pub user2_id: Uuid,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::User1Id",
        to = "super::users::Column::Id"
    )]
    User1,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::User2Id",
        to = "super::users::Column::Id"
    )]
    User2,
    #[sea_orm(has_many = "super::messages::Entity")]
    Messages,
}

impl Related<super::messages::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Messages.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
