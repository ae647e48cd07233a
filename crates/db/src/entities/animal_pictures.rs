//! `SeaORM` Entity for animal pictures table.
//!
//! Pictures are positionally 1:1 with the original submission: the first
//! uploaded file is position 0.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "animal_pictures")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub animal_id: Uuid,
    pub position: i32,
    pub data: Vec<u8>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::animals::Entity",
        from = "Column::AnimalId",
        to = "super::animals::Column::Id"
    )]
    Animals,
}

impl Related<super::animals::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Animals.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
