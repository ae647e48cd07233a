//! `SeaORM` entity definitions.

pub mod animal_pictures;
pub mod animals;
pub mod chats;
pub mod messages;
pub mod users;
