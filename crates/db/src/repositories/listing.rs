//! Listing repository for database operations.
//!
//! Implements the core `ListingRepository` trait using `SeaORM`. The
//! listing and its pictures are written inside one database transaction so
//! no reader can ever observe a partial attachment set.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, Set, SqlErr, TransactionTrait,
};
use uuid::Uuid;

use crate::entities::{animal_pictures, animals};
use pawhome_core::listing::{
    CreateListingInput, Listing, ListingError, ListingRepository as ListingRepoTrait,
};

/// Listing repository implementation.
///
/// `Clone` mirrors SeaORM's own gating: `DatabaseConnection` is only
/// `Clone` when the `mock` feature is off.
#[derive(Debug)]
#[cfg_attr(not(feature = "mock"), derive(Clone))]
pub struct ListingRepository {
    db: DatabaseConnection,
}

impl ListingRepository {
    /// Creates a new listing repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl ListingRepoTrait for ListingRepository {
    async fn create(&self, input: CreateListingInput) -> Result<Listing, ListingError> {
        let now = Utc::now();
        let animal_id = Uuid::new_v4();
        let picture_ids: Vec<Uuid> = input.pictures.iter().map(|_| Uuid::new_v4()).collect();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| map_db_err(&e, input.owner_id))?;

        let animal = animals::ActiveModel {
            id: Set(animal_id),
            name: Set(input.name.clone()),
            species: Set(input.species.clone()),
            gender: Set(input.gender.clone()),
            race: Set(input.race.clone()),
            description: Set(input.description.clone()),
            user_id: Set(input.owner_id),
            created_at: Set(now.into()),
        };
        let animal = animal
            .insert(&txn)
            .await
            .map_err(|e| map_db_err(&e, input.owner_id))?;

        if !input.pictures.is_empty() {
            let mut rows = Vec::with_capacity(input.pictures.len());
            for (position, (data, id)) in input.pictures.iter().zip(&picture_ids).enumerate() {
                let position = i32::try_from(position)
                    .map_err(|_| ListingError::repository("picture count exceeds i32 range"))?;
                rows.push(animal_pictures::ActiveModel {
                    id: Set(*id),
                    animal_id: Set(animal_id),
                    position: Set(position),
                    data: Set(data.to_vec()),
                    created_at: Set(now.into()),
                });
            }

            animal_pictures::Entity::insert_many(rows)
                .exec(&txn)
                .await
                .map_err(|e| map_db_err(&e, input.owner_id))?;
        }

        txn.commit()
            .await
            .map_err(|e| map_db_err(&e, input.owner_id))?;

        Ok(Listing {
            id: animal.id,
            name: animal.name,
            species: animal.species,
            gender: animal.gender,
            race: animal.race,
            description: animal.description,
            owner_id: animal.user_id,
            picture_ids,
            created_at: animal.created_at.with_timezone(&Utc),
        })
    }
}

/// Maps a database error onto the listing error channel.
///
/// A foreign-key violation can only come from the owner reference here,
/// so it becomes the business-level `OwnerNotFound`; everything else stays
/// a repository fault.
fn map_db_err(err: &DbErr, owner_id: Uuid) -> ListingError {
    match err.sql_err() {
        Some(SqlErr::ForeignKeyConstraintViolation(_)) => ListingError::OwnerNotFound(owner_id),
        _ => ListingError::repository(err.to_string()),
    }
}
