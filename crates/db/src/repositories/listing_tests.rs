//! Unit tests for the listing repository against a mock database.
//!
//! The integration suite in `tests/listing_test.rs` exercises the real
//! Postgres constraints. These tests cover transaction branches the live
//! schema makes unreachable from outside, like the picture insert failing
//! after the animals row was already written.

use bytes::Bytes;
use chrono::Utc;
use sea_orm::{DatabaseBackend, DbErr, MockDatabase, RuntimeErr};
use uuid::Uuid;

use super::ListingRepository;
use crate::entities::animals;
use pawhome_core::listing::{CreateListingInput, ListingError, ListingRepository as _};

fn rex_input(owner_id: Uuid) -> CreateListingInput {
    CreateListingInput {
        name: "Rex".to_string(),
        species: "dog".to_string(),
        gender: "male".to_string(),
        race: "labrador".to_string(),
        description: "Friendly, house-trained.".to_string(),
        owner_id,
        pictures: vec![Bytes::from_static(b"rex-front"), Bytes::from_static(b"rex-side")],
    }
}

fn picture_insert_error() -> DbErr {
    DbErr::Exec(RuntimeErr::Internal(
        "duplicate key value violates unique constraint \"uq_animal_pictures_position\""
            .to_string(),
    ))
}

#[tokio::test]
async fn test_picture_insert_failure_after_animal_row_is_a_fault() {
    let owner_id = Uuid::new_v4();
    let written = animals::Model {
        id: Uuid::new_v4(),
        name: "Rex".to_string(),
        species: "dog".to_string(),
        gender: "male".to_string(),
        race: "labrador".to_string(),
        description: "Friendly, house-trained.".to_string(),
        user_id: owner_id,
        created_at: Utc::now().into(),
    };

    // The animals insert succeeds; the animal_pictures insert that follows
    // inside the same transaction fails. The error is queued on both
    // response channels so it hits whichever the statement uses.
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![written]])
        .append_query_errors([picture_insert_error()])
        .append_exec_errors([picture_insert_error()])
        .into_connection();

    let repo = ListingRepository::new(db);
    let result = repo.create(rex_input(owner_id)).await;

    // The repository must surface a fault, never a listing whose animals
    // row committed without its pictures. The early return drops the
    // open transaction, which rolls the animals row back.
    assert!(matches!(result, Err(ListingError::Repository(_))));
}
