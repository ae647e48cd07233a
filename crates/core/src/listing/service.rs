//! Listing creation service.

use std::sync::Arc;

use tracing::info;

use super::error::ListingError;
use super::types::{CreateListingInput, Listing};
use crate::outcome::Outcome;

/// Repository trait for listing persistence.
///
/// This trait is implemented by the db crate. The create operation is
/// atomic: either the listing and all of its pictures persist, or none do.
pub trait ListingRepository: Send + Sync {
    /// Persists a new listing with its pictures in submission order.
    fn create(
        &self,
        input: CreateListingInput,
    ) -> impl std::future::Future<Output = Result<Listing, ListingError>> + Send;
}

/// Service for creating animal listings.
pub struct ListingService<R: ListingRepository> {
    repo: Arc<R>,
}

impl<R: ListingRepository> ListingService<R> {
    /// Creates a new listing service.
    #[must_use]
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Creates an animal listing.
    ///
    /// Business rejections (blank name, owner id that no longer references
    /// a user) come back as `Outcome::Failure`. Storage faults propagate
    /// as `ListingError` for the boundary layer to report as a server
    /// error.
    ///
    /// # Errors
    ///
    /// Returns `ListingError::Repository` when the storage operation fails
    /// for a non-business reason.
    pub async fn create(
        &self,
        input: CreateListingInput,
    ) -> Result<Outcome<Listing>, ListingError> {
        if input.name.trim().is_empty() {
            return Ok(Outcome::failure("animal name must not be empty"));
        }

        match self.repo.create(input).await {
            Ok(listing) => {
                info!(listing_id = %listing.id, owner_id = %listing.owner_id, "listing created");
                Ok(Outcome::success(listing))
            }
            Err(ListingError::OwnerNotFound(id)) => {
                Ok(Outcome::failure(format!("user {id} does not exist")))
            }
            Err(err) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use chrono::Utc;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use uuid::Uuid;

    /// Mock repository for testing.
    struct MockListingRepository {
        known_users: Vec<Uuid>,
        listings: Mutex<HashMap<Uuid, (Listing, Vec<Bytes>)>>,
        fail_with: Option<String>,
    }

    impl MockListingRepository {
        fn new(known_users: Vec<Uuid>) -> Self {
            Self {
                known_users,
                listings: Mutex::new(HashMap::new()),
                fail_with: None,
            }
        }

        fn failing(reason: &str) -> Self {
            Self {
                known_users: Vec::new(),
                listings: Mutex::new(HashMap::new()),
                fail_with: Some(reason.to_string()),
            }
        }
    }

    impl ListingRepository for MockListingRepository {
        async fn create(&self, input: CreateListingInput) -> Result<Listing, ListingError> {
            if let Some(reason) = &self.fail_with {
                return Err(ListingError::repository(reason.clone()));
            }
            if !self.known_users.contains(&input.owner_id) {
                return Err(ListingError::OwnerNotFound(input.owner_id));
            }

            let listing = Listing {
                id: Uuid::new_v4(),
                name: input.name,
                species: input.species,
                gender: input.gender,
                race: input.race,
                description: input.description,
                owner_id: input.owner_id,
                picture_ids: input.pictures.iter().map(|_| Uuid::new_v4()).collect(),
                created_at: Utc::now(),
            };
            self.listings
                .lock()
                .unwrap()
                .insert(listing.id, (listing.clone(), input.pictures));
            Ok(listing)
        }
    }

    fn rex_input(owner_id: Uuid, pictures: Vec<Bytes>) -> CreateListingInput {
        CreateListingInput {
            name: "Rex".to_string(),
            species: "dog".to_string(),
            gender: "male".to_string(),
            race: "labrador".to_string(),
            description: String::new(),
            owner_id,
            pictures,
        }
    }

    #[tokio::test]
    async fn test_create_listing_success_with_pictures_in_order() {
        let owner = Uuid::new_v4();
        let repo = Arc::new(MockListingRepository::new(vec![owner]));
        let service = ListingService::new(repo.clone());

        let buf_a = Bytes::from_static(b"picture-a");
        let buf_b = Bytes::from_static(b"picture-b");
        let outcome = service
            .create(rex_input(owner, vec![buf_a.clone(), buf_b.clone()]))
            .await
            .unwrap();

        assert!(outcome.is_success());
        let listing = outcome.into_success().unwrap();
        assert_eq!(listing.name, "Rex");
        assert_eq!(listing.picture_ids.len(), 2);

        let stored = repo.listings.lock().unwrap();
        let (_, pictures) = stored.get(&listing.id).unwrap();
        assert_eq!(pictures, &vec![buf_a, buf_b]);
    }

    #[tokio::test]
    async fn test_create_listing_with_zero_pictures_is_valid() {
        let owner = Uuid::new_v4();
        let repo = Arc::new(MockListingRepository::new(vec![owner]));
        let service = ListingService::new(repo);

        let outcome = service.create(rex_input(owner, Vec::new())).await.unwrap();
        assert!(outcome.is_success());
        assert!(outcome.value().unwrap().picture_ids.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_owner_is_a_business_failure() {
        let repo = Arc::new(MockListingRepository::new(Vec::new()));
        let service = ListingService::new(repo);

        let outcome = service
            .create(rex_input(Uuid::new_v4(), Vec::new()))
            .await
            .unwrap();
        assert!(outcome.is_failure());
        assert!(outcome.reason().unwrap().contains("does not exist"));
    }

    #[tokio::test]
    async fn test_blank_name_is_a_business_failure() {
        let owner = Uuid::new_v4();
        let repo = Arc::new(MockListingRepository::new(vec![owner]));
        let service = ListingService::new(repo);

        let mut input = rex_input(owner, Vec::new());
        input.name = "   ".to_string();
        let outcome = service.create(input).await.unwrap();
        assert!(outcome.is_failure());
    }

    #[tokio::test]
    async fn test_storage_fault_propagates_as_error() {
        let repo = Arc::new(MockListingRepository::failing("connection reset"));
        let service = ListingService::new(repo);

        let result = service.create(rex_input(Uuid::new_v4(), Vec::new())).await;
        assert!(matches!(result, Err(ListingError::Repository(_))));
    }
}
