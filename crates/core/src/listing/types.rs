//! Listing types and data structures.

use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Input for creating an animal listing.
///
/// The owner id is taken from the authenticated request context; the HTTP
/// layer rejects unauthenticated requests before this input is ever built.
#[derive(Debug, Clone)]
pub struct CreateListingInput {
    /// Animal name.
    pub name: String,
    /// Animal species (e.g. "dog", "cat").
    pub species: String,
    /// Animal gender.
    pub gender: String,
    /// Animal race/breed.
    pub race: String,
    /// Free-text description, may be empty.
    pub description: String,
    /// Id of the user publishing the listing.
    pub owner_id: Uuid,
    /// Raw picture payloads in submission order, may be empty.
    pub pictures: Vec<Bytes>,
}

/// A persisted animal listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Listing {
    /// Unique identifier.
    pub id: Uuid,
    /// Animal name.
    pub name: String,
    /// Animal species.
    pub species: String,
    /// Animal gender.
    pub gender: String,
    /// Animal race/breed.
    pub race: String,
    /// Free-text description.
    pub description: String,
    /// Id of the owning user.
    pub owner_id: Uuid,
    /// Picture ids in submission order.
    pub picture_ids: Vec<Uuid>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}
