//! Listing error types.

use thiserror::Error;
use uuid::Uuid;

/// Listing operation errors.
#[derive(Debug, Error)]
pub enum ListingError {
    /// The owner id does not reference an existing user.
    ///
    /// This is the one storage error the service translates into a
    /// business `Outcome::Failure`; everything else stays a fault.
    #[error("owner not found: {0}")]
    OwnerNotFound(Uuid),

    /// Repository operation failed.
    #[error("repository error: {0}")]
    Repository(String),
}

impl ListingError {
    /// Creates a repository error.
    #[must_use]
    pub fn repository(msg: impl Into<String>) -> Self {
        Self::Repository(msg.into())
    }
}
