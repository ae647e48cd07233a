//! Chat error types.

use thiserror::Error;

/// Chat operation errors.
#[derive(Debug, Error)]
pub enum ChatError {
    /// A conversation for this unordered pair already exists.
    ///
    /// Raised by the storage layer's unique-pair constraint when two first
    /// contacts race; the resolver recovers by re-running the lookup.
    #[error("a conversation for this pair already exists")]
    DuplicatePair,

    /// One of the pair does not reference an existing user.
    #[error("unknown participant in pair")]
    UnknownParticipant,

    /// Repository operation failed.
    #[error("repository error: {0}")]
    Repository(String),
}

impl ChatError {
    /// Creates a repository error.
    #[must_use]
    pub fn repository(msg: impl Into<String>) -> Self {
        Self::Repository(msg.into())
    }
}
