//! Repository implementations of the core persistence traits.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the
//! application.

pub mod chat;
pub mod listing;

// Requires `--features mock`: the MockDatabase only exists behind
// SeaORM's `mock` feature, which is incompatible with the integration
// test targets (they clone the live `DatabaseConnection`).
#[cfg(all(test, feature = "mock"))]
mod listing_tests;

pub use chat::ChatRepository;
pub use listing::ListingRepository;
