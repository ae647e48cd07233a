//! Animal listing creation.
//!
//! This module provides the listing creation pipeline:
//! - Picture intake (ordered upload handles to ordered byte buffers)
//! - Listing creation service with an explicit business outcome

mod error;
mod intake;
mod service;
mod types;

pub use error::ListingError;
pub use intake::{AttachmentReadError, PictureUpload, collect_picture_buffers};
pub use service::{ListingRepository, ListingService};
pub use types::{CreateListingInput, Listing};
