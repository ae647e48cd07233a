//! Two-party conversations.
//!
//! This module provides:
//! - Conversation resolution (one thread per unordered pair of users)
//! - Thread queries (preview with latest message, full chronological detail)
//! - Membership-checked message append

mod error;
mod service;
mod types;

pub use error::ChatError;
pub use service::{ChatRepository, ChatService};
pub use types::{ChatDetail, ChatPreview, Conversation, Message, NewMessage, Participant};
