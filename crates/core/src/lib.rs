//! Core business logic for Pawhome.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and ordering contracts live here.
//!
//! # Modules
//!
//! - `outcome` - Two-variant result wrapper for expected business rejections
//! - `listing` - Animal listing creation and picture intake
//! - `chat` - Two-party conversation resolution and thread queries

pub mod chat;
pub mod listing;
pub mod outcome;

pub use outcome::Outcome;
