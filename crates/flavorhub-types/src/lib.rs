//! Foundation types for FlavorHub.
//!
//! This crate provides the record types shared by every other FlavorHub
//! crate: the store persists them, the service mutates them, and the HTTP
//! boundary serializes them.
//!
//! # Key Types
//!
//! - [`RecipeId`] — Opaque numeric recipe identifier assigned by the store
//! - [`Recipe`] — A catalog entry with its embedded rating state
//! - [`RecipeDraft`] — Descriptive attributes used to create or update a recipe
//! - [`RatingAggregate`] — `(averageRating, ratingCount)` summary of all ratings

pub mod aggregate;
pub mod error;
pub mod id;
pub mod recipe;

pub use aggregate::RatingAggregate;
pub use error::TypeError;
pub use id::RecipeId;
pub use recipe::{Recipe, RecipeDraft};
