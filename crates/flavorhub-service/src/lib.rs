//! Recipe service for FlavorHub.
//!
//! [`RecipeService`] is the single entry point the HTTP boundary and the CLI
//! talk to. It owns the read-modify-write for rating submission and passes
//! every other operation straight through to the injected [`RecipeStore`].

pub mod config;
pub mod error;
pub mod service;

pub use config::ServiceConfig;
pub use error::{ServiceError, ServiceResult};
pub use service::RecipeService;

// Re-export key types
pub use flavorhub_rating::{Rating, RatingError};
pub use flavorhub_store::{InMemoryRecipeStore, JsonFileRecipeStore, RecipeStore, StoreError};
pub use flavorhub_types::{RatingAggregate, Recipe, RecipeDraft, RecipeId};
