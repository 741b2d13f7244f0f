use std::sync::Arc;

use flavorhub_rating::{Rating, RatingExt};
use flavorhub_store::{RecipeStore, StoreError};
use flavorhub_types::{Recipe, RecipeDraft, RecipeId};

use crate::config::ServiceConfig;
use crate::error::{ServiceError, ServiceResult};

/// Catalog operations over an injected recipe store.
pub struct RecipeService {
    store: Arc<dyn RecipeStore>,
    config: ServiceConfig,
}

impl RecipeService {
    pub fn new(store: Arc<dyn RecipeStore>) -> Self {
        Self::with_config(store, ServiceConfig::default())
    }

    pub fn with_config(store: Arc<dyn RecipeStore>, config: ServiceConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<dyn RecipeStore> {
        &self.store
    }

    // ---- Rating ----

    /// Submit one rating for a recipe and return the committed record.
    ///
    /// The value is validated before the store is touched. Only the aggregate
    /// is written back, as a compare-and-swap keyed on the rating count that
    /// was read; a lost race re-reads and recomputes, so concurrent
    /// submissions are never dropped and an edit that lands in between is
    /// kept.
    pub fn rate(&self, id: RecipeId, value: i64) -> ServiceResult<Recipe> {
        let rating = Rating::new(value)?;
        let attempts = self.config.max_rate_attempts.max(1);

        for attempt in 1..=attempts {
            let current = self.get_required(id)?.rating;
            let seen = current.rating_count;
            let next = current.with_rating(rating);

            match self.store.compare_and_set_rating(id, seen, next) {
                Ok(recipe) => {
                    tracing::debug!(
                        %id,
                        rating = rating.value(),
                        average = recipe.rating.average_rating,
                        count = recipe.rating.rating_count,
                        "rating applied"
                    );
                    return Ok(recipe);
                }
                Err(StoreError::Conflict { actual, .. }) => {
                    tracing::debug!(%id, attempt, seen, actual, "rating lost a race; retrying");
                }
                Err(StoreError::NotFound(_)) => return Err(ServiceError::NotFound(id)),
                Err(e) => return Err(e.into()),
            }
        }

        tracing::warn!(%id, attempts, "rating abandoned under contention");
        Err(ServiceError::Contention { id, attempts })
    }

    // ---- Catalog ----

    pub fn list_all(&self) -> ServiceResult<Vec<Recipe>> {
        Ok(self.store.list()?)
    }

    pub fn get(&self, id: RecipeId) -> ServiceResult<Option<Recipe>> {
        Ok(self.store.get(id)?)
    }

    /// Like [`get`](Self::get), but a missing recipe is an error.
    pub fn get_required(&self, id: RecipeId) -> ServiceResult<Recipe> {
        self.store.get(id)?.ok_or(ServiceError::NotFound(id))
    }

    pub fn list_by_difficulty(&self, level: &str) -> ServiceResult<Vec<Recipe>> {
        Ok(self.store.list_by_difficulty(level)?)
    }

    pub fn list_by_cuisine(&self, cuisine: &str) -> ServiceResult<Vec<Recipe>> {
        Ok(self.store.list_by_cuisine(cuisine)?)
    }

    /// Case-insensitive substring search on recipe names.
    pub fn search_by_name(&self, needle: &str) -> ServiceResult<Vec<Recipe>> {
        Ok(self.store.search_by_name(needle)?)
    }

    pub fn create(&self, draft: RecipeDraft) -> ServiceResult<Recipe> {
        draft.validate()?;
        let recipe = self.store.insert(draft)?;
        tracing::info!(id = %recipe.id, name = %recipe.name, "recipe created");
        Ok(recipe)
    }

    /// Replace a recipe's descriptive attributes. Rating state is kept.
    ///
    /// Runs as a compare-and-swap like [`rate`](Self::rate) so that an edit
    /// racing a rating cannot roll the rating back.
    pub fn update(&self, id: RecipeId, draft: RecipeDraft) -> ServiceResult<Recipe> {
        draft.validate()?;
        let attempts = self.config.max_rate_attempts.max(1);

        for _ in 0..attempts {
            let mut recipe = self.get_required(id)?;
            let seen = recipe.rating.rating_count;
            recipe.apply_draft(draft.clone());

            match self.store.compare_and_swap(&recipe, seen) {
                Ok(()) => return Ok(recipe),
                Err(StoreError::Conflict { .. }) => continue,
                Err(StoreError::NotFound(_)) => return Err(ServiceError::NotFound(id)),
                Err(e) => return Err(e.into()),
            }
        }

        Err(ServiceError::Contention { id, attempts })
    }

    /// Remove a recipe. Deleting an unknown id is not an error.
    pub fn delete(&self, id: RecipeId) -> ServiceResult<()> {
        if self.store.delete(id)? {
            tracing::info!(%id, "recipe deleted");
        }
        Ok(())
    }
}

impl std::fmt::Debug for RecipeService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecipeService")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
