use flavorhub_types::{RatingAggregate, Recipe, RecipeDraft, RecipeId};

use crate::error::StoreResult;

/// Keyed storage for recipe records.
///
/// All implementations must satisfy these invariants:
/// - Ids are assigned by the store on insert and never reused.
/// - `list` and the filtered scans return recipes ordered by id.
/// - `compare_and_swap` and `compare_and_set_rating` are atomic with respect
///   to every other write.
/// - A write that returns `Err` has not changed the stored state.
pub trait RecipeStore: Send + Sync {
    /// Read a recipe by id.
    ///
    /// Returns `Ok(None)` if the recipe does not exist.
    fn get(&self, id: RecipeId) -> StoreResult<Option<Recipe>>;

    /// All recipes, ordered by id.
    fn list(&self) -> StoreResult<Vec<Recipe>>;

    /// Insert a new recipe and return it with its assigned id.
    ///
    /// The stored recipe starts unrated.
    fn insert(&self, draft: RecipeDraft) -> StoreResult<Recipe>;

    /// Replace the stored record with `recipe`.
    ///
    /// Fails with `NotFound` if no recipe with `recipe.id` exists.
    fn update(&self, recipe: &Recipe) -> StoreResult<()>;

    /// Replace the stored record only if its rating count still equals
    /// `expected_rating_count`.
    ///
    /// Fails with `Conflict` when another writer got there first and with
    /// `NotFound` when the recipe has been deleted.
    fn compare_and_swap(&self, recipe: &Recipe, expected_rating_count: u64) -> StoreResult<()>;

    /// Replace only the rating aggregate of recipe `id`, if its rating count
    /// still equals `expected_rating_count`, and return the stored record.
    ///
    /// Name, description and the other descriptive fields keep whatever
    /// value is stored at commit time. Fails like `compare_and_swap`.
    fn compare_and_set_rating(
        &self,
        id: RecipeId,
        expected_rating_count: u64,
        rating: RatingAggregate,
    ) -> StoreResult<Recipe>;

    /// Delete a recipe by id. Returns `true` if the recipe existed.
    fn delete(&self, id: RecipeId) -> StoreResult<bool>;

    /// Recipes whose difficulty level equals `level`.
    fn list_by_difficulty(&self, level: &str) -> StoreResult<Vec<Recipe>> {
        Ok(self
            .list()?
            .into_iter()
            .filter(|r| r.has_difficulty(level))
            .collect())
    }

    /// Recipes whose cuisine type equals `cuisine`.
    fn list_by_cuisine(&self, cuisine: &str) -> StoreResult<Vec<Recipe>> {
        Ok(self
            .list()?
            .into_iter()
            .filter(|r| r.has_cuisine(cuisine))
            .collect())
    }

    /// Recipes whose name contains `needle`, ignoring case.
    fn search_by_name(&self, needle: &str) -> StoreResult<Vec<Recipe>> {
        Ok(self
            .list()?
            .into_iter()
            .filter(|r| r.name_contains(needle))
            .collect())
    }
}
