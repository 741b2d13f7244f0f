use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use flavorhub_types::{RatingAggregate, Recipe, RecipeDraft, RecipeId};

use crate::error::{StoreError, StoreResult};
use crate::table::RecipeTable;
use crate::traits::RecipeStore;

/// In-memory, `BTreeMap`-based recipe store.
///
/// Intended for tests and embedding. The table lives behind a `RwLock`, so
/// readers run in parallel and writers are serialized. Data is lost when the
/// store is dropped.
pub struct InMemoryRecipeStore {
    table: RwLock<RecipeTable>,
}

impl InMemoryRecipeStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::from_table(RecipeTable::new())
    }

    pub fn from_table(table: RecipeTable) -> Self {
        Self {
            table: RwLock::new(table),
        }
    }

    /// Create a store pre-populated with `drafts`, in order.
    pub fn with_recipes(drafts: impl IntoIterator<Item = RecipeDraft>) -> StoreResult<Self> {
        let mut table = RecipeTable::new();
        for draft in drafts {
            table.insert(draft)?;
        }
        Ok(Self::from_table(table))
    }

    /// Number of recipes currently stored.
    pub fn len(&self) -> usize {
        self.read_table().map(|t| t.len()).unwrap_or(0)
    }

    /// Returns `true` if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read_table(&self) -> StoreResult<RwLockReadGuard<'_, RecipeTable>> {
        self.table.read().map_err(|_| StoreError::LockPoisoned)
    }

    fn write_table(&self) -> StoreResult<RwLockWriteGuard<'_, RecipeTable>> {
        self.table.write().map_err(|_| StoreError::LockPoisoned)
    }
}

impl Default for InMemoryRecipeStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RecipeStore for InMemoryRecipeStore {
    fn get(&self, id: RecipeId) -> StoreResult<Option<Recipe>> {
        Ok(self.read_table()?.get(id).cloned())
    }

    fn list(&self) -> StoreResult<Vec<Recipe>> {
        Ok(self.read_table()?.list())
    }

    fn insert(&self, draft: RecipeDraft) -> StoreResult<Recipe> {
        let recipe = self.write_table()?.insert(draft)?;
        tracing::debug!(id = %recipe.id, "inserted recipe");
        Ok(recipe)
    }

    fn update(&self, recipe: &Recipe) -> StoreResult<()> {
        self.write_table()?.update(recipe)
    }

    fn compare_and_swap(&self, recipe: &Recipe, expected_rating_count: u64) -> StoreResult<()> {
        self.write_table()?.compare_and_swap(recipe, expected_rating_count)
    }

    fn compare_and_set_rating(
        &self,
        id: RecipeId,
        expected_rating_count: u64,
        rating: RatingAggregate,
    ) -> StoreResult<Recipe> {
        self.write_table()?
            .compare_and_set_rating(id, expected_rating_count, rating)
    }

    fn delete(&self, id: RecipeId) -> StoreResult<bool> {
        Ok(self.write_table()?.delete(id))
    }
}

impl std::fmt::Debug for InMemoryRecipeStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryRecipeStore")
            .field("recipe_count", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn sample_store() -> InMemoryRecipeStore {
        InMemoryRecipeStore::with_recipes([
            RecipeDraft::new("Pasta Carbonara")
                .with_difficulty("Easy")
                .with_cuisine("Italian"),
            RecipeDraft::new("Chicken Tikka Masala")
                .with_difficulty("Medium")
                .with_cuisine("Indian"),
            RecipeDraft::new("Beef Wellington")
                .with_difficulty("Hard")
                .with_cuisine("British"),
            RecipeDraft::new("Pasta Primavera")
                .with_difficulty("Easy")
                .with_cuisine("Italian"),
        ])
        .unwrap()
    }

    fn names(recipes: &[Recipe]) -> Vec<&str> {
        recipes.iter().map(|r| r.name.as_str()).collect()
    }

    // -----------------------------------------------------------------------
    // Core CRUD
    // -----------------------------------------------------------------------

    #[test]
    fn insert_and_get() {
        let store = InMemoryRecipeStore::new();
        let recipe = store.insert(RecipeDraft::new("Omelette")).unwrap();
        let read_back = store.get(recipe.id).unwrap().expect("should exist");
        assert_eq!(read_back, recipe);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn get_missing_is_none() {
        let store = InMemoryRecipeStore::new();
        assert!(store.get(RecipeId::new(99)).unwrap().is_none());
    }

    #[test]
    fn list_is_ordered_by_id() {
        let store = sample_store();
        let all = store.list().unwrap();
        let ids: Vec<u64> = all.iter().map(|r| r.id.get()).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
    }

    #[test]
    fn update_replaces_record() {
        let store = sample_store();
        let mut recipe = store.get(RecipeId::new(2)).unwrap().unwrap();
        recipe.servings = Some(6);
        store.update(&recipe).unwrap();
        assert_eq!(store.get(recipe.id).unwrap().unwrap().servings, Some(6));
    }

    #[test]
    fn delete_present_recipe() {
        let store = sample_store();
        assert!(store.delete(RecipeId::new(1)).unwrap());
        assert!(store.get(RecipeId::new(1)).unwrap().is_none());
        assert!(!store.delete(RecipeId::new(1)).unwrap());
        assert_eq!(store.len(), 3);
    }

    // -----------------------------------------------------------------------
    // Filtered scans
    // -----------------------------------------------------------------------

    #[test]
    fn filter_by_difficulty() {
        let store = sample_store();
        let easy = store.list_by_difficulty("Easy").unwrap();
        assert_eq!(names(&easy), vec!["Pasta Carbonara", "Pasta Primavera"]);
        assert!(store.list_by_difficulty("Impossible").unwrap().is_empty());
    }

    #[test]
    fn filter_by_cuisine() {
        let store = sample_store();
        let indian = store.list_by_cuisine("Indian").unwrap();
        assert_eq!(names(&indian), vec!["Chicken Tikka Masala"]);
    }

    #[test]
    fn search_ignores_case() {
        let store = sample_store();
        let hits = store.search_by_name("PASTA").unwrap();
        assert_eq!(names(&hits), vec!["Pasta Carbonara", "Pasta Primavera"]);
        let hits = store.search_by_name("wellington").unwrap();
        assert_eq!(names(&hits), vec!["Beef Wellington"]);
    }

    // -----------------------------------------------------------------------
    // Compare-and-swap
    // -----------------------------------------------------------------------

    #[test]
    fn stale_compare_and_swap_is_rejected() {
        let store = sample_store();
        let mut recipe = store.get(RecipeId::new(1)).unwrap().unwrap();
        recipe.rating = RatingAggregate::new(5.0, 1);
        store.compare_and_swap(&recipe, 0).unwrap();

        let mut stale = recipe.clone();
        stale.rating = RatingAggregate::new(1.0, 1);
        let err = store.compare_and_swap(&stale, 0).unwrap_err();
        assert!(matches!(err, StoreError::Conflict { expected: 0, actual: 1, .. }));
        assert_eq!(store.get(recipe.id).unwrap().unwrap().rating.average_rating, 5.0);
    }

    #[test]
    fn compare_and_swap_on_deleted_recipe() {
        let store = sample_store();
        let recipe = store.get(RecipeId::new(3)).unwrap().unwrap();
        store.delete(recipe.id).unwrap();
        assert!(matches!(
            store.compare_and_swap(&recipe, 0),
            Err(StoreError::NotFound(_))
        ));
    }

    #[test]
    fn concurrent_compare_and_swap_admits_one_winner_per_count() {
        let store = Arc::new(sample_store());
        let id = RecipeId::new(1);
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    let mut recipe = store.get(id).unwrap().unwrap();
                    let seen = recipe.rating.rating_count;
                    recipe.rating = RatingAggregate::new(3.0, seen + 1);
                    store.compare_and_swap(&recipe, seen).is_ok()
                })
            })
            .collect();
        let wins = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|ok| *ok)
            .count() as u64;
        assert_eq!(store.get(id).unwrap().unwrap().rating.rating_count, wins);
    }

    #[test]
    fn rating_swap_after_edit_keeps_the_edit() {
        let store = sample_store();
        let read = store.get(RecipeId::new(2)).unwrap().unwrap();

        let mut edited = read.clone();
        edited.description = "Creamy tomato curry".into();
        store.update(&edited).unwrap();

        let stored = store
            .compare_and_set_rating(read.id, 0, RatingAggregate::new(4.0, 1))
            .unwrap();
        assert_eq!(stored.description, "Creamy tomato curry");
        assert_eq!(store.get(read.id).unwrap().unwrap(), stored);

        let err = store
            .compare_and_set_rating(read.id, 0, RatingAggregate::new(1.0, 1))
            .unwrap_err();
        assert!(matches!(err, StoreError::Conflict { expected: 0, actual: 1, .. }));
    }
}
