//! The recipe table shared by every backend.
//!
//! [`RecipeTable`] holds the records and the id counter and implements the
//! mutation rules once. Backends wrap it in a lock and decide what happens
//! around each mutation (nothing, for memory; a flush, for files).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use flavorhub_types::{RatingAggregate, Recipe, RecipeDraft, RecipeId};

use crate::error::{StoreError, StoreResult};

/// Recipes keyed by id, plus the next id to hand out.
#[derive(Clone, Debug, PartialEq)]
pub struct RecipeTable {
    next_id: RecipeId,
    recipes: BTreeMap<RecipeId, Recipe>,
}

impl RecipeTable {
    pub fn new() -> Self {
        Self {
            next_id: RecipeId::new(1),
            recipes: BTreeMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    pub fn get(&self, id: RecipeId) -> Option<&Recipe> {
        self.recipes.get(&id)
    }

    /// All recipes, ordered by id.
    pub fn list(&self) -> Vec<Recipe> {
        self.recipes.values().cloned().collect()
    }

    /// Insert `draft` under the next free id.
    ///
    /// Fails with `IdsExhausted` once the counter cannot advance past the id
    /// it would hand out.
    pub fn insert(&mut self, draft: RecipeDraft) -> StoreResult<Recipe> {
        let id = self.next_id;
        self.next_id = id.next().ok_or(StoreError::IdsExhausted)?;
        let recipe = Recipe::from_draft(id, draft);
        self.recipes.insert(id, recipe.clone());
        Ok(recipe)
    }

    pub fn update(&mut self, recipe: &Recipe) -> StoreResult<()> {
        let slot = self
            .recipes
            .get_mut(&recipe.id)
            .ok_or(StoreError::NotFound(recipe.id))?;
        *slot = recipe.clone();
        Ok(())
    }

    pub fn compare_and_swap(&mut self, recipe: &Recipe, expected_rating_count: u64) -> StoreResult<()> {
        let slot = self
            .recipes
            .get_mut(&recipe.id)
            .ok_or(StoreError::NotFound(recipe.id))?;
        let actual = slot.rating.rating_count;
        if actual != expected_rating_count {
            return Err(StoreError::Conflict {
                id: recipe.id,
                expected: expected_rating_count,
                actual,
            });
        }
        *slot = recipe.clone();
        Ok(())
    }

    /// Replace only the rating aggregate of recipe `id`, and only if its
    /// rating count still equals `expected_rating_count`.
    ///
    /// Descriptive fields are left as stored, so an edit committed after the
    /// caller read the recipe survives. Returns the record as now stored.
    pub fn compare_and_set_rating(
        &mut self,
        id: RecipeId,
        expected_rating_count: u64,
        rating: RatingAggregate,
    ) -> StoreResult<Recipe> {
        let slot = self.recipes.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        let actual = slot.rating.rating_count;
        if actual != expected_rating_count {
            return Err(StoreError::Conflict {
                id,
                expected: expected_rating_count,
                actual,
            });
        }
        slot.rating = rating;
        Ok(slot.clone())
    }

    pub fn delete(&mut self, id: RecipeId) -> bool {
        self.recipes.remove(&id).is_some()
    }

    /// Serializable snapshot of the table.
    pub fn to_document(&self) -> TableDocument {
        TableDocument {
            next_id: self.next_id,
            recipes: self.list(),
        }
    }

    /// Rebuild a table from a snapshot.
    ///
    /// The id counter is raised past the largest stored id, so a hand-edited
    /// document can never cause an id to be reused. A document holding id
    /// `u64::MAX` leaves no id to raise the counter to and is rejected.
    pub fn from_document(doc: TableDocument) -> StoreResult<Self> {
        let recipes: BTreeMap<RecipeId, Recipe> =
            doc.recipes.into_iter().map(|r| (r.id, r)).collect();
        let after_last = match recipes.keys().next_back() {
            Some(last) => last.next().ok_or_else(|| {
                StoreError::Serialization(format!("recipe id {last} leaves no id to assign next"))
            })?,
            None => RecipeId::new(1),
        };
        Ok(Self {
            next_id: doc.next_id.max(after_last),
            recipes,
        })
    }
}

impl Default for RecipeTable {
    fn default() -> Self {
        Self::new()
    }
}

/// On-disk form of a [`RecipeTable`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableDocument {
    pub next_id: RecipeId,
    #[serde(default)]
    pub recipes: Vec<Recipe>,
}
