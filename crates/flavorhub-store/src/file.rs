//! JSON-document recipe store.
//!
//! [`JsonFileRecipeStore`] keeps the whole table in memory and rewrites the
//! backing file after every mutation. Writes go to a temporary file in the
//! same directory which is then renamed over the target, so readers of the
//! file never observe a half-written document.

use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use tempfile::NamedTempFile;

use flavorhub_types::{RatingAggregate, Recipe, RecipeDraft, RecipeId};

use crate::error::{StoreError, StoreResult};
use crate::table::{RecipeTable, TableDocument};
use crate::traits::RecipeStore;

/// Recipe store persisted to a single JSON file.
pub struct JsonFileRecipeStore {
    path: PathBuf,
    table: RwLock<RecipeTable>,
}

impl JsonFileRecipeStore {
    /// Open the store at `path`, loading existing contents if the file exists.
    ///
    /// A missing file is an empty store; the file is created on first write.
    pub fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();
        let table = if path.exists() {
            let data = fs::read(&path)?;
            let doc: TableDocument = serde_json::from_slice(&data)
                .map_err(|e| StoreError::Serialization(format!("{}: {e}", path.display())))?;
            RecipeTable::from_document(doc)?
        } else {
            RecipeTable::new()
        };
        tracing::debug!(path = %path.display(), recipes = table.len(), "opened recipe file");
        Ok(Self {
            path,
            table: RwLock::new(table),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_table(&self) -> StoreResult<RwLockReadGuard<'_, RecipeTable>> {
        self.table.read().map_err(|_| StoreError::LockPoisoned)
    }

    fn write_table(&self) -> StoreResult<RwLockWriteGuard<'_, RecipeTable>> {
        self.table.write().map_err(|_| StoreError::LockPoisoned)
    }

    /// Apply `op` to a copy of the table, flush the copy, then publish it.
    fn mutate<T>(&self, op: impl FnOnce(&mut RecipeTable) -> StoreResult<T>) -> StoreResult<T> {
        let mut guard = self.write_table()?;
        let mut next = guard.clone();
        let out = op(&mut next)?;
        self.flush(&next)?;
        *guard = next;
        Ok(out)
    }

    fn flush(&self, table: &RecipeTable) -> StoreResult<()> {
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let tmp = NamedTempFile::new_in(dir)?;
        {
            let mut writer = BufWriter::new(tmp.as_file());
            serde_json::to_writer_pretty(&mut writer, &table.to_document())
                .map_err(|e| StoreError::Serialization(e.to_string()))?;
            writer.flush()?;
        }
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| StoreError::Io(e.error))?;
        Ok(())
    }
}

impl RecipeStore for JsonFileRecipeStore {
    fn get(&self, id: RecipeId) -> StoreResult<Option<Recipe>> {
        Ok(self.read_table()?.get(id).cloned())
    }

    fn list(&self) -> StoreResult<Vec<Recipe>> {
        Ok(self.read_table()?.list())
    }

    fn insert(&self, draft: RecipeDraft) -> StoreResult<Recipe> {
        let recipe = self.mutate(|t| t.insert(draft))?;
        tracing::debug!(id = %recipe.id, path = %self.path.display(), "inserted recipe");
        Ok(recipe)
    }

    fn update(&self, recipe: &Recipe) -> StoreResult<()> {
        self.mutate(|t| t.update(recipe))
    }

    fn compare_and_swap(&self, recipe: &Recipe, expected_rating_count: u64) -> StoreResult<()> {
        self.mutate(|t| t.compare_and_swap(recipe, expected_rating_count))
    }

    fn compare_and_set_rating(
        &self,
        id: RecipeId,
        expected_rating_count: u64,
        rating: RatingAggregate,
    ) -> StoreResult<Recipe> {
        self.mutate(|t| t.compare_and_set_rating(id, expected_rating_count, rating))
    }

    fn delete(&self, id: RecipeId) -> StoreResult<bool> {
        if self.read_table()?.get(id).is_none() {
            return Ok(false);
        }
        self.mutate(|t| Ok(t.delete(id)))
    }
}

impl std::fmt::Debug for JsonFileRecipeStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonFileRecipeStore")
            .field("path", &self.path)
            .finish()
    }
}
