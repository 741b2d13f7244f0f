use flavorhub_types::RecipeId;

/// Errors from recipe store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The referenced recipe does not exist.
    #[error("recipe not found: {0}")]
    NotFound(RecipeId),

    /// A compare-and-swap lost a race with another writer.
    #[error("conflicting update on recipe {id}: expected rating count {expected}, found {actual}")]
    Conflict {
        id: RecipeId,
        expected: u64,
        actual: u64,
    },

    /// The id counter has reached `u64::MAX`.
    #[error("no recipe ids left to assign")]
    IdsExhausted,

    /// Serialization or deserialization failure.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// I/O error from the underlying storage backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A writer panicked while holding the table lock.
    #[error("store lock poisoned")]
    LockPoisoned,
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
