use thiserror::Error;

use flavorhub_types::RecipeId;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// Rejected input: an out-of-range rating or an unusable recipe draft.
    #[error("invalid input: {0}")]
    Invalid(String),

    #[error("recipe not found: {0}")]
    NotFound(RecipeId),

    /// Every compare-and-swap attempt lost to a concurrent writer.
    #[error("recipe {id} is being updated concurrently; gave up after {attempts} attempts")]
    Contention { id: RecipeId, attempts: u32 },

    #[error("store error: {0}")]
    Store(#[from] flavorhub_store::StoreError),
}

impl From<flavorhub_rating::RatingError> for ServiceError {
    fn from(err: flavorhub_rating::RatingError) -> Self {
        Self::Invalid(err.to_string())
    }
}

impl From<flavorhub_types::TypeError> for ServiceError {
    fn from(err: flavorhub_types::TypeError) -> Self {
        Self::Invalid(err.to_string())
    }
}

impl ServiceError {
    pub fn is_invalid(&self) -> bool {
        matches!(self, Self::Invalid(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;
