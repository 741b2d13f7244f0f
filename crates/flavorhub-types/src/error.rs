use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid recipe id: {0}")]
    InvalidId(String),

    #[error("recipe name must not be blank")]
    BlankName,
}
