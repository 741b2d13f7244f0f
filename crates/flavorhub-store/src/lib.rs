//! Recipe storage for FlavorHub.
//!
//! Every backend implements the [`RecipeStore`] trait: keyed lookup,
//! filtered scans, insert, full-record update, delete, and two
//! compare-and-swap writes: a full-record swap used by edits and a
//! rating-only swap used by rating submission.
//!
//! # Storage Backends
//!
//! - [`InMemoryRecipeStore`] -- `BTreeMap`-based store for tests and embedding
//! - [`JsonFileRecipeStore`] -- the same table persisted to a JSON document
//!
//! # Design Rules
//!
//! 1. The store assigns ids on insert; ids are never reused.
//! 2. Scans return recipes ordered by id.
//! 3. `compare_and_swap` and `compare_and_set_rating` only commit if the
//!    stored `ratingCount` still equals the count the caller read.
//! 4. `compare_and_set_rating` touches nothing but the aggregate.
//! 5. A failed write leaves the previously committed state visible.
//! 6. All I/O errors are propagated, never silently ignored.

pub mod error;
pub mod file;
pub mod memory;
pub mod table;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use file::JsonFileRecipeStore;
pub use memory::InMemoryRecipeStore;
pub use table::{RecipeTable, TableDocument};
pub use traits::RecipeStore;
