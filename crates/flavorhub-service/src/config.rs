use serde::{Deserialize, Serialize};

/// Tuning for [`RecipeService`](crate::RecipeService).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Compare-and-swap attempts per rating submission before giving up.
    pub max_rate_attempts: u32,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            max_rate_attempts: 16,
        }
    }
}
