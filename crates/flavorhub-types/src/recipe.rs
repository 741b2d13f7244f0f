use serde::{Deserialize, Serialize};

use crate::aggregate::RatingAggregate;
use crate::error::TypeError;
use crate::id::RecipeId;

/// A catalog entry.
///
/// The descriptive attributes are opaque to the rating logic. The embedded
/// [`RatingAggregate`] is flattened into the record, so the wire form carries
/// `averageRating` and `ratingCount` next to the other fields.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: RecipeId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Preparation time in minutes.
    #[serde(default)]
    pub prep_time: Option<u32>,
    /// Cooking time in minutes.
    #[serde(default)]
    pub cook_time: Option<u32>,
    #[serde(default)]
    pub servings: Option<u32>,
    #[serde(default)]
    pub difficulty_level: Option<String>,
    #[serde(default)]
    pub cuisine_type: Option<String>,
    #[serde(flatten)]
    pub rating: RatingAggregate,
}

impl Recipe {
    /// Materialize a draft under a store-assigned id. New recipes are unrated.
    pub fn from_draft(id: RecipeId, draft: RecipeDraft) -> Self {
        Self {
            id,
            name: draft.name,
            description: draft.description,
            prep_time: draft.prep_time,
            cook_time: draft.cook_time,
            servings: draft.servings,
            difficulty_level: draft.difficulty_level,
            cuisine_type: draft.cuisine_type,
            rating: RatingAggregate::unrated(),
        }
    }

    /// Replace the descriptive attributes, keeping the id and rating state.
    pub fn apply_draft(&mut self, draft: RecipeDraft) {
        self.name = draft.name;
        self.description = draft.description;
        self.prep_time = draft.prep_time;
        self.cook_time = draft.cook_time;
        self.servings = draft.servings;
        self.difficulty_level = draft.difficulty_level;
        self.cuisine_type = draft.cuisine_type;
    }

    /// Total time in minutes, when both components are known.
    pub fn total_time(&self) -> Option<u32> {
        Some(self.prep_time? + self.cook_time?)
    }

    pub fn has_difficulty(&self, level: &str) -> bool {
        self.difficulty_level.as_deref() == Some(level)
    }

    pub fn has_cuisine(&self, cuisine: &str) -> bool {
        self.cuisine_type.as_deref() == Some(cuisine)
    }

    /// Case-insensitive substring match on the name.
    pub fn name_contains(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(&needle.to_lowercase())
    }
}

/// Descriptive attributes of a recipe, without identity or rating state.
///
/// This is the body accepted when creating or updating a recipe. Rating
/// fields present in the incoming JSON are ignored; ratings only change
/// through rating submission.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeDraft {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub prep_time: Option<u32>,
    #[serde(default)]
    pub cook_time: Option<u32>,
    #[serde(default)]
    pub servings: Option<u32>,
    #[serde(default)]
    pub difficulty_level: Option<String>,
    #[serde(default)]
    pub cuisine_type: Option<String>,
}

impl RecipeDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_times(mut self, prep_minutes: u32, cook_minutes: u32) -> Self {
        self.prep_time = Some(prep_minutes);
        self.cook_time = Some(cook_minutes);
        self
    }

    pub fn with_servings(mut self, servings: u32) -> Self {
        self.servings = Some(servings);
        self
    }

    pub fn with_difficulty(mut self, level: impl Into<String>) -> Self {
        self.difficulty_level = Some(level.into());
        self
    }

    pub fn with_cuisine(mut self, cuisine: impl Into<String>) -> Self {
        self.cuisine_type = Some(cuisine.into());
        self
    }

    /// Check the draft can be stored.
    pub fn validate(&self) -> Result<(), TypeError> {
        if self.name.trim().is_empty() {
            return Err(TypeError::BlankName);
        }
        Ok(())
    }
}
