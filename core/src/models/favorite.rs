use super::{RecipeId, RecipeSummary};
use serde::{Deserialize, Serialize};

/// A user's favorite as returned by `GET /api/favorites`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FavoriteRecord {
    pub id: i64,
    pub recipe: RecipeSummary,
}

impl FavoriteRecord {
    /// Create a new favorite record
    pub fn new(id: i64, recipe: RecipeSummary) -> Self {
        Self { id, recipe }
    }

    pub fn recipe_id(&self) -> RecipeId {
        self.recipe.id
    }
}

/// Extract the favorited recipe ids, keeping server order and dropping repeats
pub fn recipe_ids(records: &[FavoriteRecord]) -> Vec<RecipeId> {
    let mut ids = Vec::with_capacity(records.len());
    for record in records {
        let recipe_id = record.recipe_id();
        if !ids.contains(&recipe_id) {
            ids.push(recipe_id);
        }
    }
    ids
}
