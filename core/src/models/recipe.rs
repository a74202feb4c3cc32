use serde::{Deserialize, Serialize};

/// Server-assigned recipe identifier
pub type RecipeId = i64;

/// The part of a recipe the client reads from a favorite record.
/// Fields the server adds beyond these are ignored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecipeSummary {
    pub id: RecipeId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl RecipeSummary {
    /// Create a summary carrying only the id
    pub fn new(id: RecipeId) -> Self {
        Self {
            id,
            title: None,
            description: None,
        }
    }
}
