use crate::models::{FavoriteRecord, RecipeId};
use crate::Result;
use async_trait::async_trait;

/// The remote favorites resource for the user owning `token`
#[async_trait]
pub trait FavoritesApi: Send + Sync {
    /// `GET /api/favorites`
    async fn list(&self, token: &str) -> Result<Vec<FavoriteRecord>>;

    /// `POST /api/favorites/{recipe_id}`, returns the server's confirmation text
    async fn add(&self, token: &str, recipe_id: RecipeId) -> Result<String>;

    /// `DELETE /api/favorites/{recipe_id}`, returns the server's confirmation text
    async fn remove(&self, token: &str, recipe_id: RecipeId) -> Result<String>;
}
