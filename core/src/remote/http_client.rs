use super::FavoritesApi;
use crate::models::{FavoriteRecord, RecipeId};
use crate::{Error, Result};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use std::time::Duration;
use url::Url;

/// Connection settings for the recipe backend
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// `FavoritesApi` over HTTP with bearer authentication
#[derive(Debug, Clone)]
pub struct HttpFavoritesApi {
    base_url: Url,
    client: Client,
}

impl HttpFavoritesApi {
    /// Create a client for the backend described by `config`
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let mut base_url = Url::parse(&config.base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(Error::InvalidInput(format!("Not a base URL: {}", config.base_url)));
        }
        // Keep any path prefix when joining relative paths
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self { base_url, client })
    }

    fn favorites_url(&self) -> Result<Url> {
        Ok(self.base_url.join("api/favorites")?)
    }

    fn favorite_url(&self, recipe_id: RecipeId) -> Result<Url> {
        Ok(self.base_url.join(&format!("api/favorites/{}", recipe_id))?)
    }

    async fn send(request: RequestBuilder, token: &str) -> Result<Response> {
        if token.trim().is_empty() {
            return Err(Error::Unauthenticated);
        }

        let response = request.bearer_auth(token).send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = if body.trim().is_empty() {
            status.canonical_reason().unwrap_or_default().to_string()
        } else {
            body
        };

        Err(Error::Api {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl FavoritesApi for HttpFavoritesApi {
    async fn list(&self, token: &str) -> Result<Vec<FavoriteRecord>> {
        let url = self.favorites_url()?;
        tracing::debug!(%url, "listing favorites");

        let response = Self::send(self.client.get(url), token).await?;
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn add(&self, token: &str, recipe_id: RecipeId) -> Result<String> {
        let url = self.favorite_url(recipe_id)?;
        tracing::debug!(%url, recipe_id, "adding favorite");

        let response = Self::send(self.client.post(url), token).await?;
        Ok(response.text().await?)
    }

    async fn remove(&self, token: &str, recipe_id: RecipeId) -> Result<String> {
        let url = self.favorite_url(recipe_id)?;
        tracing::debug!(%url, recipe_id, "removing favorite");

        let response = Self::send(self.client.delete(url), token).await?;
        Ok(response.text().await?)
    }
}
