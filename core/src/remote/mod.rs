mod favorites_api;
mod http_client;

pub use favorites_api::FavoritesApi;
pub use http_client::{ApiConfig, HttpFavoritesApi};
