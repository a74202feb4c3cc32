//! Client core for the recipe-sharing service: the favorites list of the
//! logged-in user, kept in step with the server through optimistic updates.

pub mod auth;
pub mod error;
pub mod models;
pub mod notify;
pub mod remote;
pub mod sync;

pub use auth::{AuthStore, Session};
pub use error::{Error, Result};
pub use notify::{LogNotifier, Notifier, RecordingNotifier};
pub use remote::{ApiConfig, FavoritesApi, HttpFavoritesApi};
pub use sync::{FavoritesSync, SyncOutcome};
