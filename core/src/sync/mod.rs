mod favorites_sync;

#[cfg(test)]
pub(crate) mod fake_api;

pub use favorites_sync::{FavoritesSync, SyncOutcome};
