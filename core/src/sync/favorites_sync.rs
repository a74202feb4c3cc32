use crate::auth::AuthStore;
use crate::models::{recipe_ids, RecipeId};
use crate::notify::Notifier;
use crate::remote::FavoritesApi;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

const LOGIN_REQUIRED: &str = "Please log in to manage favorites";

/// What a favorites operation ended up doing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The server accepted the change (or the list was loaded)
    Applied,
    /// No one is logged in; nothing was sent
    Unauthenticated,
    /// The recipe was already in the requested state; nothing was sent
    Redundant,
    /// The request failed and local state was rolled back
    Failed,
    /// The session ended while the request was in flight; the response was ignored
    Discarded,
}

#[derive(Debug, Default)]
struct SyncState {
    ids: Vec<RecipeId>,
    error: Option<String>,
    in_flight: usize,
    /// Bumped whenever `ids` is replaced from the server or cleared
    revision: u64,
}

/// Local state captured right before an optimistic change
struct Snapshot {
    ids: Vec<RecipeId>,
    revision: u64,
}

/// Favorited recipe ids for the logged-in user, kept in step with the server.
///
/// `add` and `remove` update the local set before the request is sent and
/// restore the set as it was right before the call if the request fails.
/// A successful change is followed by a full reload from the server.
/// Failures never surface as errors: they land in [`FavoritesSync::error`]
/// and in a notification.
///
/// The state lock is never held across a request, so calls can overlap.
///
/// The set belongs to the session in the shared [`AuthStore`]. Once the
/// store is logged out, reads see an empty set and the next `fetch_all` (or
/// any response still in flight) drops the stored ids. Hosts may call
/// [`FavoritesSync::clear`] right after logging out to also drop the last
/// error.
pub struct FavoritesSync {
    api: Arc<dyn FavoritesApi>,
    auth: Arc<AuthStore>,
    notifier: Arc<dyn Notifier>,
    state: Mutex<SyncState>,
}

impl FavoritesSync {
    pub fn new(api: Arc<dyn FavoritesApi>, auth: Arc<AuthStore>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            api,
            auth,
            notifier,
            state: Mutex::new(SyncState::default()),
        }
    }

    fn state(&self) -> MutexGuard<'_, SyncState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Always false while logged out
    pub fn is_favorite(&self, recipe_id: RecipeId) -> bool {
        self.auth.is_authenticated() && self.state().ids.contains(&recipe_id)
    }

    /// Currently known favorite ids; empty while logged out
    pub fn ids(&self) -> Vec<RecipeId> {
        if !self.auth.is_authenticated() {
            return Vec::new();
        }
        self.state().ids.clone()
    }

    /// True while any request is outstanding
    pub fn is_loading(&self) -> bool {
        self.state().in_flight > 0
    }

    /// The last error message, if any
    pub fn error(&self) -> Option<String> {
        self.state().error.clone()
    }

    /// Forget the ids and the last error
    pub fn clear(&self) {
        let mut state = self.state();
        state.ids.clear();
        state.error = None;
        state.revision += 1;
    }

    /// Reload the favorites list from the server.
    ///
    /// When logged out the list is emptied without a request. A failed load
    /// also empties the list and records the error, but sends no notification.
    /// If the token changes while the request is out, the list is loaded
    /// again for the new session.
    pub async fn fetch_all(&self) -> SyncOutcome {
        loop {
            let Some(session) = self.auth.session() else {
                let mut state = self.state();
                state.ids.clear();
                state.revision += 1;
                return SyncOutcome::Unauthenticated;
            };

            self.state().in_flight += 1;
            let result = self.api.list(&session.token).await;

            let stale = {
                let mut state = self.state();
                state.in_flight = state.in_flight.saturating_sub(1);
                !self.auth.is_current(&session)
            };
            if stale {
                if self.auth.is_authenticated() {
                    tracing::debug!("session changed while loading favorites, reloading");
                    continue;
                }
                tracing::debug!("ignoring favorites loaded for an ended session");
                self.clear();
                return SyncOutcome::Discarded;
            }

            let mut state = self.state();
            state.revision += 1;
            return match result {
                Ok(records) => {
                    state.ids = recipe_ids(&records);
                    state.error = None;
                    tracing::info!(count = state.ids.len(), "favorites loaded");
                    SyncOutcome::Applied
                }
                Err(err) => {
                    tracing::warn!(error = %err, "failed to load favorites");
                    state.ids.clear();
                    state.error = Some(format!("Failed to load favorites: {}", err.user_message()));
                    SyncOutcome::Failed
                }
            };
        }
    }

    /// Favorite a recipe
    pub async fn add(&self, recipe_id: RecipeId) -> SyncOutcome {
        let Some(session) = self.auth.session() else {
            self.notifier.error(LOGIN_REQUIRED);
            return SyncOutcome::Unauthenticated;
        };

        let snapshot = {
            let mut state = self.state();
            if state.ids.contains(&recipe_id) {
                None
            } else {
                let snapshot = Snapshot {
                    ids: state.ids.clone(),
                    revision: state.revision,
                };
                state.ids.push(recipe_id);
                state.in_flight += 1;
                Some(snapshot)
            }
        };
        let Some(snapshot) = snapshot else {
            self.notifier.info("This recipe is already in your favorites");
            return SyncOutcome::Redundant;
        };

        let result = self.api.add(&session.token, recipe_id).await;
        self.finish_change(snapshot, result.map(|_| ()), recipe_id, "added to").await
    }

    /// Unfavorite a recipe
    pub async fn remove(&self, recipe_id: RecipeId) -> SyncOutcome {
        let Some(session) = self.auth.session() else {
            self.notifier.error(LOGIN_REQUIRED);
            return SyncOutcome::Unauthenticated;
        };

        let snapshot = {
            let mut state = self.state();
            if !state.ids.contains(&recipe_id) {
                None
            } else {
                let snapshot = Snapshot {
                    ids: state.ids.clone(),
                    revision: state.revision,
                };
                state.ids.retain(|id| *id != recipe_id);
                state.in_flight += 1;
                Some(snapshot)
            }
        };
        let Some(snapshot) = snapshot else {
            self.notifier.info("This recipe is not in your favorites");
            return SyncOutcome::Redundant;
        };

        let result = self.api.remove(&session.token, recipe_id).await;
        self.finish_change(snapshot, result.map(|_| ()), recipe_id, "removed from").await
    }

    /// Flip the favorite state of a recipe
    pub async fn toggle(&self, recipe_id: RecipeId) -> SyncOutcome {
        if self.is_favorite(recipe_id) {
            self.remove(recipe_id).await
        } else {
            self.add(recipe_id).await
        }
    }

    async fn finish_change(
        &self,
        snapshot: Snapshot,
        result: crate::Result<()>,
        recipe_id: RecipeId,
        verb: &str,
    ) -> SyncOutcome {
        {
            let mut state = self.state();
            state.in_flight = state.in_flight.saturating_sub(1);
        }

        // A token refresh keeps the change; only a logout drops it
        if !self.auth.is_authenticated() {
            tracing::debug!(recipe_id, "ignoring favorite change after logout");
            self.clear();
            return SyncOutcome::Discarded;
        }

        match result {
            Ok(()) => {
                tracing::debug!(recipe_id, "favorite {} server", verb);
                self.notifier.success(&format!("Recipe {} favorites", verb));
                self.fetch_all().await;
                SyncOutcome::Applied
            }
            Err(err) => {
                tracing::warn!(recipe_id, error = %err, "favorite change failed, rolling back");
                let message = format!("Could not update favorites: {}", err.user_message());
                {
                    let mut state = self.state();
                    // A reload since the snapshot already replaced the optimistic change
                    if state.revision == snapshot.revision {
                        state.ids = snapshot.ids;
                    }
                    state.error = Some(message.clone());
                }
                self.notifier.error(&message);
                SyncOutcome::Failed
            }
        }
    }
}
