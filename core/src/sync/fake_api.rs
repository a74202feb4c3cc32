use crate::models::{FavoriteRecord, RecipeId, RecipeSummary};
use crate::remote::FavoritesApi;
use crate::{Error, Result};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use tokio::sync::oneshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Call {
    List,
    Add(RecipeId),
    Remove(RecipeId),
}

/// In-memory favorites server with switchable failures and
/// per-call gates that hold a request in flight until released.
#[derive(Default)]
pub(crate) struct FakeFavoritesApi {
    server: Mutex<Vec<RecipeId>>,
    failing: Mutex<HashSet<RecipeId>>,
    fail_list: AtomicBool,
    gates: Mutex<HashMap<Call, oneshot::Receiver<()>>>,
    tokens: Mutex<Vec<String>>,
    list_calls: AtomicUsize,
    add_calls: AtomicUsize,
    remove_calls: AtomicUsize,
}

impl FakeFavoritesApi {
    pub fn with_favorites(ids: &[RecipeId]) -> Self {
        let api = Self::default();
        api.set_server(ids);
        api
    }

    pub fn set_server(&self, ids: &[RecipeId]) {
        *self.server.lock().unwrap() = ids.to_vec();
    }

    pub fn server(&self) -> Vec<RecipeId> {
        self.server.lock().unwrap().clone()
    }

    /// Make add/remove of `recipe_id` fail
    pub fn fail_for(&self, recipe_id: RecipeId) {
        self.failing.lock().unwrap().insert(recipe_id);
    }

    pub fn fail_list(&self, fail: bool) {
        self.fail_list.store(fail, Ordering::SeqCst);
    }

    /// Hold the next `call` until the returned sender fires
    pub fn hold(&self, call: Call) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().unwrap().insert(call, rx);
        tx
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn add_calls(&self) -> usize {
        self.add_calls.load(Ordering::SeqCst)
    }

    pub fn remove_calls(&self) -> usize {
        self.remove_calls.load(Ordering::SeqCst)
    }

    pub fn tokens(&self) -> Vec<String> {
        self.tokens.lock().unwrap().clone()
    }

    async fn enter(&self, token: &str, call: Call) {
        self.tokens.lock().unwrap().push(token.to_string());
        let gate = self.gates.lock().unwrap().remove(&call);
        if let Some(gate) = gate {
            let _ = gate.await;
        }
    }

    fn check_failing(&self, recipe_id: RecipeId) -> Result<()> {
        if self.failing.lock().unwrap().contains(&recipe_id) {
            return Err(Error::Api {
                status: 500,
                message: "Internal Server Error".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl FavoritesApi for FakeFavoritesApi {
    async fn list(&self, token: &str) -> Result<Vec<FavoriteRecord>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.enter(token, Call::List).await;

        if self.fail_list.load(Ordering::SeqCst) {
            return Err(Error::Api {
                status: 503,
                message: String::new(),
            });
        }

        Ok(self
            .server()
            .into_iter()
            .enumerate()
            .map(|(i, id)| FavoriteRecord::new(i as i64 + 100, RecipeSummary::new(id)))
            .collect())
    }

    async fn add(&self, token: &str, recipe_id: RecipeId) -> Result<String> {
        self.add_calls.fetch_add(1, Ordering::SeqCst);
        self.enter(token, Call::Add(recipe_id)).await;
        self.check_failing(recipe_id)?;

        let mut server = self.server.lock().unwrap();
        if !server.contains(&recipe_id) {
            server.push(recipe_id);
        }
        Ok("Recipe added to favorites".to_string())
    }

    async fn remove(&self, token: &str, recipe_id: RecipeId) -> Result<String> {
        self.remove_calls.fetch_add(1, Ordering::SeqCst);
        self.enter(token, Call::Remove(recipe_id)).await;
        self.check_failing(recipe_id)?;

        self.server.lock().unwrap().retain(|id| *id != recipe_id);
        Ok("Recipe removed from favorites".to_string())
    }
}
