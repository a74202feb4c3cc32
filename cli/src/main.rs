mod config;
mod logging;
mod terminal;

use anyhow::Result;
use clap::{Parser, Subcommand};
use recipebox_core::models::RecipeId;
use recipebox_core::{AuthStore, FavoritesSync, HttpFavoritesApi, SyncOutcome};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use terminal::TerminalNotifier;

#[derive(Parser, Debug)]
#[command(name = "recipebox", about = "Manage your favorite recipes")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Config file (defaults to the user config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Backend URL override
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Bearer token; falls back to the config file
    #[arg(long, global = true, env = "RECIPEBOX_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    /// Print favorited recipe ids
    List,
    /// Print whether a recipe is favorited
    Check { recipe_id: RecipeId },
    /// Favorite a recipe
    Add { recipe_id: RecipeId },
    /// Unfavorite a recipe
    Remove { recipe_id: RecipeId },
    /// Flip the favorite state of a recipe
    Toggle { recipe_id: RecipeId },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    logging::init(cli.verbose)?;

    let config_path = cli.config.clone().unwrap_or_else(config::default_config_path);
    let mut config = config::load_config(&config_path)?;
    if let Some(base_url) = cli.base_url {
        config.api.base_url = base_url;
    }

    let auth = match cli.token.or(config.api.token.clone()) {
        Some(token) => AuthStore::with_token(token),
        None => AuthStore::new(),
    };
    let api = HttpFavoritesApi::new(&config.api_config())?;
    let favorites = FavoritesSync::new(Arc::new(api), Arc::new(auth), Arc::new(TerminalNotifier));

    let succeeded = run(&favorites, cli.command, &mut io::stdout()).await?;
    Ok(if succeeded { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

/// Load the favorites, apply `command` and print the result.
/// Returns whether the command did what was asked.
async fn run<W: Write>(favorites: &FavoritesSync, command: Command, out: &mut W) -> Result<bool> {
    match favorites.fetch_all().await {
        SyncOutcome::Failed => {
            if let Some(error) = favorites.error() {
                eprintln!("Error: {}", error);
            }
            return Ok(false);
        }
        SyncOutcome::Unauthenticated if matches!(command, Command::List | Command::Check { .. }) => {
            eprintln!("Error: no token; pass --token or set RECIPEBOX_TOKEN");
            return Ok(false);
        }
        _ => {}
    }

    let outcome = match command {
        Command::List => {
            print_ids(favorites, out)?;
            return Ok(true);
        }
        Command::Check { recipe_id } => {
            let answer = if favorites.is_favorite(recipe_id) { "yes" } else { "no" };
            writeln!(out, "{}", answer)?;
            return Ok(true);
        }
        Command::Add { recipe_id } => favorites.add(recipe_id).await,
        Command::Remove { recipe_id } => favorites.remove(recipe_id).await,
        Command::Toggle { recipe_id } => favorites.toggle(recipe_id).await,
    };

    if outcome != SyncOutcome::Unauthenticated {
        print_ids(favorites, out)?;
    }

    Ok(!matches!(outcome, SyncOutcome::Failed | SyncOutcome::Unauthenticated))
}

fn print_ids<W: Write>(favorites: &FavoritesSync, out: &mut W) -> Result<()> {
    for id in favorites.ids() {
        writeln!(out, "{}", id)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use recipebox_core::models::{FavoriteRecord, NotificationLevel, RecipeSummary};
    use recipebox_core::{Error, FavoritesApi, RecordingNotifier};
    use std::sync::Mutex;

    /// Server that keeps favorites in memory and rejects recipe 13
    #[derive(Default)]
    struct MemoryApi {
        ids: Mutex<Vec<RecipeId>>,
    }

    #[async_trait]
    impl FavoritesApi for MemoryApi {
        async fn list(&self, _token: &str) -> recipebox_core::Result<Vec<FavoriteRecord>> {
            Ok(self
                .ids
                .lock()
                .unwrap()
                .iter()
                .map(|id| FavoriteRecord::new(*id, RecipeSummary::new(*id)))
                .collect())
        }

        async fn add(&self, _token: &str, recipe_id: RecipeId) -> recipebox_core::Result<String> {
            if recipe_id == 13 {
                return Err(Error::Api { status: 500, message: String::new() });
            }
            self.ids.lock().unwrap().push(recipe_id);
            Ok("ok".to_string())
        }

        async fn remove(&self, _token: &str, recipe_id: RecipeId) -> recipebox_core::Result<String> {
            self.ids.lock().unwrap().retain(|id| *id != recipe_id);
            Ok("ok".to_string())
        }
    }

    fn favorites(ids: &[RecipeId], token: Option<&str>) -> (FavoritesSync, Arc<RecordingNotifier>) {
        let api = MemoryApi {
            ids: Mutex::new(ids.to_vec()),
        };
        let auth = token.map(AuthStore::with_token).unwrap_or_default();
        let notifier = Arc::new(RecordingNotifier::new());
        let sync = FavoritesSync::new(Arc::new(api), Arc::new(auth), notifier.clone());
        (sync, notifier)
    }

    async fn run_to_string(favorites: &FavoritesSync, command: Command) -> (bool, String) {
        let mut out = Vec::new();
        let ok = run(favorites, command, &mut out).await.unwrap();
        (ok, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_parse_arguments() {
        let cli = Cli::try_parse_from(["recipebox", "--token", "abc", "toggle", "12"]).unwrap();
        assert_eq!(cli.command, Command::Toggle { recipe_id: 12 });
        assert_eq!(cli.token.as_deref(), Some("abc"));

        let cli = Cli::try_parse_from(["recipebox", "list", "-v", "--base-url", "http://x"]).unwrap();
        assert_eq!(cli.command, Command::List);
        assert!(cli.verbose);
        assert_eq!(cli.base_url.as_deref(), Some("http://x"));

        assert!(Cli::try_parse_from(["recipebox", "add", "pasta"]).is_err());
    }

    #[tokio::test]
    async fn test_list_and_check() {
        let (sync, _) = favorites(&[3, 5], Some("t"));

        let (ok, out) = run_to_string(&sync, Command::List).await;
        assert!(ok);
        assert_eq!(out, "3\n5\n");

        let (ok, out) = run_to_string(&sync, Command::Check { recipe_id: 4 }).await;
        assert!(ok);
        assert_eq!(out, "no\n");
    }

    #[tokio::test]
    async fn test_add_prints_reloaded_list() {
        let (sync, notifier) = favorites(&[3], Some("t"));

        let (ok, out) = run_to_string(&sync, Command::Add { recipe_id: 8 }).await;
        assert!(ok);
        assert_eq!(out, "3\n8\n");
        assert_eq!(notifier.count_of(NotificationLevel::Success), 1);
    }

    #[tokio::test]
    async fn test_failed_add_reports_failure() {
        let (sync, notifier) = favorites(&[3], Some("t"));

        let (ok, out) = run_to_string(&sync, Command::Add { recipe_id: 13 }).await;
        assert!(!ok);
        assert_eq!(out, "3\n");
        assert_eq!(notifier.count_of(NotificationLevel::Error), 1);
    }

    #[tokio::test]
    async fn test_redundant_remove_still_succeeds() {
        let (sync, notifier) = favorites(&[3], Some("t"));

        let (ok, _) = run_to_string(&sync, Command::Remove { recipe_id: 4 }).await;
        assert!(ok);
        assert_eq!(notifier.count_of(NotificationLevel::Info), 1);
    }

    #[tokio::test]
    async fn test_without_token() {
        let (sync, notifier) = favorites(&[3], None);

        let (ok, out) = run_to_string(&sync, Command::List).await;
        assert!(!ok);
        assert!(out.is_empty());

        let (ok, out) = run_to_string(&sync, Command::Toggle { recipe_id: 3 }).await;
        assert!(!ok);
        assert!(out.is_empty());
        assert_eq!(notifier.count_of(NotificationLevel::Error), 1);
    }
}
