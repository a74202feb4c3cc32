use anyhow::{anyhow, Result};
use std::env;
use tracing_subscriber::EnvFilter;

/// Install the stderr log subscriber.
/// `RUST_LOG` wins over `verbose` when set.
pub fn init(verbose: bool) -> Result<()> {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = env::var("RUST_LOG")
        .map_or_else(|_| EnvFilter::new(default_level), |directive| EnvFilter::new(&directive))
        .add_directive("hyper=warn".parse()?)
        .add_directive("reqwest=warn".parse()?);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow!("Failed to initialize logging: {}", e))
}
