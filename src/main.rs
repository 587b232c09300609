//! Filecache - An embedded, file-persisted key-value cache
//!
//! Maintenance entry point: sweeps expired entries from the configured
//! cache file and prints the resulting statistics as JSON.

use anyhow::Context;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use filecache::tasks::run_sweep;
use filecache::{CacheBackend, StoreConfig};

/// Main entry point for the cache sweeper.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Validate the cache path and open the store
/// 4. Sweep expired entries
/// 5. Print statistics to stdout
fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "filecache=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = StoreConfig::from_env();
    info!("Configuration loaded: {:?}", config);

    let store = config
        .open()
        .with_context(|| format!("failed to open cache file {}", config.path.display()))?;
    info!(
        "Opened {} store at {}",
        store.backend_type(),
        store.path().display()
    );
    let defaults = store.defaults();
    info!(
        "Defaults: ttl={}s tags={:?} zero_ttl={:?}",
        defaults.expiration.as_secs(),
        defaults.tags,
        store.zero_ttl_policy()
    );

    let report = run_sweep(&store).context("sweep failed")?;
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
