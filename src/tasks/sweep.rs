//! Expired Entry Sweep
//!
//! Collects every expired entry in one pass instead of waiting for reads to
//! trip over them.

use serde::Serialize;
use tracing::{debug, info};

use crate::cache::{CacheStats, JsonFileStore};
use crate::error::Result;

/// Outcome of a sweep.
#[derive(Debug, Clone, Serialize)]
pub struct SweepReport {
    /// Entries removed by this sweep
    pub removed: usize,
    /// Entries a read would still return after the sweep
    pub live_entries: usize,
    /// Store statistics after the sweep
    pub stats: CacheStats,
}

/// Purges expired entries from `store` and reports the remaining state.
///
/// Runs synchronously; it races with any other writer of the same file
/// like every other mutating operation.
pub fn run_sweep(store: &JsonFileStore) -> Result<SweepReport> {
    let removed = store.purge_expired()?;
    if removed > 0 {
        info!("Sweep: removed {} expired entries", removed);
    } else {
        debug!("Sweep: no expired entries found");
    }

    let stats = store.stats()?;
    let live_entries = stats.live_entries();
    debug!("Sweep: {} live entries remain", live_entries);
    Ok(SweepReport {
        removed,
        live_entries,
        stats,
    })
}
