//! Environment/runtime helpers
//!
//! Sanity checks on the directories the service reads at startup.

use std::path::Path;

use tracing::{info, warn};

/// Report whether the seed directory is usable.
///
/// A missing directory is not an error: the store simply starts empty.
/// A path that exists but is not a directory is logged and treated the same way.
pub async fn check_seed_dir(seed_dir: &Path) -> bool {
    match tokio::fs::metadata(seed_dir).await {
        Ok(meta) if meta.is_dir() => true,
        Ok(_) => {
            warn!(seed_dir = %seed_dir.display(), "seed path is not a directory; starting with an empty store");
            false
        }
        Err(_) => {
            info!(seed_dir = %seed_dir.display(), "seed directory not found; starting with an empty store");
            false
        }
    }
}
