//! Seed loader: builds the initial `netid -> food` map from a directory.
//!
//! Every regular file named `<netid>.<extension>` contributes one record whose
//! value is the file's first line, trimmed. Unreadable files and blank first
//! lines are skipped; a missing directory yields an empty map.

use std::collections::HashMap;
use std::path::Path;

use tokio::fs;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, warn};

use crate::errors::ServiceError;

pub async fn load_seed_dir(dir: &Path, extension: &str) -> Result<HashMap<String, String>, ServiceError> {
    let mut foods = HashMap::new();
    if !common::env::check_seed_dir(dir).await {
        return Ok(foods);
    }

    let mut entries = fs::read_dir(dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some(extension) {
            continue;
        }
        let netid = match path.file_stem().and_then(|s| s.to_str()) {
            Some(stem) if !stem.is_empty() => stem.to_string(),
            _ => {
                warn!(file = %path.display(), "seed file name is not a usable netid; skipped");
                continue;
            }
        };
        // follows symlinks, so a linked seed file still counts
        match fs::metadata(&path).await {
            Ok(meta) if meta.is_file() => {}
            Ok(_) => continue,
            Err(e) => {
                warn!(file = %path.display(), error = %e, "cannot stat seed file; skipped");
                continue;
            }
        }

        match read_first_line(&path).await {
            Ok(line) => {
                let food = line.trim();
                if food.is_empty() {
                    debug!(%netid, "seed file has a blank first line; skipped");
                    continue;
                }
                foods.insert(netid, food.to_string());
            }
            Err(e) => {
                warn!(file = %path.display(), error = %e, "error reading seed file; skipped");
            }
        }
    }
    Ok(foods)
}

async fn read_first_line(path: &Path) -> std::io::Result<String> {
    let file = fs::File::open(path).await?;
    let mut reader = BufReader::new(file);
    let mut line = String::new();
    reader.read_line(&mut line).await?;
    Ok(line)
}
