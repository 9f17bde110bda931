use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use tracing::debug;

use crate::error::Result;

static SESSION_COUNTER: AtomicU64 = AtomicU64::new(1);

pub fn clickwatch_data_dir() -> PathBuf {
    dirs::home_dir()
        .expect("Could not determine home directory")
        .join(".clickwatch")
}

/// Default location of the persisted session id.
pub fn session_file() -> PathBuf {
    clickwatch_data_dir().join("session")
}

/// Load the session id persisted at `path`, or generate and persist a new one.
/// The id is process-scoped configuration handed to the controller; nothing
/// else in the crate touches this file.
pub fn load_or_create(path: &Path) -> Result<String> {
    if let Ok(existing) = fs::read_to_string(path) {
        let trimmed = existing.trim();
        if !trimmed.is_empty() {
            debug!(session_id = trimmed, "Reusing persisted session id");
            return Ok(trimmed.to_string());
        }
    }

    let id = generate();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, &id)?;
    debug!(session_id = %id, "Generated new session id");
    Ok(id)
}

fn generate() -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    format!(
        "sess-{}-{}",
        millis,
        SESSION_COUNTER.fetch_add(1, Ordering::SeqCst)
    )
}
