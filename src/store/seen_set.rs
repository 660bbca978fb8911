// src/store/seen_set.rs

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Identifiers of listings that were already delivered.
pub type SeenSet = HashSet<String>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("state file I/O failed for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("state file JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Durable record of seen listing identifiers.
pub trait SeenStore {
    /// Never fails: missing or unreadable state means "nothing seen yet".
    fn load(&self) -> SeenSet;

    /// Overwrites any previously stored set.
    fn save(&self, seen: &SeenSet) -> Result<(), StoreError>;
}

/// Stores the set as a JSON array of strings.
#[derive(Debug, Clone)]
pub struct JsonSeenStore {
    path: PathBuf,
}

impl JsonSeenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn io_err(&self, source: io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl SeenStore for JsonSeenStore {
    fn load(&self) -> SeenSet {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::info!(path = %self.path.display(), "no state file yet, starting empty");
                return SeenSet::new();
            }
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "⚠️ state file unreadable, starting empty");
                return SeenSet::new();
            }
        };

        match serde_json::from_str::<Vec<String>>(&raw) {
            Ok(ids) => {
                let seen: SeenSet = ids.into_iter().collect();
                tracing::info!(path = %self.path.display(), count = seen.len(), "loaded seen listings");
                seen
            }
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "⚠️ state file malformed, starting empty");
                SeenSet::new()
            }
        }
    }

    fn save(&self, seen: &SeenSet) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.io_err(e))?;
        }

        let mut ids: Vec<&String> = seen.iter().collect();
        ids.sort();
        let json = serde_json::to_vec(&ids)?;

        // Write-then-rename so a crash never leaves half a file behind.
        let tmp = self.tmp_path();
        fs::write(&tmp, json).map_err(|e| self.io_err(e))?;
        fs::rename(&tmp, &self.path).map_err(|e| self.io_err(e))?;

        tracing::debug!(path = %self.path.display(), count = ids.len(), "saved seen listings");
        Ok(())
    }
}
