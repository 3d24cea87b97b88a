use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use super::loader::{load_table, LoadError};
use super::model::StudentTable;

// ---------------------------------------------------------------------------
// TableCache – loaded tables memoised by path
// ---------------------------------------------------------------------------

struct CacheEntry {
    modified: Option<SystemTime>,
    table: Arc<StudentTable>,
}

/// Owns every table loaded so far, keyed by file path.
///
/// An entry is reused while the file's modification time is unchanged;
/// [`TableCache::invalidate`] forces the next lookup to re-read the file.
#[derive(Default)]
pub struct TableCache {
    entries: HashMap<PathBuf, CacheEntry>,
}

impl TableCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached table for `path`, loading it on first use or when
    /// the file changed on disk since it was cached.
    pub fn get_or_load(&mut self, path: &Path) -> Result<Arc<StudentTable>, LoadError> {
        let modified = file_modified(path);

        if let Some(entry) = self.entries.get(path) {
            if entry.modified == modified {
                log::debug!("cache hit for {}", path.display());
                return Ok(Arc::clone(&entry.table));
            }
            log::info!("{} changed on disk, reloading", path.display());
        }

        let table = match load_table(path) {
            Ok(table) => Arc::new(table),
            Err(e) => {
                if self.entries.remove(path).is_some() {
                    log::debug!("dropped stale cache entry for {}", path.display());
                }
                return Err(e);
            }
        };
        self.entries.insert(
            path.to_path_buf(),
            CacheEntry {
                modified,
                table: Arc::clone(&table),
            },
        );
        log::debug!("{} table(s) cached", self.len());
        Ok(table)
    }

    /// Drop the entry for `path`. Returns whether one existed.
    pub fn invalidate(&mut self, path: &Path) -> bool {
        self.entries.remove(path).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub fn contains(&self, path: &Path) -> bool {
        self.entries.contains_key(path)
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn file_modified(path: &Path) -> Option<SystemTime> {
    std::fs::metadata(path).and_then(|m| m.modified()).ok()
}
