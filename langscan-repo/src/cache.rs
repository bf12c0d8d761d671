//! Snapshot cache
//!
//! One JSON file per `(owner, repo)` under an owner-keyed directory. Entries
//! are independent; writes are full-file overwrites, so concurrent fetches of
//! different repositories never contend and same-repository races resolve
//! last-writer-wins. A missing or corrupt entry is a cache miss, never an
//! error.

use langscan_core::{ErrorContext, LangscanError, LangscanResult, RepoSnapshot};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

#[derive(Debug, Clone)]
pub struct SnapshotCache {
    root: PathBuf,
}

impl SnapshotCache {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Cache file location for a repository: `<root>/<owner>/<repo>.json`
    pub fn entry_path(&self, owner: &str, repo: &str) -> PathBuf {
        self.root.join(owner).join(format!("{}.json", repo))
    }

    /// Read a cached snapshot. Missing files and unparseable contents are
    /// both treated as a miss.
    pub fn read(&self, owner: &str, repo: &str) -> Option<RepoSnapshot> {
        let path = self.entry_path(owner, repo);
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(_) => return None,
        };

        match serde_json::from_str(&content) {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                warn!(
                    path = %path.display(),
                    error = %e,
                    "Discarding corrupt cache entry"
                );
                None
            }
        }
    }

    /// Persist a snapshot, overwriting any previous entry.
    pub fn write(&self, snapshot: &RepoSnapshot) -> LangscanResult<()> {
        let path = self.entry_path(&snapshot.owner, &snapshot.repo);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| LangscanError::Repository {
                message: format!("Failed to create cache directory: {}", e),
                source: Some(Box::new(e)),
                context: ErrorContext::new("snapshot_cache")
                    .with_operation("write")
                    .with_suggestion("Check cache directory permissions"),
            })?;
        }

        let content = serde_json::to_string_pretty(snapshot)?;
        std::fs::write(&path, content)?;

        debug!(
            owner = %snapshot.owner,
            repo = %snapshot.repo,
            path = %path.display(),
            "Snapshot cached"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use langscan_core::FileRecord;

    fn sample_snapshot() -> RepoSnapshot {
        RepoSnapshot {
            owner: "octocat".to_string(),
            repo: "hello-world".to_string(),
            pushed_at: "2024-05-01T12:00:00Z".to_string(),
            scanned_at: Utc::now(),
            files: vec![FileRecord::new("src/main.rs", 1234)],
            manifest: None,
        }
    }

    #[test]
    fn write_then_read_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let cache = SnapshotCache::new(dir.path());

        let snapshot = sample_snapshot();
        cache.write(&snapshot).unwrap();

        let loaded = cache.read("octocat", "hello-world").unwrap();
        assert_eq!(loaded.pushed_at, snapshot.pushed_at);
        assert_eq!(loaded.files.len(), 1);
        assert_eq!(loaded.files[0].path, "src/main.rs");
    }

    #[test]
    fn entries_are_keyed_by_owner_directory() {
        let dir = tempfile::tempdir().unwrap();
        let cache = SnapshotCache::new(dir.path());
        assert_eq!(
            cache.entry_path("octocat", "hello-world"),
            dir.path().join("octocat").join("hello-world.json")
        );
    }

    #[test]
    fn missing_entry_is_a_miss() {
        let dir = tempfile::tempdir().unwrap();
        let cache = SnapshotCache::new(dir.path());
        assert!(cache.read("nobody", "nothing").is_none());
    }

    #[test]
    fn corrupt_entry_is_a_miss() {
        let dir = tempfile::tempdir().unwrap();
        let cache = SnapshotCache::new(dir.path());

        let path = cache.entry_path("octocat", "broken");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "{not json at all").unwrap();

        assert!(cache.read("octocat", "broken").is_none());
    }

    #[test]
    fn write_overwrites_previous_entry() {
        let dir = tempfile::tempdir().unwrap();
        let cache = SnapshotCache::new(dir.path());

        let mut snapshot = sample_snapshot();
        cache.write(&snapshot).unwrap();

        snapshot.pushed_at = "2024-06-01T00:00:00Z".to_string();
        cache.write(&snapshot).unwrap();

        let loaded = cache.read("octocat", "hello-world").unwrap();
        assert_eq!(loaded.pushed_at, "2024-06-01T00:00:00Z");
    }
}
