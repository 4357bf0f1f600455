//! # Registry Disk Store
//!
//! File: cli/src/core/registry/store.rs
//! Repository: https://github.com/hostathome/cli
//!
//! ## Overview
//!
//! The on-disk half of the registry cache. Files live flat under one directory:
//!
//! ```text
//! <cache_dir>/
//!   minecraft.yaml   # raw bytes of games/minecraft.yaml
//!   valheim.yaml
//!   index.json       # normalized ["minecraft", "valheim"]
//! ```
//!
//! A file is fresh while `now - mtime < ttl`. Stale files are never deleted;
//! they are the fallback when the registry cannot be reached.
//!
//! Writes go to a temporary file in the same directory which is then renamed
//! over the target, so a concurrent reader sees either the old or the new file.
//!
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::trace;

const INDEX_FILE: &str = "index.json";

#[derive(Debug, Clone)]
pub struct DiskStore {
    dir: PathBuf,
    ttl: Duration,
}

impl DiskStore {
    pub fn new(dir: impl Into<PathBuf>, ttl: Duration) -> Self {
        Self {
            dir: dir.into(),
            ttl,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Cache path for a single game definition. `name` must already be validated.
    pub fn game_path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}.yaml", name))
    }

    pub fn index_path(&self) -> PathBuf {
        self.dir.join(INDEX_FILE)
    }

    /// True when the file exists and was modified within the freshness window.
    /// A modification time in the future counts as fresh.
    pub fn is_fresh(&self, path: &Path) -> bool {
        let Ok(modified) = fs::metadata(path).and_then(|m| m.modified()) else {
            return false;
        };
        let age = modified.elapsed().unwrap_or(Duration::ZERO);
        trace!(path = %path.display(), age_secs = age.as_secs(), "Cache entry age");
        age < self.ttl
    }

    /// Contents of `path` if it is fresh.
    pub fn read_fresh(&self, path: &Path) -> Option<Vec<u8>> {
        if self.is_fresh(path) {
            fs::read(path).ok()
        } else {
            None
        }
    }

    /// Contents of `path` regardless of age. `Ok(None)` when the file is absent.
    pub fn read_any(&self, path: &Path) -> io::Result<Option<Vec<u8>>> {
        match fs::read(path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Atomically replaces `path` with `bytes`, creating the cache directory if needed.
    pub fn write(&self, path: &Path, bytes: &[u8]) -> io::Result<()> {
        let parent = path.parent().unwrap_or(&self.dir);
        fs::create_dir_all(parent)?;
        let mut tmp = tempfile::NamedTempFile::new_in(parent)?;
        tmp.write_all(bytes)?;
        tmp.as_file().sync_all()?;
        tmp.persist(path).map_err(|e| e.error)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::time::SystemTime;
    use tempfile::tempdir;

    fn age_file(path: &Path, by: Duration) {
        let file = File::options().write(true).open(path).unwrap();
        file.set_modified(SystemTime::now() - by).unwrap();
    }

    #[test]
    fn test_paths() {
        let store = DiskStore::new("/tmp/cache", Duration::from_secs(60));
        assert_eq!(store.game_path("minecraft"), PathBuf::from("/tmp/cache/minecraft.yaml"));
        assert_eq!(store.index_path(), PathBuf::from("/tmp/cache/index.json"));
    }

    #[test]
    fn test_write_then_read_is_identical() {
        let dir = tempdir().unwrap();
        let store = DiskStore::new(dir.path().join("nested/cache"), Duration::from_secs(3600));
        let path = store.game_path("rust");
        let payload = b"name: rust\nimage: \"ghcr.io/x/rust:1\"\n\xf0\x9f\xa6\x80";

        store.write(&path, payload).unwrap();

        assert!(store.is_fresh(&path));
        assert_eq!(store.read_fresh(&path).unwrap(), payload);
    }

    #[test]
    fn test_stale_file_is_not_fresh_but_still_readable() {
        let dir = tempdir().unwrap();
        let store = DiskStore::new(dir.path(), Duration::from_secs(3600));
        let path = store.game_path("old");
        store.write(&path, b"name: old").unwrap();
        age_file(&path, Duration::from_secs(7200));

        assert!(!store.is_fresh(&path));
        assert!(store.read_fresh(&path).is_none());
        assert_eq!(store.read_any(&path).unwrap().unwrap(), b"name: old");
    }

    #[test]
    fn test_missing_file() {
        let dir = tempdir().unwrap();
        let store = DiskStore::new(dir.path(), Duration::from_secs(3600));
        let path = store.game_path("ghost");
        assert!(!store.is_fresh(&path));
        assert!(store.read_any(&path).unwrap().is_none());
    }

    #[test]
    fn test_overwrite_replaces_contents() {
        let dir = tempdir().unwrap();
        let store = DiskStore::new(dir.path(), Duration::from_secs(3600));
        let path = store.index_path();
        store.write(&path, b"[\"a\",\"b\",\"c\"]").unwrap();
        store.write(&path, b"[\"a\"]").unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"[\"a\"]");
        // No temp files left behind.
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }
}
