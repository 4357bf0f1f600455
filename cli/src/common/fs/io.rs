//! # HostAtHome Filesystem Operations
//!
//! File: cli/src/common/fs/io.rs
//! Repository: https://github.com/hostathome/cli
//!
//! ## Overview
//!
//! Filesystem helpers for game server directories. Each installed game owns
//! one directory under the configured servers root:
//!
//! ```text
//! <root>/<game>-server/
//!   data/      mounted at /data, world saves and server state
//!   configs/   mounted at /configs, config.yaml and mods.yaml
//! ```
//!
//! ## Architecture
//!
//! - **`ensure_dir_exists`**: `mkdir -p`, failing if the path is a file.
//! - **`create_server_dirs`**: creates `data/` and `configs/` under a server directory.
//! - **`remove_server_dir`**: deletes a server directory and everything in it.
//!
use crate::core::error::{HostError, Result};
use anyhow::Context;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Ensures that a directory exists at the specified path, creating parents as needed.
///
/// # Errors
///
/// Returns an `Err` if:
/// - The path exists but is not a directory.
/// - Creating the directory fails (e.g., due to permissions).
pub fn ensure_dir_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("Failed to create directory {}", path.display()))?;
        info!("Created directory: {}", path.display());
    } else if !path.is_dir() {
        anyhow::bail!(HostError::FileSystem(format!(
            "Path exists but is not a directory: {}",
            path.display()
        )));
    } else {
        debug!("Directory already exists: {}", path.display());
    }
    Ok(())
}

/// Creates `<server_dir>/data` and `<server_dir>/configs`.
pub fn create_server_dirs(server_dir: &Path) -> Result<()> {
    for sub in ["data", "configs"] {
        ensure_dir_exists(&server_dir.join(sub))
            .with_context(|| format!("Failed to prepare {} directory", sub))?;
    }
    Ok(())
}

/// Deletes `server_dir` recursively. Returns `false` if it did not exist.
pub fn remove_server_dir(server_dir: &Path) -> Result<bool> {
    if !server_dir.exists() {
        debug!("{} does not exist, nothing to delete", server_dir.display());
        return Ok(false);
    }
    if !server_dir.is_dir() {
        anyhow::bail!(HostError::FileSystem(format!(
            "Refusing to delete {}: not a directory",
            server_dir.display()
        )));
    }
    fs::remove_dir_all(server_dir)
        .with_context(|| format!("Failed to delete {}", server_dir.display()))?;
    info!("Deleted {}", server_dir.display());
    Ok(true)
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_ensure_dir_exists_creates_new() -> Result<()> {
        let base_dir = tempdir()?;
        let new_dir = base_dir.path().join("new/subdir");
        assert!(!new_dir.exists());
        ensure_dir_exists(&new_dir)?;
        assert!(new_dir.is_dir());
        Ok(())
    }

    #[test]
    fn test_ensure_dir_exists_path_is_file() -> Result<()> {
        let base_dir = tempdir()?;
        let file_path = base_dir.path().join("a_file.txt");
        fs::write(&file_path, "hello")?;
        let result = ensure_dir_exists(&file_path);
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Path exists but is not a directory"));
        Ok(())
    }

    #[test]
    fn test_create_server_dirs_is_idempotent() -> Result<()> {
        let base_dir = tempdir()?;
        let server = base_dir.path().join("minecraft-server");
        create_server_dirs(&server)?;
        fs::write(server.join("configs/config.yaml"), "motd: hi")?;
        create_server_dirs(&server)?;

        assert!(server.join("data").is_dir());
        assert_eq!(fs::read_to_string(server.join("configs/config.yaml"))?, "motd: hi");
        Ok(())
    }

    #[test]
    fn test_remove_server_dir() -> Result<()> {
        let base_dir = tempdir()?;
        let server = base_dir.path().join("valheim-server");
        create_server_dirs(&server)?;
        fs::write(server.join("data/world.db"), [0u8; 16])?;

        assert!(remove_server_dir(&server)?);
        assert!(!server.exists());
        assert!(!remove_server_dir(&server)?);
        Ok(())
    }
}
