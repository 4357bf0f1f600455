//! # HostAtHome CLI Integration Test Helpers
//!
//! File: cli/tests/common.rs
//! Repository: https://github.com/hostathome/cli
//!
//! Shared helpers for the integration tests in `cli/tests/`. Each test file
//! declares `mod common;` and uses what it needs.
//!
//! Every command runs inside a sandbox directory: `HOME` and the XDG config
//! directory point into it, and it holds a `.git` directory so the project
//! config search never walks up into the real filesystem.
//!
#![allow(dead_code)]

pub use assert_cmd::Command;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// `hostathome` binary built for this test run.
pub fn hostathome_cmd() -> Command {
    Command::cargo_bin("hostathome").expect("Failed to find hostathome binary for testing")
}

/// Creates an isolated working directory with the given `.hostathome.toml`.
pub fn sandbox(project_config: &str) -> TempDir {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    fs::create_dir(dir.path().join(".git")).expect("Failed to create .git");
    fs::write(dir.path().join(".hostathome.toml"), project_config)
        .expect("Failed to write .hostathome.toml");
    dir
}

/// `hostathome_cmd()` running in `dir` with `HOME` redirected into it.
pub fn sandboxed_cmd(dir: &Path) -> Command {
    let mut cmd = hostathome_cmd();
    cmd.current_dir(dir)
        .env("HOME", dir)
        .env("XDG_CONFIG_HOME", dir.join("xdg"))
        .env_remove("RUST_LOG");
    cmd
}

/// Project config pointing the registry at `base_url` with update checks off.
pub fn registry_config(base_url: &str, cache_dir: &Path) -> String {
    format!(
        "[registry]\nbase_url = \"{}\"\ncache_dir = \"{}\"\nhttp_timeout_secs = 5\n\n[updates]\ncheck = false\n",
        base_url,
        cache_dir.display()
    )
}
