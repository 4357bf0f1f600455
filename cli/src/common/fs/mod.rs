//! # HostAtHome Filesystem Utilities
//!
//! File: cli/src/common/fs/mod.rs
//! Repository: https://github.com/hostathome/cli
//!
//! Server directory creation and removal. Import from the submodule,
//! e.g. `use crate::common::fs::io::create_server_dirs;`.
//!

/// Directory helpers for `<root>/<game>-server` (e.g., `create_server_dirs`, `remove_server_dir`).
pub mod io;
