//! # HostAtHome Common Utilities (`common`)
//!
//! File: cli/src/common/mod.rs
//! Repository: https://github.com/hostathome/cli
//!
//! ## Overview
//!
//! Shared utilities used by the command handlers. Anything that touches the
//! outside world other than the registry lives here: the Docker daemon, the
//! filesystem, child processes, and the terminal.
//!
//! ## Architecture
//!
//! - **`docker`**: Game server containers via `bollard` (connection, images, lifecycle, state, logs and file extraction).
//! - **`fs`**: Server directory layout and filesystem helpers.
//! - **`network`**: Streaming downloads used by `update`.
//! - **`process`**: Running interactive external programs (editor, `sudo dpkg`).
//! - **`system`**: Locating executables and the user's editor.
//! - **`ui`**: Status lines, spinners, tables and prompts.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::{docker, fs, ui};
//!
//! # async fn run_example(config: &crate::core::config::Config) -> crate::core::error::Result<()> {
//! let engine = docker::connect::connect(&config.docker).await?;
//! let dir = config.servers.server_dir("minecraft");
//! fs::io::create_server_dirs(&dir)?;
//! ui::success("Directories ready");
//! # Ok(())
//! # }
//! ```
//!

/// Game server containers and images on the local Docker daemon.
pub mod docker;
/// Server directory layout and filesystem helpers.
pub mod fs;
/// HTTP downloads outside the registry.
pub mod network;
/// Interactive external processes.
pub mod process;
/// Executable and editor lookup.
pub mod system;
/// Terminal output: status lines, spinners, tables, prompts.
pub mod ui;
