//! # HostAtHome Command Modules
//!
//! File: cli/src/commands/mod.rs
//! Repository: https://github.com/hostathome/cli
//!
//! ## Overview
//!
//! One module per top-level `hostathome` subcommand. Each module defines a
//! `clap` argument struct (`InstallArgs`, `RunArgs`, ...) and an async
//! `handle_*` function that receives the parsed arguments and the resolved
//! [`Config`](crate::core::config::Config).
//!
//! ## Architecture
//!
//! - `doctor`: Checks Docker and registry access
//! - `install` / `uninstall`: Set up or tear down a game server
//! - `run` / `stop` / `restart` / `remove`: Container lifecycle
//! - `logs` / `status`: Inspect running servers
//! - `config` / `mods`: Edit server configuration files
//! - `list`: Games available in the registry
//! - `update`: Self-update from GitHub releases
//!
//! `context` holds the steps most commands share: validating the game name,
//! resolving it through the registry cache, and connecting to Docker.
//!

pub mod config;
pub mod context;
pub mod doctor;
pub mod install;
pub mod list;
pub mod logs;
pub mod mods;
pub mod remove;
pub mod restart;
pub mod run;
pub mod status;
pub mod stop;
pub mod uninstall;
pub mod update;
