//! # HostAtHome System Utilities (`common::system`)
//!
//! File: cli/src/common/system/mod.rs
//! Repository: https://github.com/hostathome/cli
//!
//! Host inspection: locating executables on `PATH` and choosing an editor.
//!

/// Executable lookup and editor selection.
pub mod tools;
