//! # HostAtHome Network Utilities Module (`common::network`)
//!
//! File: cli/src/common/network/mod.rs
//! Repository: https://github.com/hostathome/cli
//!
//! HTTP helpers that are not part of the registry. Currently this is the
//! release download used by `update`.
//!

/// Streaming file downloads.
pub mod download;
