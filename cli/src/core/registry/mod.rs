//! # Game Registry
//!
//! File: cli/src/core/registry/mod.rs
//! Repository: https://github.com/hostathome/cli
//!
//! ## Overview
//!
//! Resolves game names to server definitions published in the HostAtHome
//! registry, a static tree of YAML files served over HTTP:
//!
//! ```text
//! <base_url>/index.yaml          games: [minecraft, valheim, ...]
//! <base_url>/games/<name>.yaml   one GameDefinition each
//! ```
//!
//! ## Architecture
//!
//! - `game`: the `GameDefinition` data model.
//! - `store`: the on-disk cache directory (freshness by mtime, atomic writes).
//! - `cache`: `RegistryCache`, which combines an in-process memo, the disk
//!   store, and HTTP fetches with stale-cache fallback.
//! - `error`: `RegistryError`, which keeps "the game does not exist" separate
//!   from "the registry could not be reached".
//!
//! The registry never prints. Commands decide how to report its errors.
//!
pub mod cache;
pub mod error;
pub mod game;
pub mod store;

pub use cache::RegistryCache;
pub use error::RegistryError;
pub use game::{GameDefinition, PortKind};
