//! # HostAtHome Core Infrastructure
//!
//! File: cli/src/core/mod.rs
//! Repository: https://github.com/hostathome/cli
//!
//! ## Overview
//!
//! This module aggregates the core components that the command modules build
//! on. None of them talk to Docker or print to the terminal.
//!
//! ## Architecture
//!
//! - `config`: Configuration loading, merging, and validation
//! - `error`: Error types and the crate-wide `Result` alias
//! - `registry`: Game definitions and the cached registry client
//! - `validate`: Game name and port checks
//! - `version`: Release lookup and version comparison for updates
//!
//! ## Usage
//!
//! ```rust
//! use crate::core::config;
//! use crate::core::error::{HostError, Result};
//! use crate::core::registry::RegistryCache;
//! ```
//!
pub mod config;
pub mod error;
pub mod registry;
pub mod validate;
pub mod version;
