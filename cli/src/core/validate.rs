//! # Input Validation
//!
//! File: cli/src/core/validate.rs
//! Repository: https://github.com/hostathome/cli
//!
//! ## Overview
//!
//! Checks for user-supplied values that end up in file paths, URLs, container
//! names, or port bindings.
//!
//! A game name becomes part of `<cache_dir>/<name>.yaml`, `<root>/<name>-server`
//! and `hostathome-<name>`, so it is restricted to a safe character set:
//!
//! - 1 to 63 characters (the container name must stay a valid DNS label),
//! - ASCII letters, digits, `_` and `-` only,
//! - no `..`, and no leading `/` or `.`.
//!
use crate::core::error::{HostError, Result};
use anyhow::anyhow;
use regex::Regex;
use std::sync::LazyLock;

const MAX_GAME_NAME_LEN: usize = 63;

static GAME_NAME_RE: LazyLock<std::result::Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9_-]+$"));

/// Returns the reason `name` is not a valid game name, if any.
pub fn check_game_name(name: &str) -> std::result::Result<(), &'static str> {
    if name.is_empty() {
        return Err("name cannot be empty");
    }
    if name.len() > MAX_GAME_NAME_LEN {
        return Err("name is longer than 63 characters");
    }
    if name.contains("..") {
        return Err("name cannot contain '..'");
    }
    if name.starts_with('/') || name.starts_with('.') {
        return Err("name cannot start with '/' or '.'");
    }
    match &*GAME_NAME_RE {
        Ok(re) if re.is_match(name) => Ok(()),
        _ => Err("only letters, digits, '_' and '-' are allowed"),
    }
}

/// Like [`check_game_name`], but as an application error.
pub fn validate_game_name(name: &str) -> Result<()> {
    check_game_name(name)
        .map_err(|reason| anyhow!(HostError::InvalidGameName(format!("'{}': {}", name, reason))))
}

/// Ensures a port is within 1..=65535. `label` names the port in the error,
/// e.g. "external player".
pub fn validate_port(port: u32, label: &str) -> Result<()> {
    if (1..=65535).contains(&port) {
        Ok(())
    } else {
        Err(anyhow!(HostError::InvalidPort {
            label: label.to_string(),
            port,
        }))
    }
}
