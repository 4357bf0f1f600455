//! # HostAtHome Error Types
//!
//! File: cli/src/core/error.rs
//! Repository: https://github.com/hostathome/cli
//!
//! ## Overview
//!
//! This module defines the application-level error type used throughout the
//! HostAtHome CLI. Errors are raised as specific `HostError` variants and then
//! propagated as `anyhow::Error`, so callers can attach context with
//! `.context(...)` and still recover the typed variant with `downcast_ref`.
//!
//! ## Architecture
//!
//! - `HostError`: a `thiserror` enum covering configuration, filesystem,
//!   Docker, validation, and external command failures.
//! - `Result<T>`: an alias for `anyhow::Result<T>`.
//!
//! Registry lookups have their own typed error (`core::registry::RegistryError`)
//! because callers need to tell authoritative absence apart from network trouble.
//! It converts into `HostError::Registry`.
//!
//! ## Examples
//!
//! ```rust
//! // Return a specific error type
//! if containers.is_empty() {
//!     return Err(anyhow!(HostError::ContainerNotFound { name: name.to_string() }));
//! }
//!
//! // Pattern matching on error types
//! match result {
//!     Err(e) if e.downcast_ref::<HostError>().is_some_and(|he| matches!(he, HostError::ContainerNotFound { .. })) => {
//!         println!("Nothing to remove");
//!     }
//!     other => other?,
//! }
//! ```
//!
use crate::core::registry::RegistryError;
use thiserror::Error;

/// Custom error type for the HostAtHome application.
#[derive(Error, Debug)]
pub enum HostError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Filesystem error: {0}")]
    FileSystem(String),

    #[error("Docker API interaction failed: {source}")]
    DockerApi {
        #[from]
        source: bollard::errors::Error,
    },

    #[error("Docker operation failed: {0}")]
    DockerOperation(String),

    #[error("Docker operation timed out after {secs}s: {operation}")]
    DockerTimeout { operation: String, secs: u64 },

    #[error("Container '{name}' not found.")]
    ContainerNotFound { name: String },

    #[error("No running server found for '{game}'.")]
    ServerNotRunning { game: String },

    #[error("Local image {name} not found. Build it first with: docker build -t {name} .")]
    ImageNotFound { name: String },

    #[error("Invalid game name: {0}")]
    InvalidGameName(String),

    #[error("{label} port {port} out of range (1-65535)")]
    InvalidPort { label: String, port: u32 },

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("External command failed: {cmd}, Status: {status}")]
    ExternalCommand { cmd: String, status: String },
}

/// Type alias for Result using anyhow::Error for broad compatibility.
pub type Result<T> = anyhow::Result<T>;

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let config_err = HostError::Config("Missing setting 'foo'".to_string());
        assert_eq!(
            config_err.to_string(),
            "Configuration error: Missing setting 'foo'"
        );

        let container_not_found = HostError::ContainerNotFound {
            name: "hostathome-minecraft".into(),
        };
        assert_eq!(
            container_not_found.to_string(),
            "Container 'hostathome-minecraft' not found."
        );

        let port = HostError::InvalidPort {
            label: "external player".into(),
            port: 70000,
        };
        assert_eq!(
            port.to_string(),
            "external player port 70000 out of range (1-65535)"
        );
    }

    #[test]
    fn test_registry_error_is_transparent() {
        let err: HostError = RegistryError::NotFound {
            name: "doom".into(),
        }
        .into();
        assert_eq!(err.to_string(), "game 'doom' not found in registry");
    }
}
