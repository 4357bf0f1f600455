//! Registry lookup errors.
//!
//! `NotFound` and `Parse` always reach the caller. `Transport` and `Remote`
//! only surface when no cached copy could stand in for the remote file.
use reqwest::StatusCode;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RegistryError {
    /// The registry answered 404 for this game.
    #[error("game '{name}' not found in registry")]
    NotFound { name: String },

    /// No response at all (connection refused, DNS, timeout, truncated body).
    #[error("failed to reach registry at {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// A response other than 200 or (for game lookups) 404.
    #[error("failed to fetch {url}: {status}")]
    Remote { url: String, status: StatusCode },

    #[error("failed to parse {what}: {source}")]
    Parse {
        what: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid game name '{name}': {reason}")]
    InvalidGameName { name: String, reason: &'static str },

    #[error("failed to read cache file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl RegistryError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, RegistryError::NotFound { .. })
    }
}

pub type RegistryResult<T> = std::result::Result<T, RegistryError>;
