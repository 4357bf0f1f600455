//! # HostAtHome Docker Module Interface
//!
//! File: cli/src/common/docker/mod.rs
//! Repository: https://github.com/hostathome/cli
//!
//! ## Overview
//!
//! This module is the CLI's only point of contact with the Docker Engine API.
//! It wraps `bollard` in operations phrased in terms of game servers: a game
//! named `minecraft` runs in a container named `hostathome-minecraft`, labelled
//! `hostathome=true` and `hostathome.game=minecraft`.
//!
//! ## Architecture
//!
//! - **`connect`**: Connects to the daemon and builds the [`Engine`] handle.
//! - **`images`**: Pulls, checks, and removes images.
//! - **`state`**: Finds managed containers and reports their status.
//! - **`lifecycle`**: Creates, starts, stops, restarts, and removes game server containers.
//! - **`interaction`**: Streams logs and copies default config files out of an image.
//!
//! An [`Engine`] is created once per command and passed to every operation.
//! Each call to the daemon is bounded by the configured operation timeout;
//! image pulls use the longer pull timeout and log streaming is unbounded.
//!
//! ## Usage
//!
//! ```rust
//! let engine = docker::connect::connect(&cfg.docker).await?;
//! docker::images::pull_image(&engine, &game.image, |_| {}).await?;
//! docker::lifecycle::run_server(&engine, "minecraft", &game, &server_dir, false).await?;
//! ```
//!
use crate::core::config::DockerConfig;
use crate::core::error::{HostError, Result};
use anyhow::anyhow;
use bollard::Docker;
use std::future::Future;
use std::time::Duration;

pub mod connect;
pub mod images;
pub mod interaction;
pub mod lifecycle;
pub mod state;

/// Prefix for every container the CLI creates.
pub const CONTAINER_PREFIX: &str = "hostathome-";
/// Label marking a container as managed by the CLI.
pub const LABEL_MANAGED: &str = "hostathome";
/// Label holding the game name.
pub const LABEL_GAME: &str = "hostathome.game";

/// `hostathome-<game>`
pub fn container_name(game: &str) -> String {
    format!("{}{}", CONTAINER_PREFIX, game)
}

/// A connected Docker client plus the time limits its operations run under.
#[derive(Debug, Clone)]
pub struct Engine {
    docker: Docker,
    op_timeout: Duration,
    pull_timeout: Duration,
}

impl Engine {
    pub fn new(docker: Docker, cfg: &DockerConfig) -> Self {
        Self {
            docker,
            op_timeout: Duration::from_secs(cfg.op_timeout_secs),
            pull_timeout: Duration::from_secs(cfg.pull_timeout_secs),
        }
    }

    pub fn api(&self) -> &Docker {
        &self.docker
    }

    /// Runs `fut` under the operation timeout.
    pub async fn op<T, F>(&self, operation: &str, fut: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        timed(self.op_timeout, operation, fut).await
    }

    /// Runs `fut` under the pull timeout.
    pub async fn pull_op<T, F>(&self, operation: &str, fut: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        timed(self.pull_timeout, operation, fut).await
    }
}

async fn timed<T, F>(limit: Duration, operation: &str, fut: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    match tokio::time::timeout(limit, fut).await {
        Ok(result) => result,
        Err(_) => Err(anyhow!(HostError::DockerTimeout {
            operation: operation.to_string(),
            secs: limit.as_secs(),
        })),
    }
}

/// True when a bollard error is the daemon answering with `status`.
pub(crate) fn is_status(err: &bollard::errors::Error, status: u16) -> bool {
    matches!(
        err,
        bollard::errors::Error::DockerResponseServerError { status_code, .. } if *status_code == status
    )
}
