//! # Docker Connection
//!
//! File: cli/src/common/docker/connect.rs
//! Repository: https://github.com/hostathome/cli
//!
//! Connects to the local Docker daemon (`/var/run/docker.sock` on Linux, or
//! whatever `DOCKER_HOST` points at) and checks that it answers.
//!
use super::Engine;
use crate::core::config::DockerConfig;
use crate::core::error::{HostError, Result};
use anyhow::{anyhow, Context};
use bollard::image::ListImagesOptions;
use bollard::Docker;
use tracing::{debug, instrument};

/// Builds an [`Engine`] for the local daemon.
///
/// Connecting does not contact the daemon yet. Use [`ping`] to check reachability.
#[instrument(skip(cfg))]
pub async fn connect(cfg: &DockerConfig) -> Result<Engine> {
    let docker = Docker::connect_with_local_defaults()
        .map_err(|e| anyhow!(HostError::DockerApi { source: e }))
        .context("Failed to connect to Docker daemon. Is it running and accessible?")?;
    Ok(Engine::new(docker, cfg))
}

/// Checks that the daemon responds.
#[instrument(skip(engine))]
pub async fn ping(engine: &Engine) -> Result<()> {
    engine
        .op("ping Docker daemon", async {
            engine
                .api()
                .ping()
                .await
                .map_err(|e| anyhow!(HostError::DockerApi { source: e }))
                .context("Docker daemon is not responding. Is it running?")
        })
        .await?;
    debug!("Docker daemon responded to ping");
    Ok(())
}

/// Checks that the API can be used, not just reached (for example that the
/// user has permission on the socket). Returns the number of local images.
#[instrument(skip(engine))]
pub async fn check_api_access(engine: &Engine) -> Result<usize> {
    engine
        .op("list images", async {
            let images = engine
                .api()
                .list_images(Some(ListImagesOptions::<String> {
                    all: false,
                    ..Default::default()
                }))
                .await
                .map_err(|e| anyhow!(HostError::DockerApi { source: e }))
                .context("Cannot access the Docker API. Is your user in the 'docker' group?")?;
            Ok(images.len())
        })
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> DockerConfig {
        DockerConfig {
            op_timeout_secs: 10,
            pull_timeout_secs: 60,
        }
    }

    #[tokio::test]
    #[ignore] // Requires a running Docker daemon.
    async fn test_connect_and_ping() {
        let engine = connect(&cfg()).await.unwrap();
        ping(&engine).await.unwrap();
        check_api_access(&engine).await.unwrap();
    }
}
