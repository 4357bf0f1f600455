//! # Docker Image Operations
//!
//! File: cli/src/common/docker/images.rs
//! Repository: https://github.com/hostathome/cli
//!
//! ## Overview
//!
//! Image handling for game servers: pulling the image a game definition names,
//! checking for locally built images (`run --dev`), and removing images on
//! `uninstall`.
//!
//! Image references are split into repository and tag before pulling. A
//! reference without a tag pulls `latest`, and a registry host with a port
//! (`localhost:5000/game`) is not mistaken for a tag.
//!
use super::{is_status, Engine};
use crate::core::error::{HostError, Result};
use anyhow::{anyhow, Context};
use bollard::image::{CreateImageOptions, RemoveImageOptions};
use futures_util::StreamExt;
use tracing::{debug, error, info, instrument, warn};

/// Splits `repo[:tag]` into `(repo, tag)`, defaulting the tag to `latest`.
/// Digest references (`repo@sha256:...`) are returned whole with an empty tag.
pub fn split_image_ref(image: &str) -> (&str, &str) {
    if image.contains('@') {
        return (image, "");
    }
    match image.rsplit_once(':') {
        Some((repo, tag)) if !tag.contains('/') => (repo, tag),
        _ => (image, "latest"),
    }
}

/// Pulls `image`, calling `on_status` with each progress message from the daemon.
///
/// # Errors
///
/// * `HostError::DockerApi` if the daemon reports an error (unknown image, auth, network).
/// * `HostError::DockerTimeout` if the pull exceeds the pull timeout.
#[instrument(skip(engine, on_status))]
pub async fn pull_image<F>(engine: &Engine, image: &str, mut on_status: F) -> Result<()>
where
    F: FnMut(&str),
{
    let (repo, tag) = split_image_ref(image);
    info!("Pulling image {} (tag: {})", repo, tag);
    let options = CreateImageOptions {
        from_image: repo.to_string(),
        tag: tag.to_string(),
        ..Default::default()
    };

    engine
        .pull_op(&format!("pull {}", image), async {
            let mut stream = engine.api().create_image(Some(options), None, None);
            while let Some(item) = stream.next().await {
                match item {
                    Ok(progress) => {
                        if let Some(status) = progress.status.as_deref() {
                            debug!("pull {}: {}", image, status);
                            on_status(status);
                        }
                    }
                    Err(e) => {
                        error!("Failed to pull image '{}': {:?}", image, e);
                        return Err(anyhow!(HostError::DockerApi { source: e })
                            .context(format!("Failed to pull image '{}'", image)));
                    }
                }
            }
            Ok(())
        })
        .await
}

/// Checks whether `image` exists locally.
#[instrument(skip(engine))]
pub async fn image_exists(engine: &Engine, image: &str) -> Result<bool> {
    engine
        .op("inspect image", async {
            match engine.api().inspect_image(image).await {
                Ok(_) => Ok(true),
                Err(e) if is_status(&e, 404) => {
                    debug!("Image '{}' not found locally.", image);
                    Ok(false)
                }
                Err(e) => Err(anyhow!(HostError::DockerApi { source: e })
                    .context(format!("Failed to check existence for image '{}'", image))),
            }
        })
        .await
}

/// Force-removes `image`.
#[instrument(skip(engine))]
pub async fn remove_image(engine: &Engine, image: &str) -> Result<()> {
    let options = Some(RemoveImageOptions {
        force: true,
        noprune: false,
    });
    engine
        .op("remove image", async {
            match engine.api().remove_image(image, options, None).await {
                Ok(results) => {
                    for result in results {
                        if let Some(deleted) = result.deleted {
                            debug!("Deleted: {}", deleted);
                        }
                        if let Some(untagged) = result.untagged {
                            debug!("Untagged: {}", untagged);
                        }
                    }
                    info!("Image '{}' removed.", image);
                    Ok(())
                }
                Err(e) if is_status(&e, 404) => {
                    warn!("Image '{}' not found, cannot remove.", image);
                    Err(anyhow!(HostError::DockerOperation(format!(
                        "Image '{}' not found.",
                        image
                    ))))
                }
                Err(e) if is_status(&e, 409) => Err(anyhow!(HostError::DockerApi { source: e })
                    .context(format!("Image '{}' is in use by a container.", image))),
                Err(e) => Err(anyhow!(HostError::DockerApi { source: e })
                    .context(format!("Failed to remove image '{}'", image))),
            }
        })
        .await
        .context("Image removal failed")
}
