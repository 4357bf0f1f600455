//! # Container Interaction
//!
//! File: cli/src/common/docker/interaction.rs
//! Repository: https://github.com/hostathome/cli
//!
//! ## Overview
//!
//! Getting data out of containers and images:
//!
//! - **`stream_logs`**: copies a server's log output to stdout, optionally
//!   following it until the container stops or the user hits Ctrl+C.
//! - **`copy_default_config`**: seeds `<server_dir>/configs/` with the defaults
//!   the image ships under `/defaults/`. `config.yaml` is required,
//!   `mods.yaml` is optional. Existing files are never overwritten.
//!
//! Files are copied out of an image through a throwaway container: it is
//! created (not started), the file is downloaded as a tar archive, and the
//! container is removed again whatever the outcome.
//!
use super::state::find_server;
use super::{container_name, Engine};
use crate::common::fs::io::ensure_dir_exists;
use crate::core::error::{HostError, Result};
use crate::core::registry::GameDefinition;
use anyhow::{anyhow, Context};
use bollard::container::{
    Config, DownloadFromContainerOptions, LogsOptions, RemoveContainerOptions,
};
use futures_util::StreamExt;
use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;
use tracing::{debug, error, info, instrument, warn};

/// Default files an image may ship, as (path in image, file name under `configs/`, required).
const DEFAULT_FILES: [(&str, &str, bool); 2] = [
    ("/defaults/config.yaml", "config.yaml", true),
    ("/defaults/mods.yaml", "mods.yaml", false),
];

/// Streams the logs of `game`'s container to stdout.
///
/// `tail` is the number of trailing lines to show first (`"all"` for everything).
#[instrument(skip(engine))]
pub async fn stream_logs(engine: &Engine, game: &str, follow: bool, tail: &str) -> Result<()> {
    let container = container_name(game);
    if find_server(engine, game, false).await?.is_none() {
        return Err(anyhow!(HostError::ContainerNotFound { name: container }));
    }

    let options = LogsOptions::<String> {
        stdout: true,
        stderr: true,
        follow,
        tail: tail.to_string(),
        ..Default::default()
    };
    let mut log_stream = engine.api().logs(&container, Some(options));
    let mut stdout = io::stdout();

    while let Some(chunk) = log_stream.next().await {
        match chunk {
            Ok(output) => {
                stdout
                    .write_all(&output.into_bytes())
                    .context("Failed to write log chunk to stdout")?;
                stdout.flush().context("Failed to flush stdout")?;
            }
            Err(e) => {
                error!("Error receiving log stream for '{}': {:?}", container, e);
                return Err(anyhow!(HostError::DockerApi { source: e })
                    .context(format!("Error reading logs for container '{}'", container)));
            }
        }
    }
    debug!("Log stream for '{}' ended.", container);
    Ok(())
}

/// Copies the image's default config files into `<server_dir>/configs/`.
///
/// # Errors
///
/// Fails if `config.yaml` is missing and cannot be extracted. Problems with
/// `mods.yaml` are only logged.
#[instrument(skip(engine, game, server_dir), fields(image = %game.image))]
pub async fn copy_default_config(engine: &Engine, game: &GameDefinition, server_dir: &Path) -> Result<()> {
    let configs = server_dir.join("configs");
    ensure_dir_exists(&configs)?;

    for (source, file_name, required) in DEFAULT_FILES {
        let dest = configs.join(file_name);
        if dest.exists() {
            debug!("{} already present, keeping it", dest.display());
            continue;
        }
        match extract_from_image(engine, &game.image, source, &dest).await {
            Ok(()) => info!("Copied default {} from {}", file_name, game.image),
            Err(e) if required => {
                return Err(e).with_context(|| {
                    format!("Failed to copy default {} from image {}", file_name, game.image)
                });
            }
            Err(e) => warn!("No default {} in {}: {:#}", file_name, game.image, e),
        }
    }
    Ok(())
}

async fn extract_from_image(engine: &Engine, image: &str, source: &str, dest: &Path) -> Result<()> {
    let config = Config {
        image: Some(image.to_string()),
        ..Default::default()
    };
    let created = engine
        .op("create temporary container", async {
            engine
                .api()
                .create_container::<String, String>(None, config)
                .await
                .map_err(|e| anyhow!(HostError::DockerApi { source: e }))
                .with_context(|| format!("Failed to create temporary container from {}", image))
        })
        .await?;
    let id = created.id;

    let result = engine
        .op("copy file from container", download_file(engine, &id, source, dest))
        .await;

    let cleanup = engine
        .api()
        .remove_container(
            &id,
            Some(RemoveContainerOptions {
                force: true,
                ..Default::default()
            }),
        )
        .await;
    if let Err(e) = cleanup {
        warn!("Failed to remove temporary container {}: {}", id, e);
    }

    result
}

async fn download_file(engine: &Engine, id: &str, source: &str, dest: &Path) -> Result<()> {
    let options = Some(DownloadFromContainerOptions {
        path: source.to_string(),
    });
    let mut stream = engine.api().download_from_container(id, options);
    let mut archive = Vec::new();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk
            .map_err(|e| anyhow!(HostError::DockerApi { source: e }))
            .with_context(|| format!("Failed to download {}", source))?;
        archive.extend_from_slice(&chunk);
    }
    extract_single_file(&archive, dest)
}

/// Writes the first regular file found in a tar archive to `dest`.
pub fn extract_single_file(archive: &[u8], dest: &Path) -> Result<()> {
    let mut tar = tar::Archive::new(archive);
    let entries = tar.entries().context("Failed to read tar archive")?;
    for entry in entries {
        let mut entry = entry.context("Failed to read tar entry")?;
        if !entry.header().entry_type().is_file() {
            continue;
        }
        let mut contents = Vec::new();
        entry
            .read_to_end(&mut contents)
            .context("Failed to read file from tar archive")?;
        fs::write(dest, contents)
            .with_context(|| format!("Failed to write {}", dest.display()))?;
        return Ok(());
    }
    Err(anyhow!(HostError::FileSystem(
        "archive contains no regular file".to_string()
    )))
}
