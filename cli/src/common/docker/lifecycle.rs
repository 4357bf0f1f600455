//! # Game Server Container Lifecycle
//!
//! File: cli/src/common/docker/lifecycle.rs
//! Repository: https://github.com/hostathome/cli
//!
//! ## Overview
//!
//! Creates, starts, stops, restarts, and removes the container backing a game
//! server.
//!
//! ## Architecture
//!
//! `run_server` is idempotent:
//! 1. An existing running container is left alone ("already running").
//! 2. An existing stopped container is started again.
//! 3. Otherwise the image is made available (pulled, or checked locally in dev
//!    mode), ports are validated, and a new container is created and started.
//!
//! New containers get:
//! - for player and RCON, `<internal>/<proto>` exposed and bound to host port
//!   `<external>` when both ports are non-zero,
//! - bind mounts `<server_dir>/data -> /data` and `<server_dir>/configs -> /configs`,
//! - restart policy `unless-stopped`,
//! - the `hostathome=true` and `hostathome.game=<game>` labels.
//!
//! Container creation, directory creation, and config copying are separate
//! steps. A failure part way through leaves earlier steps in place.
//!
use super::images::{image_exists, pull_image};
use super::state::{find_server, is_running};
use super::{container_name, is_status, Engine, LABEL_GAME, LABEL_MANAGED};
use crate::core::error::{HostError, Result};
use crate::core::registry::{GameDefinition, PortKind};
use crate::core::validate::validate_port;
use anyhow::{anyhow, Context};
use bollard::container::{
    Config, CreateContainerOptions, RemoveContainerOptions, RestartContainerOptions,
    StartContainerOptions, StopContainerOptions,
};
use bollard::models::{HostConfig, Mount, MountTypeEnum, PortBinding, RestartPolicy, RestartPolicyNameEnum};
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info, instrument, warn};

/// What `run_server` ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    AlreadyRunning,
    Restarted,
    Created,
}

/// Rejects any non-zero port outside 1..=65535.
pub fn validate_ports(game: &GameDefinition) -> Result<()> {
    for kind in PortKind::ALL {
        let external = game.ports.get(kind);
        if external != 0 {
            validate_port(external, &format!("external {}", kind.label()))?;
        }
        let internal = game.internal_ports.get(kind);
        if internal != 0 {
            validate_port(internal, &format!("internal {}", kind.label()))?;
        }
    }
    Ok(())
}

/// Builds the create-container request for `game`. `server_dir` must be absolute.
pub fn container_config(name: &str, game: &GameDefinition, server_dir: &Path) -> Result<Config<String>> {
    if !server_dir.is_absolute() {
        return Err(anyhow!(HostError::FileSystem(format!(
            "Server directory must be absolute: {}",
            server_dir.display()
        ))));
    }

    let mut exposed_ports: HashMap<String, HashMap<(), ()>> = HashMap::new();
    let mut port_bindings: HashMap<String, Option<Vec<PortBinding>>> = HashMap::new();
    for kind in PortKind::ALL {
        let internal = game.internal_ports.get(kind);
        let external = game.ports.get(kind);
        if internal == 0 || external == 0 {
            continue;
        }
        let key = format!("{}/{}", internal, game.protocols.for_port(kind));
        exposed_ports.insert(key.clone(), HashMap::new());
        port_bindings.insert(
            key,
            Some(vec![PortBinding {
                host_ip: None,
                host_port: Some(external.to_string()),
            }]),
        );
    }

    let bind = |sub: &str, target: &str| Mount {
        target: Some(target.to_string()),
        source: Some(server_dir.join(sub).to_string_lossy().into_owned()),
        typ: Some(MountTypeEnum::BIND),
        read_only: Some(false),
        ..Default::default()
    };

    let host_config = HostConfig {
        port_bindings: (!port_bindings.is_empty()).then_some(port_bindings),
        mounts: Some(vec![bind("data", "/data"), bind("configs", "/configs")]),
        restart_policy: Some(RestartPolicy {
            name: Some(RestartPolicyNameEnum::UNLESS_STOPPED),
            maximum_retry_count: None,
        }),
        ..Default::default()
    };

    let labels = HashMap::from([
        (LABEL_MANAGED.to_string(), "true".to_string()),
        (LABEL_GAME.to_string(), name.to_string()),
    ]);

    Ok(Config {
        image: Some(game.image.clone()),
        exposed_ports: (!exposed_ports.is_empty()).then_some(exposed_ports),
        labels: Some(labels),
        host_config: Some(host_config),
        ..Default::default()
    })
}

async fn start(engine: &Engine, container: &str) -> Result<()> {
    engine
        .op("start container", async {
            match engine
                .api()
                .start_container(container, None::<StartContainerOptions<String>>)
                .await
            {
                Ok(_) => Ok(()),
                // Not modified: already running.
                Err(e) if is_status(&e, 304) => Ok(()),
                Err(e) if is_status(&e, 404) => Err(anyhow!(HostError::ContainerNotFound {
                    name: container.to_string()
                })),
                Err(e) => Err(anyhow!(HostError::DockerApi { source: e })
                    .context(format!("Failed to start container '{}'", container))),
            }
        })
        .await
}

/// Starts the server for `game`, creating its container if needed.
///
/// # Errors
///
/// * `HostError::ImageNotFound` in dev mode when the image was never built.
/// * `HostError::InvalidPort` when the definition has an out-of-range port.
/// * `HostError::DockerApi` / `DockerTimeout` for daemon failures.
#[instrument(skip(engine, game, server_dir))]
pub async fn run_server(
    engine: &Engine,
    name: &str,
    game: &GameDefinition,
    server_dir: &Path,
    dev_mode: bool,
) -> Result<RunOutcome> {
    let container = container_name(name);

    if let Some(existing) = find_server(engine, name, false).await? {
        if is_running(&existing) {
            info!("Container '{}' is already running.", container);
            return Ok(RunOutcome::AlreadyRunning);
        }
        info!("Starting existing container '{}'", container);
        start(engine, &container).await?;
        return Ok(RunOutcome::Restarted);
    }

    if dev_mode {
        if !image_exists(engine, &game.image).await? {
            return Err(anyhow!(HostError::ImageNotFound {
                name: game.image.clone()
            }));
        }
    } else {
        pull_image(engine, &game.image, |_| {}).await?;
    }

    validate_ports(game)?;
    let config = container_config(name, game, server_dir)?;

    info!("Creating container '{}' from image '{}'", container, game.image);
    let options = Some(CreateContainerOptions {
        name: container.clone(),
        platform: None,
    });
    let created = engine
        .op("create container", async {
            engine
                .api()
                .create_container(options, config)
                .await
                .map_err(|e| anyhow!(HostError::DockerApi { source: e }))
                .with_context(|| format!("Failed to create container '{}'", container))
        })
        .await?;
    for warning in &created.warnings {
        warn!("Docker: {}", warning);
    }
    debug!("Created container {} ({})", container, created.id);

    start(engine, &container).await?;
    Ok(RunOutcome::Created)
}

/// Stops the running server for `game`.
#[instrument(skip(engine))]
pub async fn stop_server(engine: &Engine, name: &str) -> Result<()> {
    if find_server(engine, name, true).await?.is_none() {
        return Err(anyhow!(HostError::ServerNotRunning {
            game: name.to_string()
        }));
    }
    let container = container_name(name);
    engine
        .op("stop container", async {
            match engine
                .api()
                .stop_container(&container, None::<StopContainerOptions>)
                .await
            {
                Ok(_) => Ok(()),
                Err(e) if is_status(&e, 304) => {
                    debug!("Container '{}' was already stopped.", container);
                    Ok(())
                }
                Err(e) => Err(anyhow!(HostError::DockerApi { source: e })
                    .context(format!("Failed to stop container '{}'", container))),
            }
        })
        .await?;
    info!("Container '{}' stopped.", container);
    Ok(())
}

/// Restarts the server for `game`, whether it is running or not.
#[instrument(skip(engine))]
pub async fn restart_server(engine: &Engine, name: &str) -> Result<()> {
    let container = container_name(name);
    if find_server(engine, name, false).await?.is_none() {
        return Err(anyhow!(HostError::ContainerNotFound { name: container }));
    }
    engine
        .op("restart container", async {
            engine
                .api()
                .restart_container(&container, None::<RestartContainerOptions>)
                .await
                .map_err(|e| anyhow!(HostError::DockerApi { source: e }))
                .with_context(|| format!("Failed to restart container '{}'", container))
        })
        .await?;
    info!("Container '{}' restarted.", container);
    Ok(())
}

/// Removes the container for `game`, stopping it first. Server files are kept.
#[instrument(skip(engine))]
pub async fn remove_server(engine: &Engine, name: &str) -> Result<()> {
    let container = container_name(name);
    let Some(existing) = find_server(engine, name, false).await? else {
        return Err(anyhow!(HostError::ContainerNotFound { name: container }));
    };
    if is_running(&existing) {
        stop_server(engine, name).await?;
    }
    let options = Some(RemoveContainerOptions {
        force: true,
        v: false,
        link: false,
    });
    engine
        .op("remove container", async {
            match engine.api().remove_container(&container, options).await {
                Ok(()) => Ok(()),
                Err(e) if is_status(&e, 404) => Err(anyhow!(HostError::ContainerNotFound {
                    name: container.clone()
                })),
                Err(e) if is_status(&e, 409) => Err(anyhow!(HostError::DockerOperation(format!(
                    "Conflict removing container '{}': removal already in progress",
                    container
                )))),
                Err(e) => Err(anyhow!(HostError::DockerApi { source: e })
                    .context(format!("Failed to remove container '{}'", container))),
            }
        })
        .await?;
    info!("Container '{}' removed.", container);
    Ok(())
}
