//! # HostAtHome Doctor Command
//!
//! File: cli/src/commands/doctor.rs
//! Repository: https://github.com/hostathome/cli
//!
//! ## Overview
//!
//! `hostathome doctor` checks that the machine can run game servers and
//! prints one line per check.
//!
//! ## Checks
//!
//! 1. `docker` executable on `PATH` (hard)
//! 2. Docker daemon answers a ping (hard)
//! 3. Docker API usable, i.e. images can be listed (hard)
//! 4. Registry reachable, i.e. `list_all` succeeds (warning only)
//!
//! Any failed hard check makes the command fail with "system not ready".
//! The daemon checks are skipped when the daemon cannot be reached.
//!
//! ## Usage
//!
//! ```bash
//! hostathome doctor
//! ```
//!
use super::context;
use crate::common::{docker, system, ui};
use crate::core::config::Config;
use crate::core::error::Result;
use crate::core::registry::RegistryCache;
use anyhow::anyhow;
use clap::Parser;
use tracing::{debug, info};

#[derive(Parser, Debug)]
#[command(about = "Check that Docker and the game registry are available")]
pub struct DoctorArgs {}

pub async fn handle_doctor(_args: DoctorArgs, config: &Config) -> Result<()> {
    info!("Running system checks");
    let mut ready = true;

    match system::tools::find_executable("docker") {
        Some(path) => ui::success(format!("Docker installed ({})", path.display())),
        None => {
            ui::error("Docker is not installed or not on PATH");
            ui::hint("Install it from https://docs.docker.com/engine/install/");
            ready = false;
        }
    }

    match context::docker_engine(config).await {
        Ok(engine) => {
            ui::success("Docker daemon is running");
            match docker::connect::check_api_access(&engine).await {
                Ok(count) => {
                    debug!("{} local images", count);
                    ui::success("Docker API access OK");
                }
                Err(e) => {
                    ui::error(format!("Docker API access failed: {:#}", e));
                    ui::hint("Add your user to the 'docker' group and log in again");
                    ready = false;
                }
            }
        }
        Err(e) => {
            ui::error(format!("Docker daemon is not reachable: {:#}", e));
            ready = false;
        }
    }

    let registry_check = match RegistryCache::from_config(&config.registry) {
        Ok(mut registry) => registry
            .list_all()
            .await
            .map(|games| (games.len(), registry.cache_dir().to_path_buf()))
            .map_err(|e| anyhow!(e)),
        Err(e) => Err(e),
    };
    match registry_check {
        Ok((count, cache_dir)) => ui::success(format!(
            "Registry reachable ({} games, cached in {})",
            count,
            cache_dir.display()
        )),
        Err(e) => ui::warn(format!(
            "Registry not reachable at {}: {:#}",
            config.registry.base_url, e
        )),
    }

    if ready {
        ui::success("System ready");
        Ok(())
    } else {
        Err(anyhow!("system not ready"))
    }
}
