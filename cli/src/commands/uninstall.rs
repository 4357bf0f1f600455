//! # HostAtHome Uninstall Command
//!
//! File: cli/src/commands/uninstall.rs
//! Repository: https://github.com/hostathome/cli
//!
//! ## Overview
//!
//! `hostathome uninstall <game>` removes everything `install` and `run`
//! created:
//!
//! 1. The container (stopped first if running).
//! 2. The image.
//! 3. The `<game>-server/` directory, including world data.
//!
//! Steps 1 and 2 are best effort: a missing container or an image still used
//! elsewhere only produces a warning. The directory removal must succeed.
//!
//! Asks for confirmation unless `--yes` is given. Without a terminal and
//! without `--yes`, nothing is removed.
//!
//! ## Usage
//!
//! ```bash
//! hostathome uninstall minecraft
//! hostathome uninstall minecraft --yes
//! ```
//!
use super::context;
use crate::common::{docker, fs, ui};
use crate::core::config::Config;
use crate::core::error::Result;
use clap::Parser;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(about = "Remove a game server with its image and all its data")]
pub struct UninstallArgs {
    /// Game to uninstall.
    pub game: String,

    /// Skip the confirmation prompt.
    #[arg(long, short)]
    pub yes: bool,
}

pub async fn handle_uninstall(args: UninstallArgs, config: &Config) -> Result<()> {
    let game = context::resolve_game(config, &args.game).await?;
    let server_dir = config.servers.server_dir(&args.game);

    if !args.yes {
        ui::warn(format!(
            "This deletes the {} container, image {} and {}",
            game.title(),
            game.image,
            server_dir.display()
        ));
        if !ui::prompts::confirm("Uninstall and delete all server data?", false)? {
            ui::info("Uninstall cancelled");
            return Ok(());
        }
    }

    let engine = context::docker_engine(config).await?;

    match docker::lifecycle::remove_server(&engine, &args.game).await {
        Ok(()) => ui::success("Container removed"),
        Err(e) => warn!("Container not removed: {:#}", e),
    }
    match docker::images::remove_image(&engine, &game.image).await {
        Ok(()) => ui::success(format!("Image {} removed", game.image)),
        Err(e) => warn!("Image not removed: {:#}", e),
    }

    if fs::io::remove_server_dir(&server_dir)? {
        ui::success(format!("Deleted {}", server_dir.display()));
    } else {
        info!("{} did not exist", server_dir.display());
    }

    ui::success(format!("{} uninstalled", game.title()));
    Ok(())
}
