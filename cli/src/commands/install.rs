//! # HostAtHome Install Command
//!
//! File: cli/src/commands/install.rs
//! Repository: https://github.com/hostathome/cli
//!
//! ## Overview
//!
//! `hostathome install <game>` prepares a game server without starting it:
//!
//! 1. Resolve the game in the registry.
//! 2. Pull its image (spinner while pulling).
//! 3. Create `<root>/<game>-server/{data,configs}`.
//! 4. Copy the image's default `config.yaml` (and `mods.yaml` if it has one)
//!    into `configs/`, keeping files that already exist.
//! 5. Print the next steps.
//!
//! Installing twice is harmless: the pull is a no-op for an up-to-date image
//! and existing config files are left alone.
//!
//! ## Usage
//!
//! ```bash
//! hostathome install minecraft
//! ```
//!
use super::context;
use crate::common::{docker, fs, ui};
use crate::core::config::Config;
use crate::core::error::Result;
use clap::Parser;
use tracing::info;

#[derive(Parser, Debug)]
#[command(about = "Install a game server (pull image, create directories, copy default config)")]
pub struct InstallArgs {
    /// Game name as listed by `hostathome list`.
    pub game: String,
}

pub async fn handle_install(args: InstallArgs, config: &Config) -> Result<()> {
    let game = context::resolve_game(config, &args.game).await?;
    let engine = context::docker_engine(config).await?;
    let server_dir = config.servers.server_dir(&args.game);
    info!("Installing '{}' into {}", args.game, server_dir.display());
    ui::heading(format!("Installing {}", game.title()));

    let spinner = ui::progress::spinner(format!("Pulling {}", game.image));
    let pulled = docker::images::pull_image(&engine, &game.image, |status| {
        spinner.set_message(ui::progress::pull_message(&game.image, status));
    })
    .await;
    spinner.finish_and_clear();
    pulled?;
    ui::success(format!("Pulled {}", game.image));

    fs::io::create_server_dirs(&server_dir)?;
    ui::success(format!("Created {}", server_dir.display()));

    docker::interaction::copy_default_config(&engine, &game, &server_dir).await?;
    ui::success("Default configuration in place");

    println!();
    ui::info("Next steps:");
    ui::hint(format!("hostathome config {}   # edit the server config", args.game));
    ui::hint(format!("hostathome run {}      # start the server", args.game));
    Ok(())
}
