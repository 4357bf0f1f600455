//! # HostAtHome Run Command
//!
//! File: cli/src/commands/run.rs
//! Repository: https://github.com/hostathome/cli
//!
//! ## Overview
//!
//! `hostathome run <game>` starts the game server container, creating it on
//! first run. An existing stopped container is started again; a running one
//! is left alone.
//!
//! With `--dev` the registry is skipped. A local image `<game>-server:dev`
//! is used with player port 1024 mapped to 25565 and RCON port 1025 mapped
//! to 25575 (tcp). The image must have been built beforehand.
//!
//! ## Usage
//!
//! ```bash
//! hostathome run minecraft
//!
//! # Local image built with: docker build -t mygame-server:dev .
//! hostathome run mygame --dev
//! ```
//!
use super::context;
use crate::common::docker::lifecycle::{run_server, RunOutcome};
use crate::common::{fs, ui};
use crate::core::config::Config;
use crate::core::error::Result;
use crate::core::registry::GameDefinition;
use crate::core::validate::validate_game_name;
use clap::Parser;
use std::sync::Arc;
use tracing::info;

#[derive(Parser, Debug)]
#[command(about = "Start a game server")]
pub struct RunArgs {
    /// Game to start.
    pub game: String,

    /// Use the locally built `<game>-server:dev` image instead of the registry.
    #[arg(long, short)]
    pub dev: bool,
}

pub async fn handle_run(args: RunArgs, config: &Config) -> Result<()> {
    let game = if args.dev {
        validate_game_name(&args.game)?;
        Arc::new(GameDefinition::dev(&args.game))
    } else {
        context::resolve_game(config, &args.game).await?
    };
    let engine = context::docker_engine(config).await?;
    let server_dir = config.servers.server_dir(&args.game);
    fs::io::create_server_dirs(&server_dir)?;
    info!("Running '{}' (dev: {}) from {}", args.game, args.dev, server_dir.display());

    let spinner = ui::progress::spinner(format!("Starting {}", game.title()));
    let outcome = run_server(&engine, &args.game, &game, &server_dir, args.dev).await;
    spinner.finish_and_clear();

    match outcome? {
        RunOutcome::AlreadyRunning => ui::info(format!("{} is already running", game.title())),
        RunOutcome::Restarted => ui::success(format!("Started existing {} server", game.title())),
        RunOutcome::Created => {
            ui::success(format!("{} server started", game.title()));
            if game.ports.player != 0 {
                ui::hint(format!("Players connect on port {}", game.ports.player));
            }
        }
    }
    ui::hint(format!("hostathome logs {} -f   # follow the server log", args.game));
    Ok(())
}
