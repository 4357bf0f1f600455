//! # HostAtHome Restart Command
//!
//! File: cli/src/commands/restart.rs
//! Repository: https://github.com/hostathome/cli
//!
//! `hostathome restart <game>` restarts the server container, picking up
//! edited config files. The container must exist (see `hostathome run`).
//!
use super::context;
use crate::common::{docker, ui};
use crate::core::config::Config;
use crate::core::error::Result;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(about = "Restart a game server")]
pub struct RestartArgs {
    /// Game to restart.
    pub game: String,
}

pub async fn handle_restart(args: RestartArgs, config: &Config) -> Result<()> {
    let game = context::resolve_game(config, &args.game).await?;
    let engine = context::docker_engine(config).await?;

    let spinner = ui::progress::spinner(format!("Restarting {}", game.title()));
    let restarted = docker::lifecycle::restart_server(&engine, &args.game).await;
    spinner.finish_and_clear();
    restarted?;

    ui::success(format!("{} server restarted", game.title()));
    Ok(())
}
