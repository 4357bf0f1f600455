//! # HostAtHome Stop Command
//!
//! File: cli/src/commands/stop.rs
//! Repository: https://github.com/hostathome/cli
//!
//! `hostathome stop <game>` stops the running server. The container and its
//! files are kept, so `hostathome run <game>` starts it again. Fails when the
//! server is not running.
//!
use super::context;
use crate::common::{docker, ui};
use crate::core::config::Config;
use crate::core::error::Result;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(about = "Stop a running game server")]
pub struct StopArgs {
    /// Game to stop.
    pub game: String,
}

pub async fn handle_stop(args: StopArgs, config: &Config) -> Result<()> {
    let game = context::resolve_game(config, &args.game).await?;
    let engine = context::docker_engine(config).await?;

    let spinner = ui::progress::spinner(format!("Stopping {}", game.title()));
    let stopped = docker::lifecycle::stop_server(&engine, &args.game).await;
    spinner.finish_and_clear();
    stopped?;

    ui::success(format!("{} server stopped", game.title()));
    Ok(())
}
