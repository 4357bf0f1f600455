//! # HostAtHome Status Command
//!
//! File: cli/src/commands/status.rs
//! Repository: https://github.com/hostathome/cli
//!
//! `hostathome status [game]` lists the containers managed by HostAtHome
//! (running or not) as a GAME / STATUS / PORTS / CONTAINER table.
//!
use super::context;
use crate::common::{docker, ui};
use crate::core::config::Config;
use crate::core::error::Result;
use crate::core::validate::validate_game_name;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(about = "Show the state of game servers")]
pub struct StatusArgs {
    /// Only show this game.
    pub game: Option<String>,
}

pub async fn handle_status(args: StatusArgs, config: &Config) -> Result<()> {
    if let Some(game) = &args.game {
        validate_game_name(game)?;
    }
    let engine = context::docker_engine(config).await?;
    let servers = docker::state::server_status(&engine, args.game.as_deref()).await?;

    if servers.is_empty() {
        match &args.game {
            Some(game) => ui::info(format!("No server found for '{}'", game)),
            None => ui::info("No game servers found. Install one with 'hostathome install <game>'."),
        }
        return Ok(());
    }
    println!("{}", ui::tables::status_table(&servers));
    let running = servers.iter().filter(|s| s.is_running()).count();
    ui::info(format!("{} of {} servers running", running, servers.len()));
    Ok(())
}
