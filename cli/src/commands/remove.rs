//! # HostAtHome Remove Command
//!
//! File: cli/src/commands/remove.rs
//! Repository: https://github.com/hostathome/cli
//!
//! `hostathome remove <game>` deletes the server container, stopping it
//! first if needed. World data and configs in `<game>-server/` are kept;
//! use `hostathome uninstall` to delete those as well.
//!
use super::context;
use crate::common::{docker, ui};
use crate::core::config::Config;
use crate::core::error::Result;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(about = "Remove a game server container (keeps data and configs)")]
pub struct RemoveArgs {
    /// Game whose container should be removed.
    pub game: String,
}

pub async fn handle_remove(args: RemoveArgs, config: &Config) -> Result<()> {
    let game = context::resolve_game(config, &args.game).await?;
    let engine = context::docker_engine(config).await?;

    docker::lifecycle::remove_server(&engine, &args.game).await?;

    ui::success(format!("{} container removed", game.title()));
    ui::hint(format!(
        "Data kept in {}",
        config.servers.server_dir(&args.game).display()
    ));
    Ok(())
}
