//! # HostAtHome Mods Command
//!
//! File: cli/src/commands/mods.rs
//! Repository: https://github.com/hostathome/cli
//!
//! `hostathome mods <game>` edits `<game>-server/configs/mods.yaml`, the same
//! way `hostathome config` edits `config.yaml`. Not every game ships a
//! `mods.yaml`.
//!
use super::config::edit_server_file;
use crate::core::config::Config;
use crate::core::error::Result;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(about = "Edit a game server's mods.yaml")]
pub struct ModsArgs {
    /// Game whose mod list to edit.
    pub game: String,
}

pub async fn handle_mods(args: ModsArgs, config: &Config) -> Result<()> {
    edit_server_file(config, &args.game, "mods.yaml").await
}
