//! # HostAtHome List Command
//!
//! File: cli/src/commands/list.rs
//! Repository: https://github.com/hostathome/cli
//!
//! `hostathome list` shows every game in the registry index. Games whose
//! definition cannot be fetched are left out (the reason is logged at debug
//! level, see `-vv`).
//!
use crate::common::ui;
use crate::core::config::Config;
use crate::core::error::{HostError, Result};
use crate::core::registry::RegistryCache;
use anyhow::anyhow;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(about = "List the games available in the registry")]
pub struct ListArgs {}

pub async fn handle_list(_args: ListArgs, config: &Config) -> Result<()> {
    let mut registry = RegistryCache::from_config(&config.registry)?;

    let spinner = ui::progress::spinner("Loading games from the registry");
    let games = registry.list_all().await;
    spinner.finish_and_clear();
    let games = games.map_err(|e| anyhow!(HostError::from(e)))?;

    if games.is_empty() {
        ui::info("No games available in the registry.");
        return Ok(());
    }
    println!("{}", ui::tables::games_table(games.iter().map(|g| g.as_ref())));
    Ok(())
}
