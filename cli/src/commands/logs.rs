//! # HostAtHome Logs Command
//!
//! File: cli/src/commands/logs.rs
//! Repository: https://github.com/hostathome/cli
//!
//! `hostathome logs <game>` prints the last lines of the server log
//! (100 by default, `-n` to change, `-n all` for everything). With `-f` it
//! keeps streaming until interrupted.
//!
use super::context;
use crate::common::docker;
use crate::core::config::Config;
use crate::core::error::Result;
use crate::core::validate::validate_game_name;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(about = "Show a game server's logs")]
pub struct LogsArgs {
    /// Game whose logs to show.
    pub game: String,

    /// Follow log output.
    #[arg(long, short)]
    pub follow: bool,

    /// Number of lines to show from the end of the log.
    #[arg(long = "tail", short = 'n', default_value = "100", value_parser = parse_tail)]
    pub tail: String,
}

fn parse_tail(raw: &str) -> std::result::Result<String, String> {
    if raw == "all" || raw.parse::<u32>().is_ok() {
        Ok(raw.to_string())
    } else {
        Err(format!("expected a line count or 'all', got '{}'", raw))
    }
}

pub async fn handle_logs(args: LogsArgs, config: &Config) -> Result<()> {
    validate_game_name(&args.game)?;
    let engine = context::docker_engine(config).await?;
    docker::interaction::stream_logs(&engine, &args.game, args.follow, &args.tail).await
}
