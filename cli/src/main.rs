//! # HostAtHome Main Entry Point
//!
//! File: cli/src/main.rs
//! Repository: https://github.com/hostathome/cli
//!
//! ## Overview
//!
//! Entry point of the `hostathome` CLI. It:
//! - parses command-line arguments with Clap,
//! - sets up logging from the `-v` count (`RUST_LOG` overrides it),
//! - loads the configuration once,
//! - runs the rate-limited update check (except for `update` itself),
//! - dispatches to the command handler and reports its error.
//!
//! ## Architecture
//!
//! - Each subcommand is a variant of [`Commands`] wrapping its `clap` argument struct.
//! - Handlers live in `commands::<name>` and receive the parsed args plus the [`Config`].
//! - Errors propagate up to here, are printed as `Error: <message>`, and exit with status 1.
//!
//! ## Examples
//!
//! ```bash
//! hostathome --help
//! hostathome install minecraft
//! hostathome -vv run minecraft
//! ```
//!
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod common;
mod core;

use crate::core::config::{self, Config};

#[derive(Parser, Debug)]
#[command(
    name = "hostathome",
    about = "Install, run and manage game servers in Docker",
    long_about = "HostAtHome installs game servers from a shared registry and runs them \
                  as Docker containers on this machine.",
    propagate_version = true,
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Increase log output (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Commands {
    Doctor(commands::doctor::DoctorArgs),
    Install(commands::install::InstallArgs),
    Run(commands::run::RunArgs),
    Stop(commands::stop::StopArgs),
    Restart(commands::restart::RestartArgs),
    #[command(alias = "rm")]
    Remove(commands::remove::RemoveArgs),
    Uninstall(commands::uninstall::UninstallArgs),
    Logs(commands::logs::LogsArgs),
    Config(commands::config::ConfigArgs),
    Mods(commands::mods::ModsArgs),
    #[command(alias = "ps")]
    Status(commands::status::StatusArgs),
    #[command(alias = "ls")]
    List(commands::list::ListArgs),
    Update(commands::update::UpdateArgs),
}

async fn notify_update(config: &Config) {
    if let Some(latest) = crate::core::version::background_check(&config.updates.state_dir).await {
        common::ui::warn(format!(
            "hostathome {} is available (you have {}). Run 'hostathome update'.",
            latest,
            crate::core::version::current_version()
        ));
    }
}

async fn dispatch(command: Commands, config: &Config) -> crate::core::error::Result<()> {
    match command {
        Commands::Doctor(args) => commands::doctor::handle_doctor(args, config).await,
        Commands::Install(args) => commands::install::handle_install(args, config).await,
        Commands::Run(args) => commands::run::handle_run(args, config).await,
        Commands::Stop(args) => commands::stop::handle_stop(args, config).await,
        Commands::Restart(args) => commands::restart::handle_restart(args, config).await,
        Commands::Remove(args) => commands::remove::handle_remove(args, config).await,
        Commands::Uninstall(args) => commands::uninstall::handle_uninstall(args, config).await,
        Commands::Logs(args) => commands::logs::handle_logs(args, config).await,
        Commands::Config(args) => commands::config::handle_config(args, config).await,
        Commands::Mods(args) => commands::mods::handle_mods(args, config).await,
        Commands::Status(args) => commands::status::handle_status(args, config).await,
        Commands::List(args) => commands::list::handle_list(args, config).await,
        Commands::Update(args) => commands::update::handle_update(args, config).await,
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    let result = match config::load_config() {
        Ok(config) => {
            if config.updates.check && !matches!(cli.command, Commands::Update(_)) {
                notify_update(&config).await;
            }
            dispatch(cli.command, &config).await
        }
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        tracing::debug!("Command failed: {:?}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
