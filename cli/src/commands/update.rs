//! # HostAtHome Update Command
//!
//! File: cli/src/commands/update.rs
//! Repository: https://github.com/hostathome/cli
//!
//! ## Overview
//!
//! `hostathome update` installs the latest release from GitHub:
//!
//! 1. Query the latest release and compare it with the running version.
//! 2. Ask for confirmation (skipped with `--yes`).
//! 3. Download `hostathome_<arch>.deb` into a temporary directory.
//! 4. Install it with `sudo dpkg -i`.
//!
//! Only Debian packages for amd64 and arm64 are published. Other platforms
//! get an error pointing at the releases page.
//!
//! ## Usage
//!
//! ```bash
//! hostathome update
//! hostathome update --yes
//! ```
//!
use crate::common::{network, process, ui};
use crate::core::config::Config;
use crate::core::error::Result;
use crate::core::version;
use anyhow::{anyhow, Context};
use clap::Parser;
use std::ffi::OsStr;
use tracing::info;

#[derive(Parser, Debug)]
#[command(about = "Update hostathome to the latest release")]
pub struct UpdateArgs {
    /// Install without asking for confirmation.
    #[arg(long, short)]
    pub yes: bool,
}

pub async fn handle_update(args: UpdateArgs, config: &Config) -> Result<()> {
    let current = version::current_version();
    let client = version::github_client()?;

    let spinner = ui::progress::spinner("Checking for updates");
    let latest = version::latest_version(&client, version::RELEASES_API_URL).await;
    spinner.finish_and_clear();
    let latest = latest.context("Could not determine the latest release")?;

    if let Err(e) = version::touch_marker(&version::marker_path(&config.updates.state_dir)) {
        info!("Could not update version check marker: {:#}", e);
    }

    if !version::is_newer(current, &latest) {
        ui::success(format!("hostathome {} is up to date", current));
        return Ok(());
    }
    ui::info(format!("New version available: {} -> {}", current, latest));

    let arch = version::deb_arch().ok_or_else(|| {
        anyhow!(
            "No package published for {}. Download manually from https://github.com/hostathome/cli/releases",
            std::env::consts::ARCH
        )
    })?;

    if !args.yes && !ui::prompts::confirm(&format!("Install hostathome {}?", latest), false)? {
        ui::info("Update cancelled");
        return Ok(());
    }

    let download_dir = tempfile::tempdir().context("Failed to create download directory")?;
    let package = download_dir.path().join(format!("hostathome_{}.deb", arch));
    let url = version::deb_url(arch);

    // The API client's short timeout is meant for metadata, not packages.
    let download_client = reqwest::Client::builder()
        .user_agent(concat!("hostathome/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("Failed to build HTTP client for the download")?;
    let spinner = ui::progress::spinner(format!("Downloading {}", url));
    let downloaded = network::download::download_to_file(&download_client, &url, &package).await;
    spinner.finish_and_clear();
    let bytes = downloaded?;
    info!("Downloaded {} bytes", bytes);

    ui::info("Installing package (sudo may ask for your password)");
    process::run_interactive("sudo", [OsStr::new("dpkg"), OsStr::new("-i"), package.as_os_str()])
        .context("Package installation failed")?;

    ui::success(format!("Updated to hostathome {}", latest));
    Ok(())
}
