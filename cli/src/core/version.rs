//! # Release Version Check
//!
//! File: cli/src/core/version.rs
//! Repository: https://github.com/hostathome/cli
//!
//! ## Overview
//!
//! Looks up the latest published release on GitHub and compares it with the
//! running binary. Used by the `update` command and by the background check
//! that runs before other commands.
//!
//! The background check is rate limited by a marker file
//! (`<state_dir>/version_check`): it only queries GitHub when the marker is
//! missing or older than 24 hours, and touches the marker after a successful
//! query.
//!
//! Version strings are compared as `major.minor.patch`. Missing parts count
//! as 0 and a leading `v` is ignored. A build whose version is `dev` never
//! reports an update.
//!
use crate::core::error::Result;
use anyhow::{anyhow, Context};
use semver::Version;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, instrument};

pub const RELEASES_API_URL: &str = "https://api.github.com/repos/hostathome/cli/releases/latest";
const DOWNLOAD_BASE_URL: &str = "https://github.com/hostathome/cli/releases/latest/download";
const CHECK_INTERVAL: Duration = Duration::from_secs(24 * 60 * 60);
const API_TIMEOUT: Duration = Duration::from_secs(5);
const MARKER_FILE: &str = "version_check";

/// Version of the running binary.
pub fn current_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[derive(Debug, Deserialize)]
struct Release {
    tag_name: String,
}

/// HTTP client for the GitHub API (which rejects requests without a user agent).
pub fn github_client() -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(API_TIMEOUT)
        .user_agent(concat!("hostathome/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("Failed to build HTTP client for release checks")
}

/// Fetches the latest release tag from `url`, without the leading `v`.
#[instrument(skip(client))]
pub async fn latest_version(client: &reqwest::Client, url: &str) -> Result<String> {
    let response = client
        .get(url)
        .send()
        .await
        .with_context(|| format!("Failed to query {}", url))?;
    if !response.status().is_success() {
        return Err(anyhow!("GitHub API returned {}", response.status()));
    }
    let release: Release = response
        .json()
        .await
        .context("Failed to decode release metadata")?;
    let version = release.tag_name.trim_start_matches('v').to_string();
    debug!("Latest release: {}", version);
    Ok(version)
}

fn parse_loose(raw: &str) -> Version {
    let mut parts = raw
        .trim()
        .trim_start_matches('v')
        .split('.')
        .map(|p| {
            let digits: String = p.chars().take_while(|c| c.is_ascii_digit()).collect();
            digits.parse::<u64>().unwrap_or(0)
        });
    let major = parts.next().unwrap_or(0);
    let minor = parts.next().unwrap_or(0);
    let patch = parts.next().unwrap_or(0);
    Version::new(major, minor, patch)
}

/// True when `latest` is strictly newer than `current`.
pub fn is_newer(current: &str, latest: &str) -> bool {
    if current.trim() == "dev" {
        return false;
    }
    parse_loose(latest) > parse_loose(current)
}

pub fn marker_path(state_dir: &Path) -> PathBuf {
    state_dir.join(MARKER_FILE)
}

/// True when the marker is missing or older than the check interval.
pub fn check_due(marker: &Path) -> bool {
    match fs::metadata(marker).and_then(|m| m.modified()) {
        Ok(modified) => modified
            .elapsed()
            .map(|age| age >= CHECK_INTERVAL)
            .unwrap_or(false),
        Err(_) => true,
    }
}

/// Writes the current time into the marker, refreshing its mtime.
pub fn touch_marker(marker: &Path) -> Result<()> {
    if let Some(parent) = marker.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(marker, chrono::Utc::now().to_rfc3339())
        .with_context(|| format!("Failed to write {}", marker.display()))
}

/// Rate-limited check used before commands. Returns the newer version, if any.
/// Any failure is logged and reported as "no update".
pub async fn background_check(state_dir: &Path) -> Option<String> {
    let marker = marker_path(state_dir);
    if !check_due(&marker) {
        debug!("Skipping update check; last check was under 24h ago");
        return None;
    }
    let latest = match github_client() {
        Ok(client) => latest_version(&client, RELEASES_API_URL).await,
        Err(e) => Err(e),
    };
    match latest {
        Ok(latest) => {
            if let Err(e) = touch_marker(&marker) {
                debug!("Could not update version check marker: {:#}", e);
            }
            is_newer(current_version(), &latest).then_some(latest)
        }
        Err(e) => {
            debug!("Update check failed: {:#}", e);
            None
        }
    }
}

/// Debian package architecture for this build, if releases are published for it.
pub fn deb_arch() -> Option<&'static str> {
    match std::env::consts::ARCH {
        "x86_64" => Some("amd64"),
        "aarch64" => Some("arm64"),
        _ => None,
    }
}

/// Download URL of the latest `.deb` for `arch`.
pub fn deb_url(arch: &str) -> String {
    format!("{}/hostathome_{}.deb", DOWNLOAD_BASE_URL, arch)
}
