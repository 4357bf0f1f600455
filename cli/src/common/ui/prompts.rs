//! # Prompts
//!
//! File: cli/src/common/ui/prompts.rs
//! Repository: https://github.com/hostathome/cli
//!
//! Yes/no confirmations for destructive or slow operations (`uninstall`,
//! `update`, restarting after an edit). Without a terminal on stdin there is
//! nobody to ask, so the default answer is returned.
//!
use crate::core::error::Result;
use anyhow::Context;
use dialoguer::Confirm;
use std::io::IsTerminal;
use tracing::debug;

/// Asks `question`, returning `default` when stdin is not interactive.
pub fn confirm(question: &str, default: bool) -> Result<bool> {
    if !std::io::stdin().is_terminal() || !std::io::stderr().is_terminal() {
        debug!("Not a terminal; answering '{}' with {}", question, default);
        return Ok(default);
    }
    Confirm::new()
        .with_prompt(question)
        .default(default)
        .interact()
        .context("Failed to read confirmation")
}
