//! # HostAtHome UI Utilities Module (`common::ui`)
//!
//! File: cli/src/common/ui/mod.rs
//! Repository: https://github.com/hostathome/cli
//!
//! ## Overview
//!
//! Everything the CLI shows the user goes through this module. Diagnostic
//! logging goes through `tracing` (stderr, controlled by `-v`); this module is
//! for the output a user reads on every run.
//!
//! ## Architecture
//!
//! - **status lines** (this file): `success`, `info`, `warn`, `error`, each
//!   prefixed with a colored symbol when stdout is a terminal.
//! - **`progress`**: spinners for pulls and container operations (`indicatif`).
//! - **`tables`**: aligned tables for `list` and `status` (`comfy-table`).
//! - **`prompts`**: yes/no confirmations (`dialoguer`).
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::ui;
//!
//! let spinner = ui::progress::spinner("Pulling image...");
//! // ... pull ...
//! spinner.finish_and_clear();
//! ui::success("Minecraft installed");
//! ```
//!
use console::style;

pub mod progress;
pub mod prompts;
pub mod tables;

pub fn success(msg: impl AsRef<str>) {
    println!("{} {}", style("✓").green().bold(), msg.as_ref());
}

pub fn info(msg: impl AsRef<str>) {
    println!("{} {}", style("•").cyan(), msg.as_ref());
}

pub fn warn(msg: impl AsRef<str>) {
    println!("{} {}", style("!").yellow().bold(), msg.as_ref());
}

pub fn error(msg: impl AsRef<str>) {
    eprintln!("{} {}", style("✗").red().bold(), msg.as_ref());
}

/// Bold section heading, e.g. the game title before a multi-step command.
pub fn heading(msg: impl AsRef<str>) {
    println!("{}", style(msg.as_ref()).bold());
}

/// Indented follow-up line, e.g. next steps after `install`.
pub fn hint(msg: impl AsRef<str>) {
    println!("  {}", style(msg.as_ref()).dim());
}
