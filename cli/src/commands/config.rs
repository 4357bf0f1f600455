//! # HostAtHome Config Command
//!
//! File: cli/src/commands/config.rs
//! Repository: https://github.com/hostathome/cli
//!
//! ## Overview
//!
//! `hostathome config <game>` opens `<game>-server/configs/config.yaml` in
//! the user's editor. When the editor exits and the server is running, it
//! offers to restart the server so the changes take effect.
//!
//! The editor is `$EDITOR`, then `$VISUAL`, then the first of `nano`, `vim`
//! and `vi` found on `PATH`. Editor values with arguments (`code -w`) are
//! split on whitespace.
//!
//! [`edit_server_file`] is shared with `hostathome mods`.
//!
//! ## Usage
//!
//! ```bash
//! hostathome config minecraft
//! EDITOR="code -w" hostathome config minecraft
//! ```
//!
use super::context;
use crate::common::{docker, process, system, ui};
use crate::core::config::Config;
use crate::core::error::{HostError, Result};
use crate::core::validate::validate_game_name;
use anyhow::anyhow;
use clap::Parser;
use std::path::Path;
use tracing::debug;

#[derive(Parser, Debug)]
#[command(about = "Edit a game server's config.yaml")]
pub struct ConfigArgs {
    /// Game whose configuration to edit.
    pub game: String,
}

pub async fn handle_config(args: ConfigArgs, config: &Config) -> Result<()> {
    edit_server_file(config, &args.game, "config.yaml").await
}

/// Splits an editor command line into program and arguments.
fn editor_command(editor: &str) -> Option<(&str, Vec<&str>)> {
    let mut parts = editor.split_whitespace();
    let program = parts.next()?;
    Some((program, parts.collect()))
}

fn open_in_editor(file: &Path) -> Result<()> {
    let editor = system::tools::find_editor().ok_or_else(|| {
        anyhow!(HostError::Config(
            "No editor found. Set $EDITOR or install nano or vim.".to_string()
        ))
    })?;
    let (program, mut editor_args) = editor_command(&editor).ok_or_else(|| {
        anyhow!(HostError::Config(format!("Invalid editor command '{}'", editor)))
    })?;
    let file_arg = file.to_string_lossy();
    editor_args.push(file_arg.as_ref());
    debug!("Opening {} with {}", file.display(), program);
    process::run_interactive(program, editor_args)
}

/// Opens `<game>-server/configs/<file_name>` and offers a restart afterwards.
pub async fn edit_server_file(config: &Config, game: &str, file_name: &str) -> Result<()> {
    validate_game_name(game)?;
    let file = config.servers.server_dir(game).join("configs").join(file_name);
    if !file.is_file() {
        return Err(anyhow!(HostError::FileSystem(format!(
            "{} not found. Run 'hostathome install {}' first.",
            file.display(),
            game
        ))));
    }

    open_in_editor(&file)?;
    ui::success(format!("Saved {}", file.display()));

    // Restarting only makes sense for a running server.
    let running = match context::docker_engine(config).await {
        Ok(engine) => match docker::state::find_server(&engine, game, true).await {
            Ok(found) => found.map(|_| engine),
            Err(e) => {
                debug!("Could not query server state: {:#}", e);
                None
            }
        },
        Err(e) => {
            debug!("Docker not available: {:#}", e);
            None
        }
    };
    let Some(engine) = running else {
        ui::hint(format!("Changes apply the next time you run 'hostathome run {}'", game));
        return Ok(());
    };

    if ui::prompts::confirm("Restart the server now to apply the changes?", false)? {
        let spinner = ui::progress::spinner(format!("Restarting {}", game));
        let restarted = docker::lifecycle::restart_server(&engine, game).await;
        spinner.finish_and_clear();
        restarted?;
        ui::success("Server restarted");
    } else {
        ui::hint(format!("Apply later with 'hostathome restart {}'", game));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::load_config_in;
    use tempfile::tempdir;

    #[test]
    fn test_editor_command_splits_args() {
        assert_eq!(editor_command("vim"), Some(("vim", vec![])));
        assert_eq!(editor_command(" code  -w "), Some(("code", vec!["-w"])));
        assert_eq!(editor_command("   "), None);
    }

    #[tokio::test]
    async fn test_missing_config_file_points_to_install() {
        let dir = tempdir().unwrap();
        std::fs::create_dir(dir.path().join(".git")).unwrap();
        let config = load_config_in(dir.path(), None).unwrap();

        let err = edit_server_file(&config, "minecraft", "config.yaml")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("hostathome install minecraft"));
    }
}
