//! # Tool Detection
//!
//! File: cli/src/common/system/tools.rs
//! Repository: https://github.com/hostathome/cli
//!
//! ## Overview
//!
//! Finds programs the CLI shells out to. `doctor` uses [`find_executable`] to
//! check for the `docker` binary, and `config`/`mods` use [`find_editor`].
//!
//! Editor selection order: `$EDITOR`, `$VISUAL`, then the first of `nano`,
//! `vim`, `vi` found on `PATH`.
//!
use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::debug;

const FALLBACK_EDITORS: [&str; 3] = ["nano", "vim", "vi"];

fn is_executable(path: &Path) -> bool {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        path.metadata()
            .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
            .unwrap_or(false)
    }
    #[cfg(not(unix))]
    {
        path.is_file()
    }
}

/// Searches `path_var` (a `PATH`-style list) for `name`.
pub fn find_in_path(name: &str, path_var: Option<OsString>) -> Option<PathBuf> {
    let path_var = path_var?;
    env::split_paths(&path_var)
        .map(|dir| dir.join(name))
        .find(|candidate| is_executable(candidate))
}

/// Full path of `name` if it is an executable on `PATH`.
pub fn find_executable(name: &str) -> Option<PathBuf> {
    let found = find_in_path(name, env::var_os("PATH"));
    debug!("Executable '{}': {:?}", name, found);
    found
}

/// Picks the editor from explicit `editor`/`visual` values or the fallbacks on `PATH`.
pub fn pick_editor(
    editor: Option<String>,
    visual: Option<String>,
    lookup: impl Fn(&str) -> Option<PathBuf>,
) -> Option<String> {
    editor
        .into_iter()
        .chain(visual)
        .map(|e| e.trim().to_string())
        .find(|e| !e.is_empty())
        .or_else(|| {
            FALLBACK_EDITORS
                .iter()
                .find(|name| lookup(name).is_some())
                .map(|name| name.to_string())
        })
}

/// The editor to use for `config` and `mods`, if any is available.
pub fn find_editor() -> Option<String> {
    pick_editor(env::var("EDITOR").ok(), env::var("VISUAL").ok(), find_executable)
}
