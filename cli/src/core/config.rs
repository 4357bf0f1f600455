//! # HostAtHome Configuration System
//!
//! File: cli/src/core/config.rs
//! Repository: https://github.com/hostathome/cli
//!
//! ## Overview
//!
//! This module loads, merges, and validates the CLI's configuration. Every
//! setting has a built-in default, so no configuration file is required.
//!
//! ## Architecture
//!
//! Configuration sources (in order of precedence):
//! 1. Project-specific `.hostathome.toml` in the current directory or an
//!    ancestor (the search stops at a directory containing `.git`)
//! 2. User-specific `<config_dir>/hostathome/config.toml`
//!    (`~/.config/hostathome/config.toml` on Linux)
//! 3. Default values defined in the code
//!
//! Files are parsed into `ConfigFile`, where every key is optional. Files are
//! merged key by key, then resolved against the defaults into `Config`, which
//! has concrete values only. Paths are tilde-expanded and made absolute during
//! resolution, and the result is validated before use.
//!
//! ```toml
//! [registry]
//! base_url = "https://raw.githubusercontent.com/hostathome/registry/main"
//! cache_dir = "~/.hostathome/cache/registry"
//! cache_ttl_secs = 3600
//! http_timeout_secs = 30
//!
//! [servers]
//! root = "~/games"
//!
//! [docker]
//! op_timeout_secs = 30
//! pull_timeout_secs = 300
//!
//! [updates]
//! check = false
//! ```
//!
//! ## Examples
//!
//! ```rust
//! let cfg = config::load_config()?;
//! let registry = RegistryCache::from_config(&cfg.registry)?;
//! let server_dir = cfg.servers.server_dir("minecraft");
//! ```
//!
//! The configuration is loaded once per command execution and passed
//! to the modules that need it.
//!
use crate::core::error::{HostError, Result};
use anyhow::{anyhow, Context};
use directories::ProjectDirs;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info, warn};

const PROJECT_CONFIG_FILENAME: &str = ".hostathome.toml";

pub const DEFAULT_REGISTRY_URL: &str = "https://raw.githubusercontent.com/hostathome/registry/main";
const DEFAULT_CACHE_DIR: &str = "~/.hostathome/cache/registry";
const DEFAULT_STATE_DIR: &str = "~/.hostathome/cache";
const DEFAULT_CACHE_TTL_SECS: u64 = 3600;
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;
const DEFAULT_SERVERS_ROOT: &str = ".";
const DEFAULT_OP_TIMEOUT_SECS: u64 = 30;
const DEFAULT_PULL_TIMEOUT_SECS: u64 = 300;

// --- Resolved configuration ---

/// Fully resolved configuration, passed to commands.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub registry: RegistryConfig,
    pub servers: ServersConfig,
    pub docker: DockerConfig,
    pub updates: UpdatesConfig,
}

/// Where game definitions come from and how long they are cached.
#[derive(Debug, Clone, PartialEq)]
pub struct RegistryConfig {
    pub base_url: String,
    pub cache_dir: PathBuf,
    pub cache_ttl_secs: u64,
    pub http_timeout_secs: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServersConfig {
    /// Absolute directory holding the `<game>-server` directories.
    pub root: PathBuf,
}

impl ServersConfig {
    /// `<root>/<game>-server`
    pub fn server_dir(&self, game: &str) -> PathBuf {
        self.root.join(format!("{}-server", game))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DockerConfig {
    pub op_timeout_secs: u64,
    pub pull_timeout_secs: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdatesConfig {
    pub check: bool,
    /// Directory holding the `version_check` marker file.
    pub state_dir: PathBuf,
}

// --- On-disk representation ---

/// One configuration file. Every key is optional.
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(default)]
    registry: RegistryFile,
    #[serde(default)]
    servers: ServersFile,
    #[serde(default)]
    docker: DockerFile,
    #[serde(default)]
    updates: UpdatesFile,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
struct RegistryFile {
    base_url: Option<String>,
    cache_dir: Option<String>,
    cache_ttl_secs: Option<u64>,
    http_timeout_secs: Option<u64>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
struct ServersFile {
    root: Option<String>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
struct DockerFile {
    op_timeout_secs: Option<u64>,
    pull_timeout_secs: Option<u64>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
struct UpdatesFile {
    check: Option<bool>,
}

// --- Loading ---

/// Loads the merged configuration for the current directory.
pub fn load_config() -> Result<Config> {
    let current_dir = std::env::current_dir().context("Failed to get current directory")?;
    load_config_in(&current_dir, user_config_path().as_deref())
}

/// Loads configuration as if run from `dir`, with an explicit user config path.
pub fn load_config_in(dir: &Path, user_path: Option<&Path>) -> Result<Config> {
    let user_config = match user_path {
        Some(path) if path.is_file() => {
            info!("Loading user configuration from: {}", path.display());
            Some(load_config_from_path(path)?)
        }
        Some(path) => {
            debug!("User configuration file not found at {}", path.display());
            None
        }
        None => None,
    };
    let project_config = match find_project_config_path(dir) {
        Some(path) => {
            info!("Loading project configuration from: {}", path.display());
            Some(load_config_from_path(&path)?)
        }
        None => {
            debug!("No project configuration file ({}) found.", PROJECT_CONFIG_FILENAME);
            None
        }
    };

    let merged = merge_configs(user_config.unwrap_or_default(), project_config);
    let config = resolve_config(merged, dir);
    validate_config(&config).context("Configuration validation failed")?;
    debug!("Final loaded configuration: {:?}", config);
    Ok(config)
}

fn user_config_path() -> Option<PathBuf> {
    match ProjectDirs::from("com", "HostAtHome", "hostathome") {
        Some(dirs) => Some(dirs.config_dir().join("config.toml")),
        None => {
            warn!("Could not determine user config directory.");
            None
        }
    }
}

fn find_project_config_path(start: &Path) -> Option<PathBuf> {
    let mut path = start;
    loop {
        let candidate = path.join(PROJECT_CONFIG_FILENAME);
        if candidate.is_file() {
            return Some(candidate);
        }
        if path.join(".git").is_dir() {
            debug!(
                "Found .git directory at {}, stopping project config search.",
                path.display()
            );
            return None;
        }
        path = path.parent()?;
    }
}

fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))
}

/// Project values win over user values, key by key.
fn merge_configs(user: ConfigFile, project: Option<ConfigFile>) -> ConfigFile {
    let Some(project) = project else {
        return user;
    };
    ConfigFile {
        registry: RegistryFile {
            base_url: project.registry.base_url.or(user.registry.base_url),
            cache_dir: project.registry.cache_dir.or(user.registry.cache_dir),
            cache_ttl_secs: project.registry.cache_ttl_secs.or(user.registry.cache_ttl_secs),
            http_timeout_secs: project
                .registry
                .http_timeout_secs
                .or(user.registry.http_timeout_secs),
        },
        servers: ServersFile {
            root: project.servers.root.or(user.servers.root),
        },
        docker: DockerFile {
            op_timeout_secs: project.docker.op_timeout_secs.or(user.docker.op_timeout_secs),
            pull_timeout_secs: project
                .docker
                .pull_timeout_secs
                .or(user.docker.pull_timeout_secs),
        },
        updates: UpdatesFile {
            check: project.updates.check.or(user.updates.check),
        },
    }
}

/// Expands `~` and anchors relative paths at `base`.
fn expand_path(raw: &str, base: &Path) -> PathBuf {
    let expanded = PathBuf::from(shellexpand::tilde(raw).into_owned());
    if expanded.is_absolute() {
        expanded
    } else {
        base.join(expanded)
    }
}

fn resolve_config(file: ConfigFile, base: &Path) -> Config {
    let cache_dir = file
        .registry
        .cache_dir
        .unwrap_or_else(|| DEFAULT_CACHE_DIR.to_string());
    let root = file
        .servers
        .root
        .unwrap_or_else(|| DEFAULT_SERVERS_ROOT.to_string());

    Config {
        registry: RegistryConfig {
            base_url: file
                .registry
                .base_url
                .unwrap_or_else(|| DEFAULT_REGISTRY_URL.to_string()),
            cache_dir: expand_path(&cache_dir, base),
            cache_ttl_secs: file.registry.cache_ttl_secs.unwrap_or(DEFAULT_CACHE_TTL_SECS),
            http_timeout_secs: file
                .registry
                .http_timeout_secs
                .unwrap_or(DEFAULT_HTTP_TIMEOUT_SECS),
        },
        servers: ServersConfig {
            root: normalize(&expand_path(&root, base)),
        },
        docker: DockerConfig {
            op_timeout_secs: file.docker.op_timeout_secs.unwrap_or(DEFAULT_OP_TIMEOUT_SECS),
            pull_timeout_secs: file
                .docker
                .pull_timeout_secs
                .unwrap_or(DEFAULT_PULL_TIMEOUT_SECS),
        },
        updates: UpdatesConfig {
            check: file.updates.check.unwrap_or(true),
            state_dir: expand_path(DEFAULT_STATE_DIR, base),
        },
    }
}

/// Drops `.` components so `<root>/./minecraft-server` reads as `<root>/minecraft-server`.
fn normalize(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, std::path::Component::CurDir))
        .collect()
}

fn validate_config(config: &Config) -> Result<()> {
    debug!("Validating final configuration...");
    let url = &config.registry.base_url;
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(anyhow!(HostError::Config(format!(
            "registry.base_url must start with http:// or https:// (got '{}')",
            url
        ))));
    }
    let durations = [
        ("registry.cache_ttl_secs", config.registry.cache_ttl_secs),
        ("registry.http_timeout_secs", config.registry.http_timeout_secs),
        ("docker.op_timeout_secs", config.docker.op_timeout_secs),
        ("docker.pull_timeout_secs", config.docker.pull_timeout_secs),
    ];
    for (key, value) in durations {
        if value == 0 {
            return Err(anyhow!(HostError::Config(format!(
                "{} must be greater than 0",
                key
            ))));
        }
    }
    if config.servers.root.is_file() {
        return Err(anyhow!(HostError::Config(format!(
            "servers.root '{}' exists but is not a directory.",
            config.servers.root.display()
        ))));
    }
    debug!("Configuration validation successful.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_deserialize_full_toml() {
        let toml_content = r#"
            [registry]
            base_url = "http://localhost:8080/registry"
            cache_dir = "~/cache"
            cache_ttl_secs = 60

            [servers]
            root = "/srv/games"

            [docker]
            pull_timeout_secs = 600

            [updates]
            check = false
        "#;

        let file: ConfigFile = toml::from_str(toml_content).expect("Failed to parse TOML");

        assert_eq!(
            file.registry.base_url.as_deref(),
            Some("http://localhost:8080/registry")
        );
        assert_eq!(file.registry.cache_ttl_secs, Some(60));
        assert_eq!(file.registry.http_timeout_secs, None);
        assert_eq!(file.servers.root.as_deref(), Some("/srv/games"));
        assert_eq!(file.docker.pull_timeout_secs, Some(600));
        assert_eq!(file.updates.check, Some(false));
    }

    #[test]
    fn test_unknown_fields_rejected() {
        assert!(toml::from_str::<ConfigFile>("[registry]\nurl = \"x\"").is_err());
        assert!(toml::from_str::<ConfigFile>("[telemetry]\nenabled = true").is_err());
    }

    #[test]
    fn test_defaults() {
        let base = Path::new("/work");
        let config = resolve_config(ConfigFile::default(), base);
        let home = dirs::home_dir().unwrap();

        assert_eq!(config.registry.base_url, DEFAULT_REGISTRY_URL);
        assert_eq!(config.registry.cache_dir, home.join(".hostathome/cache/registry"));
        assert_eq!(config.registry.cache_ttl_secs, 3600);
        assert_eq!(config.registry.http_timeout_secs, 30);
        assert_eq!(config.servers.root, PathBuf::from("/work"));
        assert_eq!(config.servers.server_dir("mc"), PathBuf::from("/work/mc-server"));
        assert_eq!(config.docker.op_timeout_secs, 30);
        assert_eq!(config.docker.pull_timeout_secs, 300);
        assert!(config.updates.check);
        assert_eq!(config.updates.state_dir, home.join(".hostathome/cache"));
    }

    #[test]
    fn test_merge_project_overrides_user_per_key() {
        let user: ConfigFile = toml::from_str(
            "[registry]\nbase_url = \"https://user.example\"\ncache_ttl_secs = 10\n[updates]\ncheck = false",
        )
        .unwrap();
        let project: ConfigFile =
            toml::from_str("[registry]\nbase_url = \"https://project.example\"").unwrap();

        let merged = merge_configs(user, Some(project));

        assert_eq!(
            merged.registry.base_url.as_deref(),
            Some("https://project.example")
        );
        assert_eq!(merged.registry.cache_ttl_secs, Some(10));
        assert_eq!(merged.updates.check, Some(false));
    }

    #[test]
    fn test_relative_root_is_anchored() {
        let file: ConfigFile = toml::from_str("[servers]\nroot = \"games\"").unwrap();
        let config = resolve_config(file, Path::new("/home/me"));
        assert_eq!(config.servers.root, PathBuf::from("/home/me/games"));
    }

    #[test]
    fn test_validate_rejects_bad_url_and_zero_timeouts() {
        let base = Path::new("/work");
        let mut config = resolve_config(ConfigFile::default(), base);
        assert!(validate_config(&config).is_ok());

        config.registry.base_url = "ftp://example.com".into();
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("http:// or https://"));

        let mut config = resolve_config(ConfigFile::default(), base);
        config.docker.pull_timeout_secs = 0;
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("docker.pull_timeout_secs"));
    }

    #[test]
    fn test_project_config_search_stops_at_git() {
        let temp = tempdir().unwrap();
        let outer = temp.path();
        fs::write(outer.join(PROJECT_CONFIG_FILENAME), "").unwrap();
        let repo = outer.join("repo");
        let nested = repo.join("a/b");
        fs::create_dir_all(&nested).unwrap();

        // No .git yet: the search climbs to the outer file.
        assert_eq!(
            find_project_config_path(&nested),
            Some(outer.join(PROJECT_CONFIG_FILENAME))
        );

        fs::create_dir(repo.join(".git")).unwrap();
        assert_eq!(find_project_config_path(&nested), None);
    }

    #[test]
    fn test_load_config_in_with_both_files() {
        let temp = tempdir().unwrap();
        let user_path = temp.path().join("user.toml");
        fs::write(&user_path, "[docker]\nop_timeout_secs = 5\n[servers]\nroot = \"/from/user\"").unwrap();
        let project = temp.path().join("project");
        fs::create_dir_all(project.join(".git")).unwrap();
        fs::write(
            project.join(PROJECT_CONFIG_FILENAME),
            "[servers]\nroot = \"servers\"",
        )
        .unwrap();

        let config = load_config_in(&project, Some(&user_path)).unwrap();

        assert_eq!(config.docker.op_timeout_secs, 5);
        assert_eq!(config.servers.root, project.join("servers"));
    }

    #[test]
    fn test_load_config_in_reports_parse_errors() {
        let temp = tempdir().unwrap();
        fs::create_dir(temp.path().join(".git")).unwrap();
        fs::write(temp.path().join(PROJECT_CONFIG_FILENAME), "[registry\n").unwrap();

        let err = load_config_in(temp.path(), None).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to parse TOML"));
    }
}
