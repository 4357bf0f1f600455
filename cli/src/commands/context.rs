//! # Shared Command Steps
//!
//! File: cli/src/commands/context.rs
//! Repository: https://github.com/hostathome/cli
//!
//! Game-targeting commands start the same way: check the name, look the game
//! up in the registry, then talk to Docker. Those steps live here so every
//! command reports failures the same way.
//!
use crate::common::docker::{self, Engine};
use crate::common::ui;
use crate::core::config::Config;
use crate::core::error::{HostError, Result};
use crate::core::registry::{GameDefinition, RegistryCache};
use crate::core::validate::validate_game_name;
use anyhow::anyhow;
use std::sync::Arc;
use tracing::debug;

/// Validates `game` and resolves its definition through the registry cache.
pub async fn resolve_game(config: &Config, game: &str) -> Result<Arc<GameDefinition>> {
    validate_game_name(game)?;
    let mut registry = RegistryCache::from_config(&config.registry)?;
    let definition = registry
        .resolve(game)
        .await
        .map_err(|e| {
            if e.is_not_found() {
                ui::hint("Run 'hostathome list' to see the available games.");
            }
            anyhow!(HostError::from(e))
        })?;
    debug!("Resolved '{}' to image {}", game, definition.image);
    Ok(definition)
}

/// Connects to the Docker daemon and checks that it responds.
pub async fn docker_engine(config: &Config) -> Result<Engine> {
    let engine = docker::connect::connect(&config.docker).await?;
    docker::connect::ping(&engine).await?;
    Ok(engine)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::load_config_in;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_invalid_name_fails_before_registry() {
        let dir = tempdir().unwrap();
        std::fs::create_dir(dir.path().join(".git")).unwrap();
        let mut config = load_config_in(dir.path(), None).unwrap();
        // Unroutable: the test fails loudly if a request is attempted.
        config.registry.base_url = "http://127.0.0.1:1".into();
        let err = resolve_game(&config, "../etc").await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<HostError>(),
            Some(HostError::InvalidGameName(_))
        ));
    }
}
