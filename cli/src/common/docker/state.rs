//! # Container State Queries
//!
//! File: cli/src/common/docker/state.rs
//! Repository: https://github.com/hostathome/cli
//!
//! ## Overview
//!
//! Looks up game server containers and summarizes them for `status`.
//!
//! Docker's `name` filter matches substrings (`hostathome-mc` also matches
//! `hostathome-mc2`), so results are always narrowed to the exact name here.
//!
//! Published ports are rendered as `public->private/proto`, joined with
//! `", "`. A container with nothing published shows `-`.
//!
use super::{container_name, Engine, CONTAINER_PREFIX, LABEL_GAME, LABEL_MANAGED};
use crate::core::error::{HostError, Result};
use anyhow::anyhow;
use bollard::container::ListContainersOptions;
use bollard::models::{ContainerSummary, Port};
use std::collections::HashMap;
use tracing::{debug, instrument};

/// One row of `hostathome status`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerStatus {
    pub game: String,
    pub state: String,
    pub ports: String,
    pub id: String,
}

impl ServerStatus {
    pub fn short_id(&self) -> &str {
        &self.id[..self.id.len().min(12)]
    }

    pub fn is_running(&self) -> bool {
        self.state == "running"
    }
}

async fn list(engine: &Engine, all: bool, filters: HashMap<String, Vec<String>>) -> Result<Vec<ContainerSummary>> {
    let options = Some(ListContainersOptions {
        all,
        filters,
        ..Default::default()
    });
    engine
        .op("list containers", async {
            engine
                .api()
                .list_containers(options)
                .await
                .map_err(|e| anyhow!(HostError::DockerApi { source: e }).context("Failed to list containers"))
        })
        .await
}

fn has_name(summary: &ContainerSummary, name: &str) -> bool {
    let wanted = format!("/{}", name);
    summary
        .names
        .as_ref()
        .is_some_and(|names| names.iter().any(|n| n == &wanted || n == name))
}

/// Finds the container for `game`. With `running_only`, stopped containers are ignored.
#[instrument(skip(engine))]
pub async fn find_server(engine: &Engine, game: &str, running_only: bool) -> Result<Option<ContainerSummary>> {
    let name = container_name(game);
    let filters = HashMap::from([("name".to_string(), vec![name.clone()])]);
    let found = list(engine, !running_only, filters)
        .await?
        .into_iter()
        .find(|c| has_name(c, &name));
    debug!("Container '{}' present: {}", name, found.is_some());
    Ok(found)
}

pub fn is_running(summary: &ContainerSummary) -> bool {
    summary.state.as_deref() == Some("running")
}

/// Status of all managed containers, or only `game`'s.
#[instrument(skip(engine))]
pub async fn server_status(engine: &Engine, game: Option<&str>) -> Result<Vec<ServerStatus>> {
    let mut filters = HashMap::from([(
        "label".to_string(),
        vec![format!("{}=true", LABEL_MANAGED)],
    )]);
    if let Some(game) = game {
        filters.insert("name".to_string(), vec![container_name(game)]);
    }
    let containers = list(engine, true, filters).await?;
    let wanted = game.map(container_name);
    Ok(containers
        .iter()
        .filter(|c| match wanted.as_deref() {
            Some(name) => has_name(c, name),
            None => true,
        })
        .map(summarize)
        .collect())
}

/// Game name from the `hostathome.game` label, else from the container name.
pub fn game_of(summary: &ContainerSummary) -> String {
    if let Some(game) = summary.labels.as_ref().and_then(|l| l.get(LABEL_GAME)) {
        return game.clone();
    }
    summary
        .names
        .as_ref()
        .and_then(|names| names.first())
        .map(|n| {
            let n = n.trim_start_matches('/');
            n.strip_prefix(CONTAINER_PREFIX).unwrap_or(n).to_string()
        })
        .unwrap_or_default()
}

pub fn summarize(summary: &ContainerSummary) -> ServerStatus {
    ServerStatus {
        game: game_of(summary),
        state: summary.state.clone().unwrap_or_else(|| "unknown".to_string()),
        ports: format_ports(summary.ports.as_deref().unwrap_or_default()),
        id: summary.id.clone().unwrap_or_default(),
    }
}

/// `25565->25565/tcp, 25575->25575/tcp`, or `-` when nothing is published.
/// Docker reports IPv4 and IPv6 bindings separately; duplicates are dropped.
pub fn format_ports(ports: &[Port]) -> String {
    let mut seen: Vec<String> = Vec::new();
    for port in ports {
        let Some(public) = port.public_port else {
            continue;
        };
        let proto = port
            .typ
            .as_ref()
            .map(|t| t.to_string())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| "tcp".to_string());
        let entry = format!("{}->{}/{}", public, port.private_port, proto);
        if !seen.contains(&entry) {
            seen.push(entry);
        }
    }
    if seen.is_empty() {
        "-".to_string()
    } else {
        seen.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bollard::models::PortTypeEnum;

    fn port(public: Option<u16>, private: u16, typ: PortTypeEnum) -> Port {
        Port {
            ip: Some("0.0.0.0".into()),
            private_port: private,
            public_port: public,
            typ: Some(typ),
        }
    }

    #[test]
    fn test_format_ports() {
        let ports = vec![
            port(Some(25565), 25565, PortTypeEnum::TCP),
            port(Some(25565), 25565, PortTypeEnum::TCP),
            port(Some(2456), 2456, PortTypeEnum::UDP),
            port(None, 8080, PortTypeEnum::TCP),
        ];
        assert_eq!(format_ports(&ports), "25565->25565/tcp, 2456->2456/udp");
    }

    #[test]
    fn test_format_ports_none_published() {
        assert_eq!(format_ports(&[]), "-");
        assert_eq!(format_ports(&[port(None, 80, PortTypeEnum::TCP)]), "-");
    }

    #[test]
    fn test_game_of_prefers_label() {
        let summary = ContainerSummary {
            names: Some(vec!["/hostathome-mc".into()]),
            labels: Some(HashMap::from([(LABEL_GAME.to_string(), "minecraft".to_string())])),
            ..Default::default()
        };
        assert_eq!(game_of(&summary), "minecraft");
    }

    #[test]
    fn test_game_of_falls_back_to_name() {
        let summary = ContainerSummary {
            names: Some(vec!["/hostathome-terraria".into()]),
            ..Default::default()
        };
        assert_eq!(game_of(&summary), "terraria");
    }

    #[test]
    fn test_summarize() {
        let summary = ContainerSummary {
            id: Some("0123456789abcdef0123".into()),
            names: Some(vec!["/hostathome-mc".into()]),
            state: Some("exited".into()),
            ..Default::default()
        };
        let status = summarize(&summary);
        assert_eq!(status.game, "mc");
        assert_eq!(status.short_id(), "0123456789ab");
        assert_eq!(status.ports, "-");
        assert!(!status.is_running());
    }

    #[test]
    fn test_has_name_is_exact() {
        let summary = ContainerSummary {
            names: Some(vec!["/hostathome-mc2".into()]),
            ..Default::default()
        };
        assert!(!has_name(&summary, "hostathome-mc"));
        assert!(has_name(&summary, "hostathome-mc2"));
    }
}
