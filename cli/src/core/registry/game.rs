//! # Game Definitions
//!
//! File: cli/src/core/registry/game.rs
//! Repository: https://github.com/hostathome/cli
//!
//! ## Overview
//!
//! Data types for a single game server definition as published in the
//! registry (`games/<name>.yaml`) and for the registry index (`index.yaml`).
//!
//! Every field is optional in the YAML. Missing fields take their zero value,
//! so a port of `0` means "not published" and an empty protocol means `tcp`.
//!
//! ```yaml
//! name: minecraft
//! display_name: Minecraft Java
//! description: Vanilla Minecraft server
//! image: ghcr.io/hostathome/minecraft-server:latest
//! ports: { player: 25565, rcon: 25575 }
//! internal_ports: { player: 25565, rcon: 25575 }
//! protocols: { player: tcp }
//! ```
//!
use serde::{Deserialize, Serialize};

/// Protocol used when a definition leaves a port's protocol empty.
pub const DEFAULT_PROTOCOL: &str = "tcp";

/// The two ports a game server may publish.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortKind {
    Player,
    Rcon,
}

impl PortKind {
    /// Both kinds, in the order they are published.
    pub const ALL: [PortKind; 2] = [PortKind::Player, PortKind::Rcon];

    /// Human label used in messages ("player", "RCON").
    pub fn label(self) -> &'static str {
        match self {
            PortKind::Player => "player",
            PortKind::Rcon => "RCON",
        }
    }
}

/// A (player, rcon) port pair. `0` means the port is not used.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct PortPair {
    pub player: u32,
    pub rcon: u32,
}

impl PortPair {
    pub fn get(&self, kind: PortKind) -> u32 {
        match kind {
            PortKind::Player => self.player,
            PortKind::Rcon => self.rcon,
        }
    }
}

/// Per-port protocol selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Protocols {
    pub player: Option<String>,
    pub rcon: Option<String>,
}

impl Protocols {
    /// Protocol for the given port, falling back to `tcp` when unset or blank.
    pub fn for_port(&self, kind: PortKind) -> &str {
        let proto = match kind {
            PortKind::Player => self.player.as_deref(),
            PortKind::Rcon => self.rcon.as_deref(),
        };
        match proto.map(str::trim) {
            Some(p) if !p.is_empty() => p,
            _ => DEFAULT_PROTOCOL,
        }
    }
}

/// A game server definition from the registry. Immutable once loaded.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct GameDefinition {
    pub name: String,
    pub display_name: String,
    pub description: String,
    /// Container image reference, e.g. `ghcr.io/hostathome/minecraft-server:latest`.
    pub image: String,
    /// Ports published on the host.
    pub ports: PortPair,
    /// Ports the server listens on inside the container.
    pub internal_ports: PortPair,
    pub protocols: Protocols,
    pub volumes: Vec<String>,
    /// Free-form schema describing the server's settings file.
    pub config_schema: Option<serde_yaml::Mapping>,
}

impl GameDefinition {
    /// Name shown to the user: the display name, or the raw name if none is set.
    pub fn title(&self) -> &str {
        if self.display_name.trim().is_empty() {
            &self.name
        } else {
            &self.display_name
        }
    }

    /// Definition used by `run --dev`: a locally built `<game>-server:dev`
    /// image with host ports 1024/1025 mapped to the Minecraft-style defaults.
    pub fn dev(game: &str) -> Self {
        Self {
            name: game.to_string(),
            display_name: format!("{} (dev)", game),
            image: format!("{}-server:dev", game),
            ports: PortPair {
                player: 1024,
                rcon: 1025,
            },
            internal_ports: PortPair {
                player: 25565,
                rcon: 25575,
            },
            protocols: Protocols {
                player: Some(DEFAULT_PROTOCOL.to_string()),
                rcon: Some(DEFAULT_PROTOCOL.to_string()),
            },
            ..Default::default()
        }
    }
}

/// Shape of the remote `index.yaml`.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct IndexFile {
    #[serde(default)]
    pub games: Vec<String>,
}
