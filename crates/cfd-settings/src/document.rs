//! The persisted configuration document.

use serde::{Deserialize, Serialize};

use crate::model::TunnelRule;
use crate::repository::Collection;

fn default_true() -> bool {
    true
}

fn default_auto() -> String {
    "auto".to_string()
}

fn default_loglevel() -> String {
    "info".to_string()
}

/// How the daemon obtains its tunnel identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunMode {
    /// Remotely-managed tunnel, authenticated by token.
    #[default]
    Token,
    /// Locally-managed tunnel driven by a generated config file.
    Config,
}

/// Global daemon settings (the `general` section of the document).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneralSettings {
    /// Whether the daemon is expected to run at all.
    #[serde(default)]
    pub enabled: bool,

    /// Token or config-file mode.
    #[serde(default)]
    pub mode: RunMode,

    /// Tunnel token (token mode).
    #[serde(default)]
    pub token: String,

    /// Named tunnel (config mode).
    #[serde(default)]
    pub tunnel_name: String,

    /// Enable post-quantum key agreement.
    #[serde(default = "default_true")]
    pub post_quantum: bool,

    /// Edge IP version preference ("auto", "4", "6").
    #[serde(default = "default_auto")]
    pub edge_ip_version: String,

    /// Transport protocol preference ("auto", "quic", "http2").
    #[serde(default = "default_auto")]
    pub protocol: String,

    /// Daemon log level.
    #[serde(default = "default_loglevel")]
    pub loglevel: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            mode: RunMode::Token,
            token: String::new(),
            tunnel_name: String::new(),
            post_quantum: true,
            edge_ip_version: default_auto(),
            protocol: default_auto(),
            loglevel: default_loglevel(),
        }
    }
}

/// The whole configuration document.
///
/// Read and written wholesale on every mutating call; no partial
/// updates, no batching.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ConfigDocument {
    /// Global daemon settings.
    #[serde(default)]
    pub general: GeneralSettings,

    /// Tunnel ingress rule collection.
    #[serde(default)]
    pub tunnels: Vec<TunnelRule>,
}

impl Collection<TunnelRule> for ConfigDocument {
    fn records(&self) -> &[TunnelRule] {
        &self.tunnels
    }

    fn records_mut(&mut self) -> &mut Vec<TunnelRule> {
        &mut self.tunnels
    }
}
