//! Typed results for service control queries.
//!
//! Both types are ephemeral: derived from live process state on each
//! call, never cached, never persisted.

/// Sentinel version string used when the daemon's output is
/// unparsable.
pub const UNKNOWN_VERSION: &str = "unknown";

/// Running state of the managed daemon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceState {
    /// The status output contained the literal `is running`.
    Running,
    /// Anything else, including unreadable output.
    Stopped,
}

impl ServiceState {
    /// Returns the state name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceState::Running => "running",
            ServiceState::Stopped => "stopped",
        }
    }
}

impl std::fmt::Display for ServiceState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a status query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceStatus {
    /// Classified state.
    pub state: ServiceState,
    /// The full raw diagnostic text, carried regardless of the
    /// classification outcome.
    pub message: String,
}

/// Result of a version query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionInfo {
    /// Semantic-version string, or [`UNKNOWN_VERSION`].
    pub version: String,
}

impl VersionInfo {
    /// The unknown-version result.
    pub fn unknown() -> Self {
        Self {
            version: UNKNOWN_VERSION.to_string(),
        }
    }
}
