//! Command builders for service control operations.

use cfd_mgr_common::shell;

/// Service name the control utility is asked to act on.
pub const SERVICE_NAME: &str = "cloudflared";

/// Lifecycle actions the adapter issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceAction {
    Version,
    Status,
    Start,
    Stop,
    Restart,
}

impl ServiceAction {
    /// The action token passed to the control utility.
    pub fn token(&self) -> &'static str {
        match self {
            ServiceAction::Version => "version",
            ServiceAction::Status => "status",
            ServiceAction::Start => "start",
            ServiceAction::Stop => "stop",
            ServiceAction::Restart => "restart",
        }
    }
}

/// Build the control command for the given action.
pub fn build_service_cmd(action: ServiceAction) -> String {
    format!(
        "{} {} {}",
        shell::CONFIGCTL_CMD,
        SERVICE_NAME,
        action.token()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_version_cmd() {
        let cmd = build_service_cmd(ServiceAction::Version);
        assert!(cmd.contains("configctl"));
        assert!(cmd.ends_with("cloudflared version"));
    }

    #[test]
    fn test_build_status_cmd() {
        let cmd = build_service_cmd(ServiceAction::Status);
        assert!(cmd.ends_with("cloudflared status"));
    }

    #[test]
    fn test_build_lifecycle_cmds() {
        assert!(build_service_cmd(ServiceAction::Start).ends_with("cloudflared start"));
        assert!(build_service_cmd(ServiceAction::Stop).ends_with("cloudflared stop"));
        assert!(build_service_cmd(ServiceAction::Restart).ends_with("cloudflared restart"));
    }
}
