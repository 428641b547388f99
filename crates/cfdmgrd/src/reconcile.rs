//! Brings the daemon's running state in line with the enabled flag.

use tracing::info;

use cfd_mgr_common::CfdResult;
use cfd_service::{CommandRunner, ServiceControl, ServiceState};

/// What a reconcile pass did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileAction {
    /// Daemon was enabled but stopped; it was started.
    Started,
    /// Daemon was disabled but running; it was stopped.
    Stopped,
    /// Observed state already matched the flag.
    NoChange,
}

/// Compares the desired state (`enabled`) with the observed status and
/// starts or stops the daemon on mismatch. Start/stop failures are
/// surfaced to the caller; the status query itself cannot fail.
pub async fn reconcile<R: CommandRunner>(
    enabled: bool,
    control: &ServiceControl<R>,
) -> CfdResult<ReconcileAction> {
    let status = control.status().await;

    let action = match (enabled, status.state) {
        (true, ServiceState::Stopped) => {
            info!("Daemon enabled but stopped, starting");
            control.start().await?;
            ReconcileAction::Started
        }
        (false, ServiceState::Running) => {
            info!("Daemon disabled but running, stopping");
            control.stop().await?;
            ReconcileAction::Stopped
        }
        _ => {
            info!(state = %status.state, enabled, "Daemon state matches, nothing to do");
            ReconcileAction::NoChange
        }
    };

    Ok(action)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use cfd_mgr_common::{CfdResult, ExecOutput};
    use std::sync::Mutex;

    /// Runner answering the status query with a scripted message and
    /// recording every command issued.
    struct ScriptedRunner {
        status_output: String,
        seen: Mutex<Vec<String>>,
    }

    impl ScriptedRunner {
        fn new(status_output: &str) -> Self {
            Self {
                status_output: status_output.to_string(),
                seen: Mutex::new(Vec::new()),
            }
        }

        fn commands(&self) -> Vec<String> {
            self.seen.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CommandRunner for ScriptedRunner {
        async fn run(&self, cmd: &str) -> CfdResult<ExecOutput> {
            self.seen.lock().unwrap().push(cmd.to_string());
            let stdout = if cmd.ends_with("status") {
                self.status_output.clone()
            } else {
                "OK".to_string()
            };
            Ok(ExecOutput {
                exit_code: 0,
                stdout,
                stderr: String::new(),
            })
        }
    }

    #[tokio::test]
    async fn test_enabled_but_stopped_starts() {
        let runner = ScriptedRunner::new("cloudflared is not running");
        let control = ServiceControl::new(&runner);
        let action = reconcile(true, &control).await.unwrap();
        assert_eq!(action, ReconcileAction::Started);

        let commands = runner.commands();
        assert!(commands[0].ends_with("cloudflared status"));
        assert!(commands[1].ends_with("cloudflared start"));
    }

    #[tokio::test]
    async fn test_disabled_but_running_stops() {
        let runner = ScriptedRunner::new("cloudflared (12345) is running.");
        let control = ServiceControl::new(&runner);
        let action = reconcile(false, &control).await.unwrap();
        assert_eq!(action, ReconcileAction::Stopped);
        assert!(runner.commands()[1].ends_with("cloudflared stop"));
    }

    #[tokio::test]
    async fn test_matching_state_is_noop() {
        let runner = ScriptedRunner::new("cloudflared (12345) is running.");
        let control = ServiceControl::new(runner);
        let action = reconcile(true, &control).await.unwrap();
        assert_eq!(action, ReconcileAction::NoChange);

        let control_stopped =
            ServiceControl::new(ScriptedRunner::new("cloudflared is not running"));
        let action = reconcile(false, &control_stopped).await.unwrap();
        assert_eq!(action, ReconcileAction::NoChange);
    }
}
