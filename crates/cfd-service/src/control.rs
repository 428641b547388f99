//! Service control: lifecycle queries and commands with text parsing.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

use cfd_mgr_common::shell;
use cfd_mgr_common::{CfdError, CfdResult, ExecOutput};

use crate::commands::{build_service_cmd, ServiceAction};
use crate::types::{ServiceState, ServiceStatus, VersionInfo};

/// Matches the daemon's version banner, e.g.
/// `cloudflared version 2024.8.1 (built 2024-08-12)`.
static VERSION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"cloudflared version (\d+(?:\.\d+)*)").expect("Invalid regex pattern")
});

/// Substring marking a running daemon in the status output. Literal
/// match only: `is not running` does not contain it and classifies as
/// stopped, which is the intended reading.
const RUNNING_MARKER: &str = "is running";

/// Seam to the external command execution facility.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Runs a command, returning its output. `Err` means the command
    /// could not be run at all; a non-zero exit is reported inside
    /// the output.
    async fn run(&self, cmd: &str) -> CfdResult<ExecOutput>;
}

#[async_trait]
impl<T: CommandRunner + ?Sized> CommandRunner for &T {
    async fn run(&self, cmd: &str) -> CfdResult<ExecOutput> {
        (**self).run(cmd).await
    }
}

#[async_trait]
impl<T: CommandRunner + ?Sized> CommandRunner for std::sync::Arc<T> {
    async fn run(&self, cmd: &str) -> CfdResult<ExecOutput> {
        (**self).run(cmd).await
    }
}

/// Runner backed by the local shell.
#[derive(Debug, Default, Clone)]
pub struct ShellRunner;

#[async_trait]
impl CommandRunner for ShellRunner {
    async fn run(&self, cmd: &str) -> CfdResult<ExecOutput> {
        shell::exec(cmd).await
    }
}

/// Extracts the version from raw command output.
///
/// Returns [`VersionInfo::unknown`] when the banner shape is absent —
/// the daemon's CLI output is not a versioned contract, so parse
/// misses are absorbed rather than escalated.
pub fn parse_version(raw: &str) -> VersionInfo {
    match VERSION_RE.captures(raw.trim()) {
        Some(caps) => VersionInfo {
            version: caps[1].to_string(),
        },
        None => {
            debug!(output = %raw.trim(), "Version output unrecognized");
            VersionInfo::unknown()
        }
    }
}

/// Classifies raw status output, keeping the full message.
pub fn parse_status(raw: &str) -> ServiceStatus {
    let message = raw.trim().to_string();
    let state = if message.contains(RUNNING_MARKER) {
        ServiceState::Running
    } else {
        ServiceState::Stopped
    };
    ServiceStatus { state, message }
}

/// Lifecycle query/command interface to the externally-managed daemon.
///
/// Stateless: every call is a point query against live process state.
pub struct ServiceControl<R> {
    runner: R,
}

impl<R: CommandRunner> ServiceControl<R> {
    /// Creates a control handle over the given runner.
    pub fn new(runner: R) -> Self {
        Self { runner }
    }

    /// Queries the daemon version. Never fails: runner errors and
    /// unrecognized output both degrade to `"unknown"`.
    pub async fn version(&self) -> VersionInfo {
        let raw = match self.runner.run(&build_service_cmd(ServiceAction::Version)).await {
            Ok(output) => output.combined_output(),
            Err(e) => {
                warn!(error = %e, "Version query could not run");
                String::new()
            }
        };
        parse_version(&raw)
    }

    /// Queries the daemon status. Never fails: runner errors degrade
    /// to `Stopped` with the error text as the message.
    pub async fn status(&self) -> ServiceStatus {
        match self.runner.run(&build_service_cmd(ServiceAction::Status)).await {
            Ok(output) => parse_status(&output.combined_output()),
            Err(e) => {
                warn!(error = %e, "Status query could not run");
                ServiceStatus {
                    state: ServiceState::Stopped,
                    message: e.to_string(),
                }
            }
        }
    }

    /// Starts the daemon. Unlike the queries, failure is surfaced: a
    /// failed start is actionable by the caller.
    pub async fn start(&self) -> CfdResult<String> {
        self.run_lifecycle(ServiceAction::Start).await
    }

    /// Stops the daemon.
    pub async fn stop(&self) -> CfdResult<String> {
        self.run_lifecycle(ServiceAction::Stop).await
    }

    /// Restarts the daemon.
    pub async fn restart(&self) -> CfdResult<String> {
        self.run_lifecycle(ServiceAction::Restart).await
    }

    async fn run_lifecycle(&self, action: ServiceAction) -> CfdResult<String> {
        let cmd = build_service_cmd(action);
        let output = self.runner.run(&cmd).await?;
        if output.success() {
            Ok(output.stdout)
        } else {
            Err(CfdError::CommandFailed {
                command: cmd,
                exit_code: output.exit_code,
                output: output.combined_output(),
            })
        }
    }
}
