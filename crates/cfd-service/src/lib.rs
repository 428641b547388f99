//! Service control adapter for the cloudflared tunnel daemon.
//!
//! Translates lifecycle queries and commands into external command
//! invocations and parses the short free-text responses into typed
//! results:
//!
//! - [`ServiceControl::version`] / [`ServiceControl::status`]: read-only
//!   queries that never fail; unparsable or missing output degrades to
//!   the `"unknown"` version and `Stopped` status
//! - [`ServiceControl::start`] / [`ServiceControl::stop`] /
//!   [`ServiceControl::restart`]: lifecycle mutations that do surface
//!   command failure
//!
//! Both queries are stateless point calls: no caching, no retries, no
//! state between invocations.

pub mod commands;
pub mod control;
pub mod types;

pub use control::{CommandRunner, ServiceControl, ShellRunner};
pub use types::{ServiceState, ServiceStatus, VersionInfo, UNKNOWN_VERSION};
