//! Common infrastructure for the cloudflared manager crates.
//!
//! This crate provides the pieces shared by the settings and service
//! adapters and the `cfdmgrd` daemon:
//!
//! - [`shell`]: safe shell command execution with proper quoting
//! - [`error`]: the common error taxonomy
//!
//! # Architecture
//!
//! The manager crates follow one pattern:
//!
//! 1. Read structured configuration from the shared config document
//! 2. Validate before any mutation (all-or-nothing per call)
//! 3. Execute external commands to query or drive the daemon
//! 4. Parse short text responses into typed results
//!
//! # Example
//!
//! ```ignore
//! use cfd_mgr_common::{
//!     shell::{self, CONFIGCTL_CMD, shellquote},
//!     error::CfdResult,
//! };
//!
//! async fn query(service: &str) -> CfdResult<String> {
//!     let cmd = format!("{} {} status", CONFIGCTL_CMD, shellquote(service));
//!     shell::exec_or_fail(&cmd).await
//! }
//! ```

pub mod error;
pub mod shell;

// Re-export commonly used items at crate root
pub use error::{CfdError, CfdResult};
pub use shell::ExecOutput;
