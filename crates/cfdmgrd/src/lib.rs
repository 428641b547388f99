//! cfdmgrd - cloudflared configuration manager daemon
//!
//! Wires the settings store and the service control adapter together:
//! - [`render`]: turns the persisted document into the daemon's YAML
//!   configuration file
//! - [`reconcile`]: starts or stops the daemon to match the
//!   `general.enabled` flag

pub mod reconcile;
pub mod render;

pub use reconcile::{reconcile, ReconcileAction};
pub use render::{render_config, to_yaml, DaemonConfig, IngressEntry};
