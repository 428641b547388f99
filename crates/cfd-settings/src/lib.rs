//! Configuration store adapter for cloudflared tunnel ingress rules.
//!
//! This crate maps a typed collection of tunnel rules to and from a
//! persisted configuration document and exposes CRUD + search over it:
//!
//! - [`ConfigDocument`]: the persisted document (`general` settings
//!   plus the `tunnels` collection), written wholesale per mutation
//! - [`ConfigStore`]: the persistence seam ([`FileStore`] on disk,
//!   [`MemoryStore`] for tests)
//! - [`Repository`]: generic CRUD + search parameterized over a record
//!   type, with validation injected as a pluggable strategy
//! - [`TunnelRule`] / [`TunnelRuleValidator`]: the one record type this
//!   system manages and its write-time schema
//!
//! Every operation re-reads the document and every successful mutation
//! re-writes it (write-through, all-or-nothing per call). Validation
//! runs before any mutation; nothing persists on failure.
//!
//! # Example
//!
//! ```ignore
//! use cfd_settings::{FileStore, TunnelRepository, TunnelRuleFields, TunnelRuleValidator};
//!
//! let store = FileStore::new("/var/db/cfdmgr/config.json");
//! let repo = TunnelRepository::new(store, TunnelRuleValidator);
//!
//! let fields = TunnelRuleFields::new("app.example.com", "https")
//!     .with_url("http://127.0.0.1:8080");
//! let id = repo.add(&fields).await?;
//! let rule = repo.get(id).await?;
//! ```

pub mod document;
pub mod error;
pub mod model;
pub mod repository;
pub mod schema;
pub mod settings;
pub mod store;

pub use document::{ConfigDocument, GeneralSettings, RunMode};
pub use error::SettingsError;
pub use model::{TunnelRule, TunnelRuleFields};
pub use repository::{
    Collection, Record, Repository, SearchRequest, SearchResult, SortSpec, ValidationErrors,
    Validator,
};
pub use schema::TunnelRuleValidator;
pub use settings::Settings;
pub use store::{ConfigStore, FileStore, MemoryStore, StoreError};

/// Repository over the tunnel rule collection with the standard schema.
pub type TunnelRepository<S> = Repository<TunnelRule, S, TunnelRuleValidator>;
