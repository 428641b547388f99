//! Generic repository over a record collection in the config document.
//!
//! Replaces the inherited base-class CRUD of the original system with a
//! repository parameterized over the record type, the store handle, and
//! a pluggable validation strategy. Every operation re-reads the
//! document; every successful mutation re-writes it wholesale.

use std::collections::BTreeMap;
use std::marker::PhantomData;

use tracing::{debug, info};
use uuid::Uuid;

use crate::document::ConfigDocument;
use crate::error::SettingsError;
use crate::store::ConfigStore;

/// Field-keyed, human-readable validation messages.
pub type ValidationErrors = BTreeMap<String, Vec<String>>;

/// A record type managed by a [`Repository`].
pub trait Record: Clone + Send + Sync {
    /// Write-side field set (form submission shape).
    type Fields: Clone + Send + Sync;

    /// Builds a new record from validated fields under a fresh id.
    fn create(id: Uuid, fields: &Self::Fields) -> Self;

    /// The record's identifier.
    fn id(&self) -> Uuid;

    /// Overwrites the mutable fields in place; the id is untouched.
    fn apply(&mut self, fields: &Self::Fields);

    /// Default field set used to render a creation form.
    fn template() -> Self::Fields;

    /// Textual projection of one field, for search and sorting.
    /// Returns `None` for unknown fields and absent optional values.
    fn field_text(&self, field: &str) -> Option<String>;
}

/// Pluggable write-time validation strategy.
pub trait Validator<R: Record>: Send + Sync {
    /// Validates a field set; an empty map means the fields pass.
    fn validate(&self, fields: &R::Fields) -> ValidationErrors;
}

/// Access to a typed record collection inside the document.
pub trait Collection<R> {
    /// The records, in insertion order.
    fn records(&self) -> &[R];

    /// Mutable access to the records.
    fn records_mut(&mut self) -> &mut Vec<R>;
}

/// Sort key for search results.
#[derive(Debug, Clone)]
pub struct SortSpec {
    /// Field to sort by.
    pub field: String,
    /// Sort descending instead of ascending.
    pub descending: bool,
}

/// Search parameters: filter, ordering, paging.
#[derive(Debug, Clone, Default)]
pub struct SearchRequest {
    /// Query text, matched case-insensitively as a substring.
    /// Empty matches every record.
    pub query: String,
    /// Fields the query is matched against. Empty means no filter.
    pub fields: Vec<String>,
    /// Optional sort key; insertion order when absent.
    pub sort: Option<SortSpec>,
    /// Rows to skip after filtering and sorting.
    pub offset: usize,
    /// Maximum rows to return; unlimited when absent.
    pub limit: Option<usize>,
}

impl SearchRequest {
    /// Builds a filter-only request over the given fields.
    pub fn matching(query: &str, fields: &[&str]) -> Self {
        Self {
            query: query.to_string(),
            fields: fields.iter().map(|f| f.to_string()).collect(),
            ..Self::default()
        }
    }

    fn matches<R: Record>(&self, record: &R) -> bool {
        let query = self.query.trim().to_lowercase();
        if query.is_empty() || self.fields.is_empty() {
            return true;
        }
        self.fields.iter().any(|field| {
            record
                .field_text(field)
                .map(|text| text.to_lowercase().contains(&query))
                .unwrap_or(false)
        })
    }
}

/// One page of search results.
#[derive(Debug, Clone)]
pub struct SearchResult<R> {
    /// The page of matching records.
    pub rows: Vec<R>,
    /// Total matching records before paging.
    pub total: usize,
}

/// Generic CRUD + search over one record collection.
pub struct Repository<R, S, V> {
    store: S,
    validator: V,
    _record: PhantomData<fn() -> R>,
}

impl<R, S, V> Repository<R, S, V>
where
    R: Record,
    S: ConfigStore,
    V: Validator<R>,
    ConfigDocument: Collection<R>,
{
    /// Creates a repository over the given store and validation
    /// strategy.
    pub fn new(store: S, validator: V) -> Self {
        Self {
            store,
            validator,
            _record: PhantomData,
        }
    }

    /// The underlying store handle.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns the record with the given id.
    pub async fn get(&self, id: Uuid) -> Result<R, SettingsError> {
        let doc = self.store.load().await?;
        doc.records()
            .iter()
            .find(|r| r.id() == id)
            .cloned()
            .ok_or(SettingsError::NotFound { id })
    }

    /// Returns an empty field set pre-filled with defaults, for
    /// rendering a creation form.
    pub fn template(&self) -> R::Fields {
        R::template()
    }

    /// Validates the fields, appends a new record under a fresh id,
    /// and persists the document. Nothing persists on validation
    /// failure.
    pub async fn add(&self, fields: &R::Fields) -> Result<Uuid, SettingsError> {
        let errors = self.validator.validate(fields);
        if !errors.is_empty() {
            debug!(fields = errors.len(), "Add rejected by validation");
            return Err(SettingsError::Validation(errors));
        }

        let mut doc = self.store.load().await?;
        let id = fresh_id(doc.records());
        doc.records_mut().push(R::create(id, fields));
        self.store.save(&doc).await?;

        info!(%id, "Record added");
        Ok(id)
    }

    /// Validates the fields and overwrites the record's mutable fields
    /// in place, persisting the document. Fails with `NotFound` before
    /// validation is reported when the id is absent.
    pub async fn set(&self, id: Uuid, fields: &R::Fields) -> Result<(), SettingsError> {
        let mut doc = self.store.load().await?;
        let index = doc
            .records()
            .iter()
            .position(|r| r.id() == id)
            .ok_or(SettingsError::NotFound { id })?;

        let errors = self.validator.validate(fields);
        if !errors.is_empty() {
            debug!(%id, fields = errors.len(), "Set rejected by validation");
            return Err(SettingsError::Validation(errors));
        }

        doc.records_mut()[index].apply(fields);
        self.store.save(&doc).await?;

        info!(%id, "Record updated");
        Ok(())
    }

    /// Removes the record and persists the document. Deleting an
    /// absent id fails with `NotFound`, including repeated deletes.
    pub async fn delete(&self, id: Uuid) -> Result<(), SettingsError> {
        let mut doc = self.store.load().await?;
        let index = doc
            .records()
            .iter()
            .position(|r| r.id() == id)
            .ok_or(SettingsError::NotFound { id })?;

        doc.records_mut().remove(index);
        self.store.save(&doc).await?;

        info!(%id, "Record deleted");
        Ok(())
    }

    /// Returns records matching the request, ordered and paginated.
    pub async fn search(&self, request: &SearchRequest) -> Result<SearchResult<R>, SettingsError> {
        let doc = self.store.load().await?;

        let mut rows: Vec<R> = doc
            .records()
            .iter()
            .filter(|r| request.matches(*r))
            .cloned()
            .collect();

        if let Some(sort) = &request.sort {
            rows.sort_by(|a, b| {
                let ka = a.field_text(&sort.field).unwrap_or_default().to_lowercase();
                let kb = b.field_text(&sort.field).unwrap_or_default().to_lowercase();
                let ord = ka.cmp(&kb);
                if sort.descending {
                    ord.reverse()
                } else {
                    ord
                }
            });
        }

        let total = rows.len();
        let rows: Vec<R> = rows
            .into_iter()
            .skip(request.offset)
            .take(request.limit.unwrap_or(usize::MAX))
            .collect();

        Ok(SearchResult { rows, total })
    }
}

/// Generates an id not present in the collection. A v4 collision is
/// vanishingly unlikely but cheap to rule out.
fn fresh_id<R: Record>(records: &[R]) -> Uuid {
    loop {
        let id = Uuid::new_v4();
        if !records.iter().any(|r| r.id() == id) {
            return id;
        }
    }
}
