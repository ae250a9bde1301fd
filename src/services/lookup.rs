//! Lookup service composing title resolution and field projection.
//!
//! Front ends (REST handlers, the chat bot, the CLI) go through
//! [`LookupService`] so storage failures are translated into [`LookupError`]
//! in one place.

use crate::db::{AnimeStore, StoreError};
use crate::models::anime::{AnimeRecord, NewAnime};
use crate::services::projector;
use crate::services::resolver::Resolver;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error};

/// Errors surfaced to lookup callers.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("Anime not found: {0}")]
    NotFound(String),

    #[error("Field '{0}' not found")]
    InvalidField(String),

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),
}

impl From<StoreError> for LookupError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Unavailable(msg) => Self::StorageUnavailable(msg),
        }
    }
}

/// Identifier plus the fields the caller wants printed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LookupRequest {
    pub identifier: String,
    pub fields: Vec<String>,
}

impl LookupRequest {
    pub fn new(identifier: impl Into<String>, fields: Vec<String>) -> Self {
        Self {
            identifier: identifier.into(),
            fields,
        }
    }

    /// Splits a comma separated field list, dropping blanks.
    #[must_use]
    pub fn parse_field_list(raw: &str) -> Vec<String> {
        raw.split(',')
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .map(str::to_string)
            .collect()
    }
}

#[derive(Clone)]
pub struct LookupService {
    store: Arc<dyn AnimeStore>,
    resolver: Resolver,
}

impl LookupService {
    #[must_use]
    pub fn new(store: Arc<dyn AnimeStore>, similarity_threshold: u8) -> Self {
        Self {
            store,
            resolver: Resolver::new(similarity_threshold),
        }
    }

    /// Resolves the identifier and renders the requested fields.
    pub async fn lookup(&self, request: &LookupRequest) -> Result<String, LookupError> {
        let record = self
            .resolver
            .resolve(self.store.as_ref(), &request.identifier)
            .await
            .inspect_err(log_failure)?
            .record;

        projector::project(&record, request.fields.as_slice())
    }

    pub async fn get_by_id(&self, id: i32) -> Result<AnimeRecord, LookupError> {
        self.store
            .get_by_id(id)
            .await
            .map_err(LookupError::from)
            .inspect_err(log_failure)?
            .ok_or_else(|| LookupError::NotFound(id.to_string()))
    }

    pub async fn create(&self, anime: NewAnime) -> Result<AnimeRecord, LookupError> {
        self.store
            .insert(anime)
            .await
            .map_err(LookupError::from)
            .inspect_err(log_failure)
    }
}

fn log_failure(err: &LookupError) {
    match err {
        LookupError::StorageUnavailable(detail) => error!("Storage failure: {}", detail),
        LookupError::NotFound(identifier) => debug!("No anime matched '{}'", identifier),
        LookupError::InvalidField(_) => {}
    }
}
