//! Transport seam between the query controller and the suggestion backend.
//!
//! The controller only ever sees this trait, so tests inject mocks and
//! frontends choose their own wire: an HTTP adapter deserializes the
//! autocomplete payload straight into [`TieredHits`], while an embedded
//! frontend can skip the network entirely with [`StoreTransport`].

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::core::matcher::suggest;
use crate::core::species::{SpeciesHit, TieredHits};
use crate::core::store::SpeciesStore;
use crate::error::BestiaryError;

/// Client-side view of a failed suggestion fetch.
///
/// All variants collapse into the same transient notice in the UI; the
/// distinction only matters for diagnostics.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    /// Non-2xx response from the autocomplete endpoint.
    #[error("request failed with status {0}")]
    Status(u16),

    /// The request never completed (DNS, connect, reset...).
    #[error("network error: {0}")]
    Network(String),

    /// The response arrived but was not the expected payload.
    #[error("malformed response: {0}")]
    Decode(String),

    /// The backend answered with its generic unavailable payload.
    #[error("search backend unavailable")]
    Backend,
}

/// Fetches the two suggestion tiers for a query.
///
/// Cancellation is not part of the contract: the controller aborts the task
/// driving this future, which must therefore hold no state that outlives it.
#[async_trait]
pub trait SuggestTransport: Send + Sync {
    async fn fetch(&self, query: &str, limit: usize) -> Result<TieredHits, TransportError>;
}

/// In-process transport running the matcher directly against a store.
///
/// Lets a frontend embed the whole search loop without a server, and gives
/// tests an end-to-end path through the real matcher.
pub struct StoreTransport {
    store: Arc<dyn SpeciesStore>,
}

impl StoreTransport {
    pub fn new(store: Arc<dyn SpeciesStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl SuggestTransport for StoreTransport {
    async fn fetch(&self, query: &str, limit: usize) -> Result<TieredHits, TransportError> {
        let suggestions = suggest(self.store.as_ref(), query, limit).map_err(|err| match err {
            BestiaryError::StoreUnavailable(_) => TransportError::Backend,
            other => TransportError::Network(other.to_string()),
        })?;

        Ok(TieredHits {
            prefix: suggestions.prefix.into_iter().map(SpeciesHit::from).collect(),
            contains: suggestions.contains.into_iter().map(SpeciesHit::from).collect(),
        })
    }
}
