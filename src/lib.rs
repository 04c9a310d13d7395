//! Bestiary - incremental species-directory search.
//!
//! Bestiary lets a user find a species record by typing a partial string,
//! with ranked, incrementally narrowed suggestions while typing and a full
//! paginated result page on submit.
//!
//! # Architecture
//!
//! The library is organized into these main modules:
//!
//! - [`config`] - Configuration loading and management
//! - [`core`] - Records, store, two-tier matcher and paginated ranker
//! - [`client`] - Query controller (debounce/cache/cancellation), list
//!   cursor, and rendering helpers
//! - [`server`] - HTTP endpoints exposing the core over JSON
//!
//! # Example
//!
//! ```ignore
//! use bestiary::{suggest, MemoryStore};
//!
//! let store = MemoryStore::sample();
//! let tiers = suggest(&store, "cha", 5)?;
//! for species in &tiers.prefix {
//!     println!("{} ({})", species.common_name, species.scientific_name);
//! }
//! ```

// Public modules
pub mod client;
pub mod config;
pub mod core;
pub mod server;

// Internal modules
mod error;

// Re-export commonly used types for convenience
pub use crate::client::{
    ControllerSettings, ListCursor, NavOutcome, QueryController, StoreTransport,
    SuggestTransport, SuggestionView, TransportError,
};
pub use crate::config::Config;
pub use crate::core::{
    search, suggest, MemoryStore, SearchPage, Species, SpeciesHit, SpeciesStore, Suggestions,
    TieredHits,
};
pub use crate::error::{BestiaryError, BestiaryResult};
