//! Server-side search core: records, store, matcher, ranker.
//!
//! Everything here is stateless and read-only; operations are safe to run
//! in parallel across independent requests.

pub mod matcher;
pub mod ranker;
pub mod species;
pub mod store;

pub use matcher::{suggest, Suggestions};
pub use ranker::{page_window, search, SearchPage};
pub use species::{Species, SpeciesHit, TieredHits};
pub use store::{MemoryStore, SpeciesStore};
