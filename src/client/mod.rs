//! Client-side incremental search: query controller, cache, cursor,
//! rendering helpers, and the transport seam they talk through.
//!
//! Each search-input widget owns one [`QueryController`] and one
//! [`ListCursor`]; instances share no state.

pub mod cache;
pub mod controller;
pub mod cursor;
pub mod render;
pub mod transport;

pub use controller::{ControllerSettings, QueryController, SuggestionView};
pub use cursor::{ListCursor, NavOutcome};
pub use render::{build_list, RenderedList, Row};
pub use transport::{StoreTransport, SuggestTransport, TransportError};
