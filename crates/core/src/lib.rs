//! Chipline core: the autocomplete chip input state machine.
//!
//! The only type embedders talk to is [`AutocompleteController`]. It composes
//! the committed-value store, the suggestion engine, the selection cursor,
//! the input commit policy, and the panel placement function into one
//! synchronous unit: every entry point runs to completion inside the calling
//! event handler and returns the effects the embedder should perform.
//!
//! Nothing in this crate renders, measures layout, or registers platform
//! listeners; geometry arrives as snapshots and key events arrive already
//! classified (see `chipline-types`).

pub mod config;
pub mod controller;
pub mod cursor;
pub mod error;
pub mod placement;
pub mod policy;
pub mod store;
pub mod suggest;

pub use config::AutocompleteConfig;
pub use controller::AutocompleteController;
pub use cursor::SelectionCursor;
pub use error::ChiplineError;
pub use placement::{PANEL_EDGE_MARGIN, decide};
pub use store::{ListenerId, ValueStore};
pub use suggest::{SuggestionEngine, default_matcher};
