//! Terminal front end for the chipline autocomplete chip input.
//!
//! Everything here is presentational wiring around `chipline-core`: the core
//! decides what the suggestion list is, what commits, and which side the
//! panel opens on; this crate draws it and feeds events in.

pub mod app;
pub mod chip_input;
pub mod field;

pub use app::{App, RunOptions, run};
pub use chip_input::ChipInputComponent;
pub use field::FieldBuffer;
