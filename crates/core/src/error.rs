use thiserror::Error;

/// Errors surfaced by chipline core operations.
///
/// All of these are programmer-misuse conditions; well-behaved embedders
/// never see them. Malformed user text is not an error anywhere in the core.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChiplineError {
    /// Index-based access outside the current bounds of a collection.
    #[error("index {index} out of range for length {len}")]
    OutOfRange { index: usize, len: usize },
}
