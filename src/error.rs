//! Error types for dom-distiller.
//!
//! The distillation core itself has no recoverable error surface; these are
//! raised by the layer that prepares its input.

/// Error type for distillation operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The parsed document has no element to start from.
    #[error("input doesn't have a valid element")]
    InvalidInput,

    /// The page URL given to the options builder could not be parsed.
    #[error("invalid page URL {0:?}: {1}")]
    InvalidUrl(String, url::ParseError),

    /// Reading the input failed.
    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for distillation operations.
pub type Result<T> = std::result::Result<T, Error>;
