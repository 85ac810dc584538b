//! Error types for payload building

use thiserror::Error;

/// Errors raised while setting up the payload builder
///
/// Building itself is infallible for any IR.
#[derive(Error, Debug)]
pub enum PayloadError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
