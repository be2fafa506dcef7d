//! Error types for the sample read-model queries.

use dto_framework::ConversionError;
use thiserror::Error;

/// Errors that can occur while building a read model.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SampleError {
    /// The requested row does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The record could not be converted into the read model.
    #[error("Conversion failed: {0}")]
    Conversion(#[from] ConversionError),
}
