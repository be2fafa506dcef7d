//! # Conversion Errors
//!
//! Every invariant violation detected while converting a record graph aborts the whole
//! top-level call with a [`ConversionError`]. Nothing is recovered internally and no
//! partial result is returned.

use crate::value::Value;

/// Errors raised by the converter and by typed extraction from result objects.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConversionError {
    /// The conversion target is not a value type (or is a malformed one).
    #[error("The target should be a value type, not {found}")]
    InvalidTarget { found: String },

    /// An entry of the related-types list is not a value type.
    #[error("Related types should all be value types. Received {found} at position {index}")]
    InvalidRelated { index: usize, found: String },

    /// The source is not a record.
    #[error("Source must be a record. Instead, received '{found}'")]
    NotARecord { found: String },

    /// A declared field has neither a matching attribute nor a default.
    #[error("Field name '{field}' doesn't exist in {record}")]
    MissingField { field: String, record: String },

    /// A list-of-value-type field is backed by something that cannot `fetch_all`.
    #[error("The {value} is not a related collection, but the declared type is List[{element}]")]
    NotACollection { value: String, element: String },

    /// A forward name that none of the registered types carries.
    #[error("Forward reference '{name}' is not registered; pass it among the related types")]
    UnresolvedReference { name: String },

    /// A value could not be extracted as the requested Rust type.
    #[error("expected {expected}, found {found}")]
    Mismatch { expected: String, found: String },

    /// One field of a value type could not be filled or extracted.
    #[error("field '{field}' of `{type_name}`: {source}")]
    InvalidField {
        type_name: String,
        field: String,
        #[source]
        source: Box<ConversionError>,
    },
}

impl ConversionError {
    pub fn mismatch(expected: impl Into<String>, found: &Value) -> Self {
        Self::Mismatch {
            expected: expected.into(),
            found: found.kind(),
        }
    }
}
