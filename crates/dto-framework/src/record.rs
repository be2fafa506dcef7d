//! # Source Records
//!
//! The converter never looks inside the persistence layer. All it needs from a record
//! is named-attribute access, and from a to-many relation an ordered `fetch_all`.
//!
//! # Architecture Note
//! Both roles are traits so that any record type (an ORM row wrapper, a test double,
//! a hand-written adapter) can be converted by the same generic routine. Records are
//! shared behind `Arc` because a related collection hands out records it owns.

use crate::value::Value;
use std::fmt::Debug;
use std::sync::Arc;

/// Shared handle to a record.
pub type RecordRef = Arc<dyn SourceRecord>;

/// Shared handle to a to-many relation.
pub type RelatedRef = Arc<dyn RelatedCollection>;

/// A record whose attributes can be read by name.
pub trait SourceRecord: Debug + Send + Sync {
    /// Name of the model the record belongs to (e.g. `"Author"`).
    fn model_name(&self) -> &str;

    /// Reads one attribute.
    ///
    /// `None` means the record has no such attribute. An attribute that exists but holds
    /// nothing is `Some(Value::Null)`.
    fn attribute(&self, name: &str) -> Option<Value>;

    /// Human-readable description used in error messages.
    fn describe(&self) -> String {
        format!("<{} record>", self.model_name())
    }
}

/// A to-many relation that can load its members.
pub trait RelatedCollection: Debug + Send + Sync {
    /// Loads every related record, in source order.
    ///
    /// Implementations may do lazy I/O here; the converter calls it at most once per field.
    fn fetch_all(&self) -> Vec<RecordRef>;

    /// Human-readable description used in error messages.
    fn describe(&self) -> String {
        "<related collection>".to_string()
    }
}
