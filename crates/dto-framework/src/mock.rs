//! # Mock Records & Testing Guide
//!
//! [`MockRecord`] and [`MockRelated`] stand in for real persistence-layer records in
//! tests. They implement the same [`SourceRecord`] / [`RelatedCollection`] contracts as
//! production records but hold their attributes in memory, so conversions can be tested
//! without any store behind them.
//!
//! ## When to use Mocks vs a Real Store
//!
//! | Feature | MockRecord | Real records |
//! |---------|------------|--------------|
//! | **Setup** | One builder chain | Seed a store |
//! | **Shape** | Any attributes you like | Whatever the models expose |
//! | **Error Injection** | Easy (omit or mistype an attribute) | Needs a broken model |
//! | **Use Case** | Testing the conversion rules | Testing read models end to end |
//!
//! ## Example
//!
//! ```rust
//! use dto_framework::mock::MockRecord;
//! use dto_framework::{convert, FieldDescriptor, TypeDescriptor, TypeExpr, Value};
//!
//! let tree = TypeExpr::value(
//!     TypeDescriptor::new("Tree")
//!         .field(FieldDescriptor::new("id", TypeExpr::int()))
//!         .field(FieldDescriptor::new("children", TypeExpr::list(TypeExpr::forward("Tree")))),
//! );
//!
//! let leaf = || MockRecord::new("Tree").with("id", 2).with_related("children", []);
//! let root = MockRecord::new("Tree")
//!     .with("id", 1)
//!     .with_related("children", [leaf(), leaf()]);
//!
//! let object = convert(&root.into(), &tree, &[]).unwrap();
//! match object.get("children") {
//!     Some(Value::List(children)) => assert_eq!(children.len(), 2),
//!     other => panic!("unexpected {other:?}"),
//! }
//! ```
//!
//! ## Verifying Fetches
//!
//! Keep a handle on a [`MockRelated`] (via [`MockRecord::with_collection`]) to check how
//! often the converter loaded it with [`MockRelated::fetch_count`].

use crate::record::{RecordRef, RelatedCollection, RelatedRef, SourceRecord};
use crate::value::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// An in-memory record with a fixed set of attributes.
#[derive(Debug, Clone)]
pub struct MockRecord {
    model: String,
    attributes: Vec<(String, Value)>,
}

impl MockRecord {
    /// Creates a record of `model` with no attributes.
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            attributes: Vec::new(),
        }
    }

    /// Sets an attribute, replacing any earlier value of the same name.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((name, value)),
        }
        self
    }

    /// Sets an attribute that exists but holds nothing.
    pub fn with_null(self, name: impl Into<String>) -> Self {
        self.with(name, Value::Null)
    }

    /// Sets a single-record relation.
    pub fn with_record(self, name: impl Into<String>, record: MockRecord) -> Self {
        self.with(name, record.into_ref())
    }

    /// Sets a to-many relation holding `records` in order.
    pub fn with_related(
        self,
        name: impl Into<String>,
        records: impl IntoIterator<Item = MockRecord>,
    ) -> Self {
        self.with_collection(name, Arc::new(MockRelated::new(records)))
    }

    /// Sets a to-many relation the caller keeps a handle on.
    pub fn with_collection(self, name: impl Into<String>, related: Arc<MockRelated>) -> Self {
        let related: RelatedRef = related;
        self.with(name, related)
    }

    pub fn into_ref(self) -> RecordRef {
        Arc::new(self)
    }
}

impl SourceRecord for MockRecord {
    fn model_name(&self) -> &str {
        &self.model
    }

    fn attribute(&self, name: &str) -> Option<Value> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, value)| value.clone())
    }

    fn describe(&self) -> String {
        let names: Vec<&str> = self.attributes.iter().map(|(n, _)| n.as_str()).collect();
        format!("<Mock {} [{}]>", self.model, names.join(", "))
    }
}

impl From<MockRecord> for Value {
    fn from(record: MockRecord) -> Self {
        Value::Record(record.into_ref())
    }
}

/// An in-memory to-many relation.
#[derive(Debug, Default)]
pub struct MockRelated {
    records: Vec<RecordRef>,
    fetches: AtomicUsize,
}

impl MockRelated {
    pub fn new(records: impl IntoIterator<Item = MockRecord>) -> Self {
        Self {
            records: records.into_iter().map(MockRecord::into_ref).collect(),
            fetches: AtomicUsize::new(0),
        }
    }

    /// How many times `fetch_all` has been called.
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

impl RelatedCollection for MockRelated {
    fn fetch_all(&self) -> Vec<RecordRef> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.records.clone()
    }

    fn describe(&self) -> String {
        format!("<MockRelated of {}>", self.records.len())
    }
}
