//! # DTO Framework
//!
//! This crate turns persistence-layer records into plain, immutable value objects. Field
//! names are matched between the two sides, to-one and to-many relations are converted
//! recursively, and type graphs with cycles (a comment replying to comments, an author
//! with posts that point back at authors) are resolved through forward references.
//!
//! ## Architecture Overview
//!
//! The crate separates three roles:
//!
//! 1. **Source Layer** ([`SourceRecord`], [`RelatedCollection`]) - anything with named
//!    attributes, plus `fetch_all` for to-many relations
//! 2. **Schema Layer** ([`TypeDescriptor`], [`TypeExpr`], [`ValueType`]) - what the
//!    produced objects look like
//! 3. **Conversion Layer** ([`Converter`], [`ToDto`]) - the recursive walk between them
//!
//! The converter is written **once** against the two traits and works for any ORM
//! adapter and any set of value types.
//!
//! ## Quick Start
//!
//! ```rust
//! use dto_framework::mock::MockRecord;
//! use dto_framework::{value_type, Converter, ToDto, ValueType};
//!
//! value_type! {
//!     #[derive(Debug, PartialEq)]
//!     pub struct Author {
//!         pub id: i64,
//!         pub name: String,
//!         pub books: Vec<Book>,
//!     }
//! }
//!
//! value_type! {
//!     #[derive(Debug, PartialEq)]
//!     pub struct Book {
//!         pub title: String,
//!         pub in_print: bool = true,
//!     }
//! }
//!
//! let record = MockRecord::new("Author")
//!     .with("id", 7)
//!     .with("name", "Ursula")
//!     .with_related("books", [MockRecord::new("Book").with("title", "The Dispossessed")])
//!     .into_ref();
//!
//! // `Book` is named by `Author` before it exists, so it goes in the related types.
//! let author: Author = Converter::new().convert_to(&record, &[Book::target()]).unwrap();
//! assert_eq!(author.books[0].title, "The Dispossessed");
//! assert!(author.books[0].in_print);
//! ```
//!
//! ## Forward References
//!
//! Every call builds its own registry of named types from its target and its related
//! types, and drops it on return. Nothing leaks into the next call, and concurrent calls
//! never share one. Self-reference needs no extra argument because the target is always
//! registered.
//!
//! ## Errors
//!
//! Every detected problem aborts the call with a [`ConversionError`]; see the [`error`]
//! module for the full list.
//!
//! ## Testing
//!
//! The [`mock`] module provides in-memory records for exercising conversions without a
//! real store behind them.

pub mod converter;
pub mod error;
pub mod mock;
pub mod record;
pub mod registry;
pub mod schema;
pub mod tracing;
pub mod value;
pub mod value_type;

// Re-export core types for convenience
pub use converter::{convert, resolve_field_type, Converter, FieldShape, ToDto};
pub use error::ConversionError;
pub use record::{RecordRef, RelatedCollection, RelatedRef, SourceRecord};
pub use registry::TypeRegistry;
pub use schema::{FieldDefault, FieldDescriptor, ScalarType, TypeDescriptor, TypeExpr};
pub use value::{DataObject, FromValue, Value};
pub use value_type::{FieldType, ValueType};

#[doc(hidden)]
pub use paste;
