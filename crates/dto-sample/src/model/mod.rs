//! Record adapters that expose [`Store`](crate::store::Store) rows to the converter.
//!
//! Each record implements [`SourceRecord`](dto_framework::SourceRecord). To-one relations
//! come back as [`Value::Record`](dto_framework::Value::Record); to-many relations as a
//! lazy [`RelatedSet`] that only touches the store when the converter calls `fetch_all`.

pub mod author;
pub mod comment;
pub mod post;
pub mod related;

pub use author::*;
pub use comment::*;
pub use post::*;
pub use related::*;
