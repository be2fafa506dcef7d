use crate::model::{Query, RelatedSet};
use crate::store::{AuthorRow, Store};
use dto_framework::{RecordRef, SourceRecord, Value};
use std::sync::Arc;

/// An `authors` row seen as a record.
///
/// Attributes: `id`, `name`, `email`, `posts` (to-many).
#[derive(Debug, Clone)]
pub struct AuthorRecord {
    store: Store,
    row: AuthorRow,
}

impl AuthorRecord {
    /// Loads the author with `id`, if any.
    pub fn load(store: &Store, id: i64) -> Option<Self> {
        store.author(id).map(|row| Self {
            store: store.clone(),
            row: row.clone(),
        })
    }

    pub fn into_ref(self) -> RecordRef {
        Arc::new(self)
    }
}

impl SourceRecord for AuthorRecord {
    fn model_name(&self) -> &str {
        "Author"
    }

    fn attribute(&self, name: &str) -> Option<Value> {
        let value = match name {
            "id" => self.row.id.into(),
            "name" => self.row.name.as_str().into(),
            "email" => self.row.email.clone().into(),
            "posts" => RelatedSet::new(&self.store, Query::PostsBy(self.row.id)).into(),
            _ => return None,
        };
        Some(value)
    }

    fn describe(&self) -> String {
        format!("<Author: {}>", self.row.id)
    }
}
