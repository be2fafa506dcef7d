use crate::model::{AuthorRecord, Query, RelatedSet};
use crate::store::{PostRow, Store};
use dto_framework::{RecordRef, SourceRecord, Value};
use std::sync::Arc;

/// A `posts` row seen as a record.
///
/// Attributes: `id`, `title`, `tags`, `published`, `author` (to-one) and
/// `comments` (to-many, top-level comments only).
#[derive(Debug, Clone)]
pub struct PostRecord {
    store: Store,
    row: PostRow,
}

impl PostRecord {
    pub fn load(store: &Store, id: i64) -> Option<Self> {
        store.post(id).map(|row| Self::from_row(store, row.clone()))
    }

    pub(crate) fn from_row(store: &Store, row: PostRow) -> Self {
        Self {
            store: store.clone(),
            row,
        }
    }

    pub fn into_ref(self) -> RecordRef {
        Arc::new(self)
    }
}

impl SourceRecord for PostRecord {
    fn model_name(&self) -> &str {
        "Post"
    }

    fn attribute(&self, name: &str) -> Option<Value> {
        let value = match name {
            "id" => self.row.id.into(),
            "title" => self.row.title.as_str().into(),
            "tags" => self.row.tags.clone().into(),
            "published" => self.row.published.into(),
            // A dangling foreign key reads as an empty relation.
            "author" => AuthorRecord::load(&self.store, self.row.author_id)
                .map(AuthorRecord::into_ref)
                .into(),
            "comments" => RelatedSet::new(&self.store, Query::CommentsOn(self.row.id)).into(),
            _ => return None,
        };
        Some(value)
    }

    fn describe(&self) -> String {
        format!("<Post: {}>", self.row.id)
    }
}
