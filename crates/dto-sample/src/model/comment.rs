use crate::model::{Query, RelatedSet};
use crate::store::{CommentRow, Store};
use dto_framework::{RecordRef, SourceRecord, Value};
use std::sync::Arc;

/// A `comments` row seen as a record.
///
/// Attributes: `id`, `body`, `parent` (to-one, empty for top-level comments) and
/// `replies` (to-many).
#[derive(Debug, Clone)]
pub struct CommentRecord {
    store: Store,
    row: CommentRow,
}

impl CommentRecord {
    pub fn load(store: &Store, id: i64) -> Option<Self> {
        store.comment(id).map(|row| Self::from_row(store, row.clone()))
    }

    pub(crate) fn from_row(store: &Store, row: CommentRow) -> Self {
        Self {
            store: store.clone(),
            row,
        }
    }

    pub fn into_ref(self) -> RecordRef {
        Arc::new(self)
    }
}

impl SourceRecord for CommentRecord {
    fn model_name(&self) -> &str {
        "Comment"
    }

    fn attribute(&self, name: &str) -> Option<Value> {
        let value = match name {
            "id" => self.row.id.into(),
            "body" => self.row.body.as_str().into(),
            "parent" => self
                .row
                .parent_id
                .and_then(|id| CommentRecord::load(&self.store, id))
                .map(CommentRecord::into_ref)
                .into(),
            "replies" => RelatedSet::new(&self.store, Query::RepliesTo(self.row.id)).into(),
            _ => return None,
        };
        Some(value)
    }

    fn describe(&self) -> String {
        format!("<Comment: {}>", self.row.id)
    }
}
