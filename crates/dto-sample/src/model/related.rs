use crate::model::{CommentRecord, PostRecord};
use crate::store::Store;
use dto_framework::{RecordRef, RelatedCollection, RelatedRef, Value};
use std::sync::Arc;
use tracing::debug;

/// Which rows a [`RelatedSet`] stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Query {
    PostsBy(i64),
    CommentsOn(i64),
    RepliesTo(i64),
}

/// A lazy to-many relation. Nothing is read from the store until `fetch_all`.
#[derive(Debug, Clone)]
pub struct RelatedSet {
    store: Store,
    query: Query,
}

impl RelatedSet {
    pub fn new(store: &Store, query: Query) -> Self {
        Self {
            store: store.clone(),
            query,
        }
    }
}

impl RelatedCollection for RelatedSet {
    fn fetch_all(&self) -> Vec<RecordRef> {
        let records: Vec<RecordRef> = match self.query {
            Query::PostsBy(author_id) => self
                .store
                .posts_by(author_id)
                .map(|row| PostRecord::from_row(&self.store, row.clone()).into_ref())
                .collect(),
            Query::CommentsOn(post_id) => self
                .store
                .comments_on(post_id)
                .map(|row| CommentRecord::from_row(&self.store, row.clone()).into_ref())
                .collect(),
            Query::RepliesTo(comment_id) => self
                .store
                .replies_to(comment_id)
                .map(|row| CommentRecord::from_row(&self.store, row.clone()).into_ref())
                .collect(),
        };
        debug!(query = ?self.query, count = records.len(), "fetch_all");
        records
    }

    fn describe(&self) -> String {
        format!("<RelatedSet {:?}>", self.query)
    }
}

impl From<RelatedSet> for Value {
    fn from(set: RelatedSet) -> Self {
        let related: RelatedRef = Arc::new(set);
        Value::Related(related)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::demo;

    #[test]
    fn test_fetch_all_returns_records_in_store_order() {
        let store = demo();
        let set = RelatedSet::new(&store, Query::RepliesTo(100));

        let records = set.fetch_all();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].describe(), "<Comment: 101>");
        assert_eq!(set.describe(), "<RelatedSet RepliesTo(100)>");
    }

    #[test]
    fn test_empty_relation_fetches_nothing() {
        let set = RelatedSet::new(&demo(), Query::PostsBy(99));
        assert!(set.fetch_all().is_empty());
    }
}
