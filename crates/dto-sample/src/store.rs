//! # In-Memory Blog Store
//!
//! A tiny stand-in for a database: three tables (authors, posts, comments) filled
//! through a [`StoreBuilder`] and frozen into a cheaply clonable [`Store`]. Records in
//! [`crate::model`] keep a `Store` handle and query it lazily, the way ORM relation
//! managers do.

use std::sync::Arc;

/// A row of the `authors` table.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthorRow {
    pub id: i64,
    pub name: String,
    pub email: Option<String>,
}

/// A row of the `posts` table.
#[derive(Debug, Clone, PartialEq)]
pub struct PostRow {
    pub id: i64,
    pub author_id: i64,
    pub title: String,
    pub tags: Vec<String>,
    pub published: bool,
}

/// A row of the `comments` table. `parent_id` threads replies.
#[derive(Debug, Clone, PartialEq)]
pub struct CommentRow {
    pub id: i64,
    pub post_id: i64,
    pub parent_id: Option<i64>,
    pub body: String,
}

#[derive(Debug, Default)]
struct Tables {
    authors: Vec<AuthorRow>,
    posts: Vec<PostRow>,
    comments: Vec<CommentRow>,
}

/// Collects rows before the store is frozen.
#[derive(Debug, Default)]
pub struct StoreBuilder {
    tables: Tables,
}

impl StoreBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn author(mut self, id: i64, name: impl Into<String>, email: Option<&str>) -> Self {
        self.tables.authors.push(AuthorRow {
            id,
            name: name.into(),
            email: email.map(str::to_string),
        });
        self
    }

    pub fn post(
        mut self,
        id: i64,
        author_id: i64,
        title: impl Into<String>,
        tags: &[&str],
        published: bool,
    ) -> Self {
        self.tables.posts.push(PostRow {
            id,
            author_id,
            title: title.into(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            published,
        });
        self
    }

    pub fn comment(
        mut self,
        id: i64,
        post_id: i64,
        parent_id: Option<i64>,
        body: impl Into<String>,
    ) -> Self {
        self.tables.comments.push(CommentRow {
            id,
            post_id,
            parent_id,
            body: body.into(),
        });
        self
    }

    pub fn build(self) -> Store {
        Store {
            tables: Arc::new(self.tables),
        }
    }
}

/// Read-only handle to the frozen tables. Clones share the same data.
#[derive(Debug, Clone)]
pub struct Store {
    tables: Arc<Tables>,
}

impl Store {
    pub fn builder() -> StoreBuilder {
        StoreBuilder::new()
    }

    pub fn author(&self, id: i64) -> Option<&AuthorRow> {
        self.tables.authors.iter().find(|a| a.id == id)
    }

    pub fn post(&self, id: i64) -> Option<&PostRow> {
        self.tables.posts.iter().find(|p| p.id == id)
    }

    pub fn comment(&self, id: i64) -> Option<&CommentRow> {
        self.tables.comments.iter().find(|c| c.id == id)
    }

    /// Posts of one author, in insertion order.
    pub fn posts_by(&self, author_id: i64) -> impl Iterator<Item = &PostRow> {
        self.tables
            .posts
            .iter()
            .filter(move |p| p.author_id == author_id)
    }

    /// Top-level comments of a post (replies excluded).
    pub fn comments_on(&self, post_id: i64) -> impl Iterator<Item = &CommentRow> {
        self.tables
            .comments
            .iter()
            .filter(move |c| c.post_id == post_id && c.parent_id.is_none())
    }

    /// Direct replies to a comment.
    pub fn replies_to(&self, comment_id: i64) -> impl Iterator<Item = &CommentRow> {
        self.tables
            .comments
            .iter()
            .filter(move |c| c.parent_id == Some(comment_id))
    }
}

/// The data the demo binary runs on.
pub fn demo() -> Store {
    Store::builder()
        .author(1, "Ada", Some("ada@example.com"))
        .author(2, "Brian", None)
        .post(10, 1, "Notes on the Analytical Engine", &["history", "computing"], true)
        .post(11, 1, "Draft: Bernoulli numbers", &["math"], false)
        .post(20, 2, "Hello", &[], true)
        .comment(100, 10, None, "Fascinating.")
        .comment(101, 10, Some(100), "Agreed!")
        .comment(102, 10, Some(101), "Same here.")
        .comment(103, 10, None, "Where can I read more?")
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relation_queries_filter_rows() {
        let store = demo();
        let titles: Vec<&str> = store.posts_by(1).map(|p| p.title.as_str()).collect();
        assert_eq!(
            titles,
            ["Notes on the Analytical Engine", "Draft: Bernoulli numbers"]
        );

        let top: Vec<i64> = store.comments_on(10).map(|c| c.id).collect();
        assert_eq!(top, [100, 103]);

        let replies: Vec<i64> = store.replies_to(100).map(|c| c.id).collect();
        assert_eq!(replies, [101]);
    }
}
