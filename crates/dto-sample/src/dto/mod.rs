//! Read models produced from store records.
//!
//! Fields are matched to record attributes by name. Fields with a default are ones
//! the records do not carry, so every conversion fills them from the default.

use dto_framework::value_type;
use serde::Serialize;

value_type! {
    /// Full author profile with every post and its comment threads.
    #[derive(Debug, Clone, PartialEq, Serialize)]
    pub struct AuthorDto {
        pub id: i64,
        pub name: String,
        pub email: Option<String>,
        pub posts: Vec<PostDto>,
        pub role: String = "author",
    }
}

value_type! {
    #[derive(Debug, Clone, PartialEq, Serialize)]
    pub struct PostDto {
        pub id: i64,
        pub title: String,
        pub tags: Vec<String>,
        pub published: bool,
        pub comments: Vec<CommentDto>,
        pub views: i64 = 0,
    }
}

value_type! {
    /// A comment and its replies, to any depth.
    #[derive(Debug, Clone, PartialEq, Serialize)]
    pub struct CommentDto {
        pub id: i64,
        pub body: String,
        pub replies: Vec<CommentDto>,
    }
}

value_type! {
    /// A post with only the author's name attached.
    #[derive(Debug, Clone, PartialEq, Serialize)]
    pub struct PostSummaryDto {
        pub id: i64,
        pub title: String,
        pub author: AuthorSummaryDto,
    }
}

value_type! {
    #[derive(Debug, Clone, PartialEq, Serialize)]
    pub struct AuthorSummaryDto {
        pub id: i64,
        pub name: String,
    }
}

value_type! {
    /// A comment with the chain of comments it replies to.
    #[derive(Debug, Clone, PartialEq, Serialize)]
    pub struct CommentRefDto {
        pub id: i64,
        pub body: String,
        pub parent: Option<Box<CommentRefDto>>,
    }
}
