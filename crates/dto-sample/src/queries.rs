//! # Read-Model Queries
//!
//! Each query loads one root row, wraps it as a record and converts it into a read
//! model. The related types passed to the converter are every value type reachable
//! from the target other than the target itself.

use crate::dto::{AuthorDto, AuthorSummaryDto, CommentDto, CommentRefDto, PostDto, PostSummaryDto};
use crate::error::SampleError;
use crate::model::{AuthorRecord, CommentRecord, PostRecord};
use crate::store::Store;
use dto_framework::{ToDto, ValueType};
use tracing::{debug, instrument};

/// An author with all posts and their comment threads.
#[instrument(skip(store, converter))]
pub fn author_profile(
    store: &Store,
    converter: &impl ToDto,
    author_id: i64,
) -> Result<AuthorDto, SampleError> {
    let record = AuthorRecord::load(store, author_id)
        .ok_or_else(|| SampleError::NotFound(format!("author {author_id}")))?;
    let profile = converter.convert_to::<AuthorDto>(
        &record.into_ref(),
        &[PostDto::target(), CommentDto::target()],
    )?;
    debug!(posts = profile.posts.len(), "author profile built");
    Ok(profile)
}

/// A post with a short view of its author.
#[instrument(skip(store, converter))]
pub fn post_summary(
    store: &Store,
    converter: &impl ToDto,
    post_id: i64,
) -> Result<PostSummaryDto, SampleError> {
    let record = PostRecord::load(store, post_id)
        .ok_or_else(|| SampleError::NotFound(format!("post {post_id}")))?;
    Ok(converter.convert_to::<PostSummaryDto>(&record.into_ref(), &[AuthorSummaryDto::target()])?)
}

/// A comment and all replies below it.
#[instrument(skip(store, converter))]
pub fn comment_thread(
    store: &Store,
    converter: &impl ToDto,
    comment_id: i64,
) -> Result<CommentDto, SampleError> {
    let record = CommentRecord::load(store, comment_id)
        .ok_or_else(|| SampleError::NotFound(format!("comment {comment_id}")))?;
    Ok(converter.convert_to::<CommentDto>(&record.into_ref(), &[])?)
}

/// A comment and every comment above it, up to the top of the thread.
#[instrument(skip(store, converter))]
pub fn comment_context(
    store: &Store,
    converter: &impl ToDto,
    comment_id: i64,
) -> Result<CommentRefDto, SampleError> {
    let record = CommentRecord::load(store, comment_id)
        .ok_or_else(|| SampleError::NotFound(format!("comment {comment_id}")))?;
    Ok(converter.convert_to::<CommentRefDto>(&record.into_ref(), &[])?)
}
