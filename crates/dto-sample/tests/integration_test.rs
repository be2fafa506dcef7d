use dto_framework::{ConversionError, Converter, SourceRecord, ToDto, Value, ValueType};
use dto_sample::dto::{AuthorDto, CommentDto, PostDto, PostSummaryDto};
use dto_sample::error::SampleError;
use dto_sample::model::{AuthorRecord, CommentRecord, PostRecord};
use dto_sample::queries::{author_profile, comment_context, comment_thread, post_summary};
use dto_sample::store::{self, Store};

/// Full profile conversion through every relation kind of the demo store.
#[test]
fn test_author_profile_converts_whole_graph() {
    let store = store::demo();
    let profile = author_profile(&store, &Converter::new(), 1).expect("Failed to convert");

    assert_eq!(profile.id, 1);
    assert_eq!(profile.name, "Ada");
    assert_eq!(profile.email.as_deref(), Some("ada@example.com"));
    assert_eq!(profile.role, "author");

    let ids: Vec<i64> = profile.posts.iter().map(|p| p.id).collect();
    assert_eq!(ids, [10, 11]);

    let notes = &profile.posts[0];
    assert_eq!(notes.tags, ["history", "computing"]);
    assert!(notes.published);
    assert_eq!(notes.views, 0);

    let top: Vec<i64> = notes.comments.iter().map(|c| c.id).collect();
    assert_eq!(top, [100, 103]);

    // 100 -> 101 -> 102
    let thread = &notes.comments[0];
    assert_eq!(thread.replies[0].id, 101);
    assert_eq!(thread.replies[0].replies[0].id, 102);
    assert!(thread.replies[0].replies[0].replies.is_empty());

    assert!(!profile.posts[1].published);
    assert!(profile.posts[1].comments.is_empty());
}

#[test]
fn test_author_without_email_or_comments() {
    let store = store::demo();
    let profile = author_profile(&store, &Converter::new(), 2).expect("Failed to convert");

    assert_eq!(profile.email, None);
    assert_eq!(profile.posts.len(), 1);
    assert!(profile.posts[0].tags.is_empty());
}

#[test]
fn test_unknown_author_is_not_found() {
    let err = author_profile(&store::demo(), &Converter::new(), 99).unwrap_err();
    assert_eq!(err, SampleError::NotFound("author 99".to_string()));
    assert_eq!(err.to_string(), "Not found: author 99");
}

#[test]
fn test_post_summary_follows_single_relation() {
    let summary = post_summary(&store::demo(), &Converter::new(), 20).expect("Failed to convert");

    assert_eq!(summary.title, "Hello");
    assert_eq!(summary.author.id, 2);
    assert_eq!(summary.author.name, "Brian");
}

#[test]
fn test_comment_thread_needs_no_related_types() {
    let thread = comment_thread(&store::demo(), &Converter::new(), 101).expect("Failed to convert");

    assert_eq!(thread.body, "Agreed!");
    assert_eq!(thread.replies.len(), 1);
    assert_eq!(thread.replies[0].body, "Same here.");
}

#[test]
fn test_missing_related_type_is_reported() {
    let store = store::demo();
    let record = AuthorRecord::load(&store, 1).unwrap().into_ref();

    // CommentDto is reachable through PostDto but not registered.
    let err = Converter::new()
        .convert_to::<AuthorDto>(&record, &[PostDto::target()])
        .unwrap_err();
    assert_eq!(
        err,
        ConversionError::UnresolvedReference {
            name: "CommentDto".to_string()
        }
    );

    let err = SampleError::from(err);
    assert!(err.to_string().contains("'CommentDto'"));
}

#[test]
fn test_missing_attribute_names_the_record() {
    let store = store::demo();
    let record = PostRecord::load(&store, 10).unwrap().into_ref();

    // Posts have no `body` attribute.
    let err = Converter::new()
        .convert_to::<CommentDto>(&record, &[])
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Field name 'body' doesn't exist in <Post: 10>"
    );
}

#[test]
fn test_dynamic_conversion_matches_typed_conversion() {
    let store = store::demo();
    let converter = Converter::new();
    let record = PostRecord::load(&store, 20).unwrap().into_ref();

    let object = converter
        .to_dto(
            &Value::Record(record.clone()),
            &PostSummaryDto::target(),
            &[dto_sample::dto::AuthorSummaryDto::target()],
        )
        .unwrap();
    let typed = PostSummaryDto::from_object(&object).unwrap();

    assert_eq!(
        typed,
        converter
            .convert_to::<PostSummaryDto>(&record, &[dto_sample::dto::AuthorSummaryDto::target()])
            .unwrap()
    );
}

#[test]
fn test_comment_parent_relation() {
    let store = store::demo();
    let reply = CommentRecord::load(&store, 101).unwrap();
    let top = CommentRecord::load(&store, 100).unwrap();

    match reply.attribute("parent") {
        Some(Value::Record(parent)) => assert_eq!(parent.describe(), "<Comment: 100>"),
        other => panic!("unexpected parent {other:?}"),
    }
    assert_eq!(top.attribute("parent"), Some(Value::Null));
}

#[test]
fn test_comment_context_follows_optional_parent_chain() {
    let context = comment_context(&store::demo(), &Converter::new(), 102).expect("Failed to convert");

    assert_eq!(context.body, "Same here.");
    let parent = context.parent.as_deref().expect("reply should have a parent");
    assert_eq!(parent.id, 101);
    let grandparent = parent.parent.as_deref().expect("reply should have a parent");
    assert_eq!(grandparent.id, 100);
    assert_eq!(grandparent.parent, None);
}

#[test]
fn test_comment_context_of_top_level_comment() {
    let context = comment_context(&store::demo(), &Converter::new(), 103).expect("Failed to convert");
    assert_eq!(context.parent, None);

    let json = serde_json::to_value(&context).unwrap();
    assert_eq!(
        json,
        serde_json::json!({ "id": 103, "body": "Where can I read more?", "parent": null })
    );
}

#[test]
fn test_profile_serializes_to_json() {
    let store = Store::builder()
        .author(7, "Grace", None)
        .post(70, 7, "COBOL", &["lang"], true)
        .build();
    let profile = author_profile(&store, &Converter::new(), 7).unwrap();

    let json = serde_json::to_value(&profile).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "id": 7,
            "name": "Grace",
            "email": null,
            "posts": [{
                "id": 70,
                "title": "COBOL",
                "tags": ["lang"],
                "published": true,
                "comments": [],
                "views": 0
            }],
            "role": "author"
        })
    );
}
