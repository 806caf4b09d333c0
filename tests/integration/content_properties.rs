//! Facade behaviour against an in-memory content backend

use super::test_utils::{CountingRest, FakeBackend, StoredPost};
use proptest::prelude::*;
use quill::{CommentSubmission, ContentError, ContentFacade, Page};
use std::sync::Arc;

fn facade(backend: Arc<FakeBackend>, rest: Arc<CountingRest>) -> ContentFacade {
    ContentFacade::new(backend, rest, "https://cms.test")
}

fn seeded() -> (Arc<FakeBackend>, ContentFacade) {
    let backend = Arc::new(FakeBackend::seeded());
    let facade = facade(backend.clone(), Arc::new(CountingRest::new(201, "{}")));
    (backend, facade)
}

#[tokio::test]
async fn test_post_by_slug_returns_matching_slug_for_every_known_post() {
    let (backend, facade) = seeded();

    for slug in backend.slugs() {
        let post = facade.post_by_slug(&slug).await.unwrap().unwrap();
        assert_eq!(post.slug, slug);
        assert!(post.content.is_some());
        assert!(post.comments.is_some());
    }
}

#[tokio::test]
async fn test_post_by_slug_unknown_is_absent() {
    let (_, facade) = seeded();
    assert!(facade.post_by_slug("no-such-post").await.unwrap().is_none());
}

#[tokio::test]
async fn test_latest_posts_respects_page_size_and_order() {
    let (_, facade) = seeded();

    let posts = facade.latest_posts(Page::with_limit(5)).await.unwrap();

    assert!(posts.len() <= 5);
    assert_eq!(posts.len(), 5);
    let dates: Vec<_> = posts.iter().map(|p| p.published_at().unwrap()).collect();
    assert!(dates.windows(2).all(|w| w[0] >= w[1]));
    assert!(posts.iter().all(|p| p.content.is_none()));
}

#[tokio::test]
async fn test_latest_posts_offset_is_passed_through() {
    let (_, facade) = seeded();

    let first = facade.latest_posts(Page::new(3, 0)).await.unwrap();
    let second = facade.latest_posts(Page::new(3, 3)).await.unwrap();

    assert_eq!(first.len(), 3);
    assert_eq!(second.len(), 3);
    assert!(first.last().unwrap().date > second.first().unwrap().date);
    let beyond = facade.latest_posts(Page::new(3, 100)).await.unwrap();
    assert!(beyond.is_empty());
}

#[tokio::test]
async fn test_posts_by_category_only_returns_that_category() {
    let (_, facade) = seeded();

    for slug in ["news", "rust", "travel"] {
        let posts = facade
            .posts_by_category(slug, Page::default())
            .await
            .unwrap();
        assert!(!posts.is_empty());
        assert!(posts.iter().all(|p| p.in_category(slug)));
    }
}

#[tokio::test]
async fn test_search_with_no_match_is_empty_not_error() {
    let (_, facade) = seeded();

    assert!(facade.search_posts("zzz-nothing", None).await.unwrap().is_empty());
    assert!(facade.search_posts("", None).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_search_returns_excerpts_and_honours_limit() {
    let (_, facade) = seeded();

    let posts = facade.search_posts("travel", Some(2)).await.unwrap();

    assert_eq!(posts.len(), 2);
    assert!(posts.iter().all(|p| p.excerpt.is_some()));
}

#[tokio::test]
async fn test_category_listings() {
    let (_, facade) = seeded();

    let basic = facade.categories().await.unwrap();
    let extended = facade.all_categories().await.unwrap();
    assert_eq!(basic.len(), 3);
    assert!(basic.iter().all(|c| c.count.is_none()));
    assert_eq!(extended.iter().map(|c| c.count.unwrap()).sum::<u32>(), 12);

    let rust = facade.category_by_slug("rust").await.unwrap().unwrap();
    assert_eq!(rust.count, Some(4));
    assert!(facade.category_by_slug("cooking").await.unwrap().is_none());
}

#[tokio::test]
async fn test_submit_comment_created() {
    let backend = Arc::new(FakeBackend::seeded());
    let rest = Arc::new(CountingRest::new(201, r#"{"id": 501, "status": "hold"}"#));
    let facade = facade(backend, rest.clone());

    let ack = facade
        .submit_comment(&CommentSubmission::new("post-3", "Ada", "ada@example.com", "Hi"))
        .await
        .unwrap();

    assert_eq!(ack["id"], 501);
    assert_eq!(rest.calls(), 1);
    let sent = rest.last_body.lock().unwrap().clone().unwrap();
    assert_eq!(sent["post"], "post-3");
    assert_eq!(sent["author_name"], "Ada");
}

#[tokio::test]
async fn test_submit_comment_server_error_fails_once() {
    let backend = Arc::new(FakeBackend::seeded());
    let rest = Arc::new(CountingRest::new(500, "internal error"));
    let facade = facade(backend, rest.clone());

    let err = facade
        .submit_comment(&CommentSubmission::new("post-3", "Ada", "ada@example.com", "Hi"))
        .await
        .unwrap_err();

    assert!(matches!(err, ContentError::CommentRejected { status: 500 }));
    assert_eq!(rest.calls(), 1);
}

#[tokio::test]
async fn test_concurrent_calls_do_not_interfere() {
    let (backend, facade) = seeded();
    let facade = Arc::new(facade);

    let handles: Vec<_> = backend
        .slugs()
        .into_iter()
        .map(|slug| {
            let facade = Arc::clone(&facade);
            tokio::spawn(async move {
                let post = facade.post_by_slug(&slug).await.unwrap().unwrap();
                (slug, post.slug)
            })
        })
        .collect();

    for handle in handles {
        let (requested, returned) = handle.await.unwrap();
        assert_eq!(requested, returned);
    }
    assert_eq!(backend.request_count(), 12);
}

#[tokio::test]
async fn test_every_call_refetches() {
    let (backend, facade) = seeded();

    facade.categories().await.unwrap();
    facade.categories().await.unwrap();

    assert_eq!(backend.request_count(), 2);
}

proptest! {
    #[test]
    fn prop_latest_posts_never_exceeds_page_size(limit in 1u32..30, offset in 0u32..20) {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let (_, facade) = seeded();
        let posts = runtime.block_on(facade.latest_posts(Page::new(limit, offset))).unwrap();
        prop_assert!(posts.len() <= limit as usize);
        prop_assert_eq!(posts.len(), (12usize.saturating_sub(offset as usize)).min(limit as usize));
    }

    #[test]
    fn prop_unknown_slugs_are_absent(slug in "[a-z]{1,12}-missing") {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let backend = Arc::new(FakeBackend::new(vec![StoredPost::new(
            "p1",
            "hello-world",
            "2024-01-01T00:00:00",
            &["news"],
        )]));
        let facade = facade(backend, Arc::new(CountingRest::new(201, "{}")));
        let post = runtime.block_on(facade.post_by_slug(&slug)).unwrap();
        prop_assert!(post.is_none());
    }
}
