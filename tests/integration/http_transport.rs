//! Integration tests for the reqwest transports against a mock HTTP server

use quill::config::QuillConfig;
use quill::query::{GraphqlRequest, LatestPosts, LatestPostsVariables};
use quill::transport::{GraphqlTransport, HttpGraphqlTransport, HttpRestTransport, RestTransport};
use quill::{CommentSubmission, ContentError, ContentFacade, Page};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn facade_for(server: &MockServer) -> ContentFacade {
    ContentFacade::from_config(&QuillConfig::with_site_url(server.uri())).unwrap()
}

fn latest_posts_request() -> GraphqlRequest {
    GraphqlRequest::for_operation::<LatestPosts>(&LatestPostsVariables { first: 2, after: 0 })
        .unwrap()
}

#[tokio::test]
async fn test_graphql_transport_posts_document_and_returns_data() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(header("content-type", "application/json"))
        .and(body_partial_json(json!({
            "operationName": "GetLatestPosts",
            "variables": { "first": 2, "after": 0 }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "posts": { "nodes": [] } }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let transport = HttpGraphqlTransport::new(format!("{}/graphql", server.uri())).unwrap();
    let data = transport.execute(&latest_posts_request()).await.unwrap();

    assert_eq!(data, json!({ "posts": { "nodes": [] } }));
}

#[tokio::test]
async fn test_graphql_transport_http_status_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .expect(1)
        .mount(&server)
        .await;

    let transport = HttpGraphqlTransport::new(format!("{}/graphql", server.uri())).unwrap();
    let err = transport.execute(&latest_posts_request()).await.unwrap_err();

    match err {
        ContentError::HttpStatus { status, body } => {
            assert_eq!(status, 503);
            assert_eq!(body, "maintenance");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_graphql_transport_errors_without_data() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": null,
            "errors": [{ "message": "Cannot query field \"colour\"" }]
        })))
        .mount(&server)
        .await;

    let transport = HttpGraphqlTransport::new(format!("{}/graphql", server.uri())).unwrap();
    let err = transport.execute(&latest_posts_request()).await.unwrap_err();

    match err {
        ContentError::Graphql { messages } => {
            assert_eq!(messages, vec!["Cannot query field \"colour\"".to_string()]);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_graphql_transport_partial_data_is_returned() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "post": null },
            "errors": [{ "message": "Internal server error", "path": ["post"] }]
        })))
        .mount(&server)
        .await;

    let facade = facade_for(&server);
    let post = facade.post_by_slug("broken").await.unwrap();

    assert!(post.is_none());
}

#[tokio::test]
async fn test_graphql_transport_malformed_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let facade = facade_for(&server);
    let err = facade.categories().await.unwrap_err();

    assert!(matches!(err, ContentError::Decode(_)));
}

#[tokio::test]
async fn test_facade_latest_posts_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_partial_json(json!({
            "operationName": "GetLatestPosts",
            "variables": { "first": 1, "after": 4 }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "posts": { "nodes": [{
                "id": "cG9zdDo1",
                "title": "Fifth",
                "slug": "fifth",
                "date": "2024-05-05T05:05:05",
                "featuredImage": { "node": { "sourceUrl": "https://cdn.test/5.jpg", "altText": "" } },
                "author": { "node": { "name": "Ada", "avatar": { "url": "https://cdn.test/ada.png" } } },
                "categories": { "nodes": [{ "name": "News", "slug": "news" }] }
            }] } }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let facade = facade_for(&server);
    let posts = facade.latest_posts(Page::new(1, 4)).await.unwrap();

    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].slug, "fifth");
    assert_eq!(posts[0].featured_image_url(), Some("https://cdn.test/5.jpg"));
}

#[tokio::test]
async fn test_submit_comment_created_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/wp-json/wp/v2/comments"))
        .and(body_partial_json(json!({
            "post": "42",
            "author_name": "Ada",
            "author_email": "ada@example.com",
            "content": "Lovely"
        })))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({ "id": 900, "status": "hold" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let facade = facade_for(&server);
    let ack = facade
        .submit_comment(&CommentSubmission::new("42", "Ada", "ada@example.com", "Lovely"))
        .await
        .unwrap();

    assert_eq!(ack, json!({ "id": 900, "status": "hold" }));
}

#[tokio::test]
async fn test_submit_comment_server_error_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/wp-json/wp/v2/comments"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "code": "rest_comment_failed",
            "message": "Database error"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let facade = facade_for(&server);
    let err = facade
        .submit_comment(&CommentSubmission::new("42", "Ada", "ada@example.com", "Lovely"))
        .await
        .unwrap_err();

    assert!(matches!(err, ContentError::CommentRejected { status: 500 }));
}

#[tokio::test]
async fn test_rest_transport_returns_raw_status_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/echo"))
        .respond_with(ResponseTemplate::new(409).set_body_string("duplicate"))
        .mount(&server)
        .await;

    let transport = HttpRestTransport::new().unwrap();
    let reply = transport
        .post_json(&format!("{}/echo", server.uri()), &json!({ "a": 1 }))
        .await
        .unwrap();

    assert_eq!(reply.status, 409);
    assert_eq!(reply.body, b"duplicate".to_vec());
    assert!(!reply.is_success());
}

#[tokio::test]
async fn test_connection_failure_surfaces_as_http_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let transport =
        HttpGraphqlTransport::new(format!("http://127.0.0.1:{}/graphql", port)).unwrap();
    let err = transport.execute(&latest_posts_request()).await.unwrap_err();

    assert!(matches!(err, ContentError::Http(_)));
}
