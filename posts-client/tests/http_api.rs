use posts_client::{
    HttpClient, LoadState, NewPost, PostApi, PostClientError, PostComposer, PostDetail,
    PostDirectory,
};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> HttpClient {
    HttpClient::with_base_url(server.uri()).expect("client must build")
}

fn posts_json() -> serde_json::Value {
    json!([
        { "userId": 1, "id": 2, "title": "second", "body": "b2" },
        { "userId": 3, "id": 1, "title": "first", "body": "b1", "extra": true }
    ])
}

#[tokio::test]
async fn list_posts_passes_server_order_through() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/posts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(posts_json()))
        .expect(1)
        .mount(&server)
        .await;

    let posts = client_for(&server)
        .list_posts()
        .await
        .expect("list_posts must succeed");

    let ids: Vec<i64> = posts.iter().map(|post| post.id).collect();
    assert_eq!(ids, vec![2, 1]);
    assert_eq!(posts[1].user_id, 3);
    assert_eq!(posts[1].title, "first");
}

#[tokio::test]
async fn create_post_sends_fixed_author_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/posts"))
        .and(body_json(json!({ "title": "T", "body": "B", "userId": 1 })))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(json!({ "title": "T", "body": "B", "userId": 1, "id": 101 })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let created = client_for(&server)
        .create_post(&NewPost::new("T", "B"))
        .await
        .expect("create_post must succeed");

    assert_eq!(created.id, 101);
    assert_eq!(created.user_id, 1);
}

#[tokio::test]
async fn delete_post_ignores_response_body() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/posts/42"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server)
        .delete_post(42)
        .await
        .expect("delete_post must succeed");
}

#[tokio::test]
async fn list_comments_uses_nested_path() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/posts/7/comments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "postId": 7, "id": 1, "name": "n", "email": "a@b.c", "body": "hi" }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let comments = client_for(&server)
        .list_comments(7)
        .await
        .expect("list_comments must succeed");

    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0].post_id, 7);
    assert_eq!(comments[0].email, "a@b.c");
}

#[tokio::test]
async fn non_success_status_maps_to_status_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/posts"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .list_posts()
        .await
        .expect_err("503 must fail");

    assert!(matches!(err, PostClientError::Status(status) if status.as_u16() == 503));
}

#[tokio::test]
async fn malformed_body_maps_to_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/posts/1/comments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "unexpected": 1 })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .list_comments(1)
        .await
        .expect_err("object instead of array must fail");

    assert!(matches!(err, PostClientError::Decode(_)));
}

#[tokio::test]
async fn post_without_user_id_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/posts"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{ "id": 1, "title": "t", "body": "b" }])),
        )
        .mount(&server)
        .await;

    let err = client_for(&server)
        .list_posts()
        .await
        .expect_err("post without userId must fail");

    assert!(matches!(&err, PostClientError::Decode(message) if message.contains("userId")));
}

#[tokio::test]
async fn comment_without_post_id_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/posts/3/comments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "name": "n", "email": "a@b.c", "body": "hi" }
        ])))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .list_comments(3)
        .await
        .expect_err("comment without postId must fail");

    assert!(matches!(&err, PostClientError::Decode(message) if message.contains("postId")));
}

#[tokio::test]
async fn directory_keeps_posts_when_refresh_body_is_incomplete() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/posts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(posts_json()))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/posts"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{ "id": 9, "title": "t", "body": "b" }])),
        )
        .mount(&server)
        .await;

    let mut directory = PostDirectory::new(client_for(&server));
    directory.load().await;
    directory.refresh().await;

    let ids: Vec<i64> = directory.posts().iter().map(|post| post.id).collect();
    assert_eq!(ids, vec![2, 1]);
    assert_eq!(directory.state(), LoadState::Failed);
    assert_eq!(
        directory.feedback().error(),
        Some("Failed to fetch posts. Please try again.")
    );
}

#[tokio::test]
async fn unreachable_host_maps_to_http_error() {
    let client = HttpClient::with_base_url("http://127.0.0.1:1").expect("client must build");

    let err = client.delete_post(1).await.expect_err("connection must fail");

    assert!(matches!(err, PostClientError::Http(_)));
}

#[tokio::test]
async fn directory_delete_refetches_posts() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/posts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(posts_json()))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/posts/2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let mut directory = PostDirectory::new(client_for(&server));
    directory.load().await;
    directory.delete(2).await;

    assert_eq!(
        directory.feedback().success(),
        Some("Post deleted successfully!")
    );
    assert_eq!(directory.state(), LoadState::Ready);
    assert_eq!(directory.posts().len(), 2);
}

#[tokio::test]
async fn composer_shows_fixed_message_on_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/posts"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/posts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(posts_json()))
        .expect(0)
        .mount(&server)
        .await;

    let mut composer = PostComposer::new(client_for(&server));
    composer.submit("T", "B").await;

    assert_eq!(
        composer.feedback().error(),
        Some("Failed to create post. Please try again.")
    );
    assert_eq!(composer.feedback().success(), None);
    assert!(composer.last_created().is_none());
}

#[tokio::test]
async fn detail_renders_empty_comments() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/posts/1/comments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let post = posts_client::Post {
        id: 1,
        title: "first".to_string(),
        body: "b1".to_string(),
        user_id: 1,
    };
    let mut detail = PostDetail::new(client_for(&server), post);
    detail.load().await;

    assert!(detail.comments().is_empty());
    assert_eq!(detail.feedback().error(), None);
}
