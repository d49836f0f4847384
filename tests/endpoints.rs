//! Each endpoint method hits the expected verb, path and payload.

use novelaictl::session::{self, MemoryStore, SessionError, SessionStore};
use novelaictl::{ApiClient, ClientConfig};
use serde_json::{json, Value};
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

fn client_for(server: &MockServer) -> ApiClient {
    ApiClient::new(ClientConfig::new(server.uri(), "access-key", "token"))
}

/// Mounts a mock answering `{"ok": true}` that must be hit exactly once.
async fn expect_once(server: &MockServer, verb: &str, route: &str, body: Option<Value>) {
    let mut mock = Mock::given(method(verb)).and(path(route));
    if let Some(body) = body {
        mock = mock.and(body_json(body));
    } else {
        mock = mock.and(|request: &Request| request.body.is_empty());
    }

    mock.respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_path_segments_are_substituted_literally() {
    let server = MockServer::start().await;
    expect_once(&server, "GET", "/user/objects/stories/shelf:1@home", None).await;
    expect_once(&server, "GET", "/user/objects/stories/nested/child", None).await;

    let client = client_for(&server);
    client
        .get_user_objects_type_id("stories", "shelf:1@home")
        .await
        .unwrap();
    // A `/` in an id is not escaped, so it adds a segment.
    client
        .get_user_objects_type_id("stories", "nested/child")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_keystore_body_is_verbatim() {
    let server = MockServer::start().await;
    expect_once(
        &server,
        "PUT",
        "/user/keystore",
        Some(json!({"keystore": "eyJ2ZXJzaW9uIjo0fQ==", "changeIndex": 12})),
    )
    .await;

    let response = client_for(&server)
        .put_user_keystore("eyJ2ZXJzaW9uIjo0fQ==", 12)
        .await
        .unwrap();
    assert_eq!(response, json!({"ok": true}));
}

#[tokio::test]
async fn test_user_object_endpoints() {
    let server = MockServer::start().await;
    let object = json!({"meta": "m", "data": "d", "changeIndex": 3});

    expect_once(&server, "GET", "/user/objects/shelf", None).await;
    expect_once(&server, "PUT", "/user/objects/shelf", Some(object.clone())).await;
    expect_once(&server, "PUT", "/user/objects/shelf/abc", None).await;
    expect_once(&server, "PATCH", "/user/objects/shelf/abc", Some(object)).await;
    expect_once(&server, "DELETE", "/user/objects/shelf/abc", None).await;

    let client = client_for(&server);
    client.get_user_objects_type("shelf").await.unwrap();
    client.put_user_objects_type("shelf", "m", "d", 3).await.unwrap();
    client.put_user_objects_type_id("shelf", "abc").await.unwrap();
    client
        .patch_user_objects_type_id("shelf", "abc", "m", "d", 3)
        .await
        .unwrap();
    client.delete_user_objects_type_id("shelf", "abc").await.unwrap();
}

#[tokio::test]
async fn test_account_endpoints() {
    let server = MockServer::start().await;

    expect_once(
        &server,
        "POST",
        "/user/change-access-key",
        Some(json!({"currentAccessKey": "old", "newAccessKey": "new", "newEmail": "a@b.c"})),
    )
    .await;
    expect_once(
        &server,
        "POST",
        "/user/resend-email-verification",
        Some(json!({"email": "a@b.c"})),
    )
    .await;
    expect_once(
        &server,
        "POST",
        "/user/verify-email",
        Some(json!({"verificationToken": "vt"})),
    )
    .await;
    expect_once(&server, "POST", "/user/deletion/request", Some(json!({"email": "a@b.c"}))).await;
    expect_once(&server, "POST", "/user/deletion/delete", Some(json!({"deletionToken": "dt"}))).await;
    expect_once(&server, "POST", "/user/recovery/request", Some(json!({"email": "a@b.c"}))).await;
    expect_once(
        &server,
        "POST",
        "/user/recovery/recover",
        Some(json!({"recoveryToken": "rt", "newAccessKey": "nk", "deleteContent": false})),
    )
    .await;

    let client = client_for(&server);
    client
        .post_user_change_access_key("old", "new", "a@b.c")
        .await
        .unwrap();
    client.post_user_resend_email_verification("a@b.c").await.unwrap();
    client.post_user_verify_email("vt").await.unwrap();
    client.post_user_deletion_request("a@b.c").await.unwrap();
    client.post_user_deletion_delete("dt").await.unwrap();
    client.post_user_recovery_request("a@b.c").await.unwrap();
    client
        .post_user_recovery_recover("rt", "nk", false)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_read_only_user_endpoints() {
    let server = MockServer::start().await;
    for route in [
        "/user/information",
        "/user/data",
        "/user/giftkeys",
        "/user/subscription",
        "/user/keystore",
        "/user/clientsettings",
    ] {
        expect_once(&server, "GET", route, None).await;
    }

    let client = client_for(&server);
    client.get_user_information().await.unwrap();
    client.get_user_data().await.unwrap();
    client.get_user_gift_keys().await.unwrap();
    client.get_user_subscription().await.unwrap();
    client.get_user_keystore().await.unwrap();
    client.get_user_client_settings().await.unwrap();
}

#[tokio::test]
async fn test_submission_and_subscription_endpoints() {
    let server = MockServer::start().await;

    expect_once(
        &server,
        "POST",
        "/user/submission",
        Some(json!({
            "data": "story",
            "dataName": "My Story",
            "authorName": "anon",
            "authorEmail": "anon@example.com",
            "socials": ["@anon"],
            "mediums": ["text"],
            "event": "spring",
        })),
    )
    .await;
    expect_once(&server, "POST", "/user/submission/spring", Some(json!({"id": "s1"}))).await;
    expect_once(
        &server,
        "POST",
        "/user/subscription/bind",
        Some(json!({
            "paymentProcessor": "paddle",
            "subscriptionId": "sub_1",
            "confirmedReplace": true,
            "confirmedIgnore": false,
        })),
    )
    .await;
    expect_once(
        &server,
        "POST",
        "/user/subscription/change",
        Some(json!({"newSubscriptionPlan": "opus"})),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/user/submission/spring"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(2)
        .mount(&server)
        .await;

    let client = client_for(&server);
    client
        .post_user_submission(
            "story",
            "My Story",
            "anon",
            "anon@example.com",
            &json!(["@anon"]),
            &json!(["text"]),
            "spring",
        )
        .await
        .unwrap();
    client.post_user_vote_submission_event("spring", "s1").await.unwrap();
    client
        .post_user_subscription_bind("paddle", "sub_1", true, false)
        .await
        .unwrap();
    client.post_user_subscription_change("opus").await.unwrap();
    client.get_user_submission_event("spring").await.unwrap();
    client.get_user_vote_submission_event("spring").await.unwrap();
}

#[tokio::test]
async fn test_generation_endpoints() {
    let server = MockServer::start().await;
    let parameters = json!({"temperature": 1.0, "max_length": 40});

    expect_once(
        &server,
        "POST",
        "/ai/generate",
        Some(json!({"input": "Once", "model": "kayra-v1", "parameters": parameters})),
    )
    .await;
    expect_once(
        &server,
        "POST",
        "/ai/generate-stream",
        Some(json!({"input": "Once", "model": "kayra-v1", "parameters": parameters})),
    )
    .await;
    expect_once(
        &server,
        "POST",
        "/ai/generate-image",
        Some(json!({
            "input": "a cat",
            "model": "nai-diffusion-3",
            "parameters": parameters,
            "url": "",
        })),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/ai/generate-image/suggest-tags"))
        .and(query_param("model", "nai-diffusion-3"))
        .and(query_param("prompt", "ca"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"tags": [{"tag": "cat"}]})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    client
        .post_ai_generate("Once", "kayra-v1", &parameters)
        .await
        .unwrap();
    client
        .post_ai_generate_stream("Once", "kayra-v1", &parameters)
        .await
        .unwrap();
    client
        .post_ai_generate_image("a cat", "nai-diffusion-3", &parameters, "")
        .await
        .unwrap();
    let tags = client
        .get_ai_generate_image_suggest_tags("nai-diffusion-3", "ca")
        .await
        .unwrap();
    assert_eq!(tags["tags"][0]["tag"], "cat");
}

#[tokio::test]
async fn test_module_endpoints() {
    let server = MockServer::start().await;

    expect_once(
        &server,
        "POST",
        "/ai/module/train",
        Some(json!({
            "data": "training text",
            "lr": 0.5,
            "steps": 1000,
            "model": "euterpe-v2",
            "name": "My Module",
            "description": "about",
        })),
    )
    .await;
    expect_once(&server, "GET", "/ai/module/all", None).await;
    expect_once(&server, "GET", "/ai/module/all/mod-1", None).await;
    expect_once(&server, "DELETE", "/ai/module/mod-1", None).await;
    expect_once(
        &server,
        "POST",
        "/ai/module/buy-training-steps",
        Some(json!({"amount": 2000})),
    )
    .await;

    let client = client_for(&server);
    client
        .post_ai_module_train("training text", 0.5, 1000, "euterpe-v2", "My Module", "about")
        .await
        .unwrap();
    client.get_ai_module_all().await.unwrap();
    client.get_ai_module_id("mod-1").await.unwrap();
    client.delete_ai_module_id("mod-1").await.unwrap();
    client.post_ai_module_buy_training_steps(2000).await.unwrap();
}

#[tokio::test]
async fn test_login_stores_token() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/user/login"))
        .and(body_json(json!({"key": "access-key"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"accessToken": "issued"})))
        .expect(1)
        .mount(&server)
        .await;

    let store = MemoryStore::new();
    let client = client_for(&server);
    let logged_in = session::login(&client, &store).await.unwrap();

    assert_eq!(logged_in.config().access_token, "issued");
    assert_eq!(client.config().access_token, "token");
    assert_eq!(store.access_token().unwrap().as_deref(), Some("issued"));
}

#[tokio::test]
async fn test_login_rejection_keeps_store_empty() {
    let server = MockServer::start().await;

    let rejection = json!({"statusCode": 401, "message": "Access Key is incorrect."});
    Mock::given(method("POST"))
        .and(path("/user/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(rejection.clone()))
        .mount(&server)
        .await;

    let store = MemoryStore::new();
    let result = session::login(&client_for(&server), &store).await;

    assert!(matches!(result, Err(SessionError::LoginRejected(ref payload)) if *payload == rejection));
    assert_eq!(store.access_token().unwrap(), None);
}
