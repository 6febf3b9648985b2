//! Contract tests for the domain operations against a mocked backend.

use aora_core::backend::Query;
use aora_core::backend::query::CREATED_AT;
use aora_core::config::{AppwriteConfig, DEFAULT_UPLOAD_CHUNK_SIZE};
use aora_core::{
    Aora, AppwriteClient, BackendErrorKind, CreateVideoForm, FileKind, FileUpload, SessionStore,
};
use serde_json::{Value, json};
use wiremock::matchers::{
    any, body_partial_json, body_string_contains, header, method, path, query_param,
};
use wiremock::{Mock, MockServer, ResponseTemplate};

const USERS_PATH: &str = "/v1/databases/db/collections/users/documents";
const VIDEOS_PATH: &str = "/v1/databases/db/collections/videos/documents";
const FILES_PATH: &str = "/v1/storage/buckets/bucket/files";

fn aora_with_chunk_size(server: &MockServer, chunk_size: usize) -> Aora {
    let endpoint = format!("{}/v1", server.uri());
    let settings = AppwriteConfig {
        endpoint: endpoint.clone(),
        platform: "com.jsm.aora".to_string(),
        project_id: "proj".to_string(),
        database_id: "db".to_string(),
        user_collection_id: "users".to_string(),
        video_collection_id: "videos".to_string(),
        storage_id: "bucket".to_string(),
        upload_chunk_size: chunk_size,
    };
    Aora::new(
        AppwriteClient::new(endpoint, "proj", "com.jsm.aora"),
        settings,
    )
}

fn aora(server: &MockServer) -> Aora {
    aora_with_chunk_size(server, DEFAULT_UPLOAD_CHUNK_SIZE)
}

fn user_doc(id: &str, account_id: &str) -> Value {
    json!({
        "$id": id,
        "username": "jane",
        "email": "jane@example.com",
        "avatar": "https://cloud.appwrite.io/v1/avatars/initials?name=jane",
        "accountId": account_id,
    })
}

fn post_doc(id: &str, creator: &str) -> Value {
    json!({
        "$id": id,
        "$createdAt": "2024-10-18T10:00:00.000+00:00",
        "title": format!("Post {id}"),
        "thumbnail": "https://example.com/t.png",
        "prompt": "a prompt",
        "video": "https://example.com/v.mp4",
        "creator": user_doc(creator, "acc"),
    })
}

fn list(documents: Vec<Value>) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "total": documents.len(),
        "documents": documents,
    }))
}

fn stored_file(id: &str) -> ResponseTemplate {
    ResponseTemplate::new(201).set_body_json(json!({
        "$id": id,
        "bucketId": "bucket",
        "name": "file",
        "mimeType": "image/png",
        "sizeOriginal": 4,
        "chunksTotal": 1,
        "chunksUploaded": 1,
    }))
}

fn upload(name: &str, mime: &str) -> FileUpload {
    FileUpload::new(name, mime, b"data".to_vec())
}

fn video_form() -> CreateVideoForm {
    CreateVideoForm {
        title: "Sunset".to_string(),
        prompt: "a sunset over the sea".to_string(),
        thumbnail: upload("thumb.png", "image/png"),
        video: upload("clip.mp4", "video/mp4"),
        user_id: "u1".to_string(),
    }
}

#[tokio::test]
async fn test_latest_posts_requests_seven_newest() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(VIDEOS_PATH))
        .and(header("x-appwrite-project", "proj"))
        .and(query_param(
            "queries[]",
            Query::order_desc(CREATED_AT).to_param().as_str(),
        ))
        .and(query_param("queries[]", Query::limit(7).to_param().as_str()))
        .respond_with(list(vec![post_doc("p2", "u1"), post_doc("p1", "u2")]))
        .expect(1)
        .mount(&server)
        .await;

    let posts = aora(&server).get_latest_posts().await.unwrap();
    assert_eq!(posts.len(), 2);
    assert_eq!(posts[0].id, "p2");
}

#[tokio::test]
async fn test_all_posts_sends_no_queries() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(VIDEOS_PATH))
        .respond_with(list(vec![post_doc("p1", "u1")]))
        .expect(1)
        .mount(&server)
        .await;

    let posts = aora(&server).get_all_posts().await.unwrap();
    assert_eq!(posts.len(), 1);

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests[0].url.query(), None);
}

#[tokio::test]
async fn test_search_posts_uses_title_search() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(VIDEOS_PATH))
        .and(query_param(
            "queries[]",
            r#"{"method":"search","attribute":"title","values":["sunset"]}"#,
        ))
        .respond_with(list(vec![post_doc("p1", "u1")]))
        .expect(1)
        .mount(&server)
        .await;

    let posts = aora(&server).search_posts("sunset").await.unwrap();
    assert_eq!(posts[0].title, "Post p1");
}

#[tokio::test]
async fn test_user_posts_only_returns_that_creator() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(VIDEOS_PATH))
        .and(query_param(
            "queries[]",
            Query::equal("creator", "u1").to_param().as_str(),
        ))
        .and(query_param(
            "queries[]",
            Query::order_desc(CREATED_AT).to_param().as_str(),
        ))
        .respond_with(list(vec![
            post_doc("p3", "u1"),
            post_doc("p2", "u2"),
            post_doc("p1", "u1"),
        ]))
        .expect(1)
        .mount(&server)
        .await;

    let posts = aora(&server).get_user_posts("u1").await.unwrap();
    let ids: Vec<&str> = posts.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, ["p3", "p1"]);
    assert!(posts.iter().all(|p| p.creator_id() == Some("u1")));
}

#[tokio::test]
async fn test_upload_without_file_skips_storage() {
    let server = MockServer::start().await;

    Mock::given(any())
        .respond_with(stored_file("never"))
        .expect(0)
        .mount(&server)
        .await;

    let url = aora(&server).upload_file(None, FileKind::Image).await.unwrap();
    assert_eq!(url, None);
}

#[tokio::test]
async fn test_upload_image_returns_preview_url() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(FILES_PATH))
        .respond_with(stored_file("f1"))
        .expect(1)
        .mount(&server)
        .await;

    let file = upload("thumb.png", "image/png");
    let url = aora(&server)
        .upload_file(Some(&file), FileKind::Image)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(
        url,
        format!(
            "{}/v1/storage/buckets/bucket/files/f1/preview?width=2000&height=2000&gravity=top&quality=100&project=proj",
            server.uri()
        )
    );
}

#[tokio::test]
async fn test_large_upload_is_chunked() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(FILES_PATH))
        .respond_with(stored_file("big"))
        .expect(3)
        .mount(&server)
        .await;

    let file = FileUpload::new("clip.mp4", "video/mp4", b"0123456789".to_vec());
    let url = aora_with_chunk_size(&server, 4)
        .upload_file(Some(&file), FileKind::Video)
        .await
        .unwrap()
        .unwrap();
    assert!(url.ends_with("/files/big/view?project=proj"));

    let requests = server.received_requests().await.unwrap();
    let ranges: Vec<&str> = requests
        .iter()
        .map(|r| r.headers.get("content-range").unwrap().to_str().unwrap())
        .collect();
    assert_eq!(ranges, ["bytes 0-3/10", "bytes 4-7/10", "bytes 8-9/10"]);
    assert!(requests[0].headers.get("x-appwrite-id").is_none());
    assert_eq!(
        requests[2].headers.get("x-appwrite-id").unwrap().to_str().unwrap(),
        "big"
    );
}

#[tokio::test]
async fn test_create_video_writes_one_post_after_both_uploads() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(FILES_PATH))
        .respond_with(stored_file("f1"))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(VIDEOS_PATH))
        .and(body_partial_json(json!({
            "data": {"title": "Sunset", "prompt": "a sunset over the sea", "creator": "u1"}
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(post_doc("p1", "u1")))
        .expect(1)
        .mount(&server)
        .await;

    let post = aora(&server).create_video(&video_form()).await.unwrap();
    assert_eq!(post.id, "p1");

    let requests = server.received_requests().await.unwrap();
    let create = requests
        .iter()
        .find(|r| r.url.path() == VIDEOS_PATH)
        .unwrap();
    let body: Value = serde_json::from_slice(&create.body).unwrap();
    let thumbnail = body["data"]["thumbnail"].as_str().unwrap();
    let video = body["data"]["video"].as_str().unwrap();
    assert!(thumbnail.contains("/files/f1/preview?width=2000"));
    assert!(video.contains("/files/f1/view?project=proj"));

    // Document creation comes after every upload.
    let last = requests.last().unwrap();
    assert_eq!(last.url.path(), VIDEOS_PATH);
}

#[tokio::test]
async fn test_create_video_failed_upload_writes_no_post() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(FILES_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "message": "Server Error",
            "code": 500,
            "type": "general_unknown",
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(VIDEOS_PATH))
        .respond_with(ResponseTemplate::new(201).set_body_json(post_doc("p1", "u1")))
        .expect(0)
        .mount(&server)
        .await;

    let err = aora(&server).create_video(&video_form()).await.unwrap_err();
    assert_eq!(err.kind, BackendErrorKind::HttpStatus);
    assert_eq!(err.status, Some(500));
    assert_eq!(err.message, "HTTP 500: Server Error");
}

#[tokio::test]
async fn test_create_video_one_failed_upload_writes_no_post() {
    let server = MockServer::start().await;

    // Mounted first so it wins over the catch-all upload below.
    Mock::given(method("POST"))
        .and(path(FILES_PATH))
        .and(body_string_contains("video/mp4"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "message": "boom",
            "code": 500,
            "type": "general_unknown",
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(FILES_PATH))
        .respond_with(stored_file("thumb1"))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(VIDEOS_PATH))
        .respond_with(ResponseTemplate::new(201).set_body_json(post_doc("p1", "u1")))
        .expect(0)
        .mount(&server)
        .await;

    let err = aora(&server).create_video(&video_form()).await.unwrap_err();
    assert_eq!(err.status, Some(500));
    assert_eq!(err.message, "HTTP 500: boom");
}

#[tokio::test]
async fn test_invalid_preview_type_makes_no_request() {
    let server = MockServer::start().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = "bogus".parse::<FileKind>().unwrap_err();
    assert_eq!(err.kind, BackendErrorKind::InvalidInput);
    assert!(err.message.contains("Invalid file type"));

    let err = aora(&server)
        .get_file_preview("  ", FileKind::Image)
        .unwrap_err();
    assert_eq!(err.message, "Failed to get file preview");

    let url = aora(&server).get_file_preview("f9", FileKind::Video).unwrap();
    assert!(url.ends_with("/storage/buckets/bucket/files/f9/view?project=proj"));
}

#[tokio::test]
async fn test_current_user_resolves_profile_by_account() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/account"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "$id": "acc1", "email": "jane@example.com", "name": "jane"
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(USERS_PATH))
        .and(query_param(
            "queries[]",
            Query::equal("accountId", "acc1").to_param().as_str(),
        ))
        .respond_with(list(vec![user_doc("u1", "acc1")]))
        .expect(1)
        .mount(&server)
        .await;

    let user = aora(&server).get_current_user().await.unwrap();
    assert_eq!(user.id, "u1");
    assert_eq!(user.account_id, "acc1");
}

#[tokio::test]
async fn test_current_user_without_profile_is_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/account"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"$id": "acc1"})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(USERS_PATH))
        .respond_with(list(vec![]))
        .mount(&server)
        .await;

    let err = aora(&server).get_current_user().await.unwrap_err();
    assert_eq!(err.kind, BackendErrorKind::NotFound);
    assert_eq!(err.message, "User not found");
}

#[tokio::test]
async fn test_create_user_signs_in_before_writing_profile() {
    let server = MockServer::start().await;
    let cookie = r#"{"a_session_proj":"secret"}"#;

    Mock::given(method("POST"))
        .and(path("/v1/account"))
        .and(body_partial_json(json!({
            "email": "jane@example.com", "password": "hunter22", "name": "jane"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "$id": "acc1", "email": "jane@example.com", "name": "jane"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/account/sessions/email"))
        .respond_with(
            ResponseTemplate::new(201)
                .insert_header("x-fallback-cookies", cookie)
                .set_body_json(json!({"$id": "s1", "userId": "acc1"})),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(USERS_PATH))
        .and(header("x-fallback-cookies", cookie))
        .and(body_partial_json(json!({
            "data": {"accountId": "acc1", "email": "jane@example.com", "username": "jane"}
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(user_doc("u1", "acc1")))
        .expect(1)
        .mount(&server)
        .await;

    let aora = aora(&server);
    let user = aora
        .create_user("jane@example.com", "hunter22", "jane")
        .await
        .unwrap();
    assert_eq!(user.id, "u1");
    assert_eq!(aora.client().fallback_cookies().as_deref(), Some(cookie));

    let requests = server.received_requests().await.unwrap();
    let create = requests.iter().find(|r| r.url.path() == USERS_PATH).unwrap();
    let body: Value = serde_json::from_slice(&create.body).unwrap();
    assert!(
        body["data"]["avatar"]
            .as_str()
            .unwrap()
            .contains("/avatars/initials?name=jane&project=proj")
    );
}

#[tokio::test]
async fn test_create_user_stops_when_account_creation_fails() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/account"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "message": "A user with the same id, email, or phone already exists in this project.",
            "code": 409,
            "type": "user_already_exists",
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/account/sessions/email"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(USERS_PATH))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let err = aora(&server)
        .create_user("jane@example.com", "hunter22", "jane")
        .await
        .unwrap_err();
    assert_eq!(err.status, Some(409));
    assert_eq!(err.details.as_deref(), Some("user_already_exists"));
}

#[tokio::test]
async fn test_sign_out_forgets_credential() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/v1/account/sessions/current"))
        .and(header("x-fallback-cookies", "cookie"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let aora = aora(&server);
    aora.client().set_fallback_cookies(Some("cookie".to_string()));
    aora.sign_out().await.unwrap();
    assert_eq!(aora.client().fallback_cookies(), None);
}

#[tokio::test]
async fn test_sign_in_rejects_bad_credentials() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/account/sessions/email"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "message": "Invalid credentials. Please check the email and password.",
            "code": 401,
            "type": "user_invalid_credentials",
        })))
        .mount(&server)
        .await;

    let aora = aora(&server);
    let err = aora.sign_in("jane@example.com", "wrong").await.unwrap_err();
    assert!(err.is_unauthorized());
    assert_eq!(err.details.as_deref(), Some("user_invalid_credentials"));
    assert_eq!(aora.client().fallback_cookies(), None);
}

#[tokio::test]
async fn test_session_store_hydrates_from_backend() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/account"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"$id": "acc1"})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(USERS_PATH))
        .respond_with(list(vec![user_doc("u1", "acc1")]))
        .mount(&server)
        .await;

    let mut store = SessionStore::new();
    store.hydrate(&aora(&server)).await;
    assert!(store.is_logged_in());
    assert!(!store.is_loading());
    assert_eq!(store.user().map(|u| u.id.as_str()), Some("u1"));
}

#[tokio::test]
async fn test_session_store_hydration_without_session() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/account"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "message": "User (role: guests) missing scope (account)",
            "code": 401,
            "type": "general_unauthorized_scope",
        })))
        .mount(&server)
        .await;

    let mut store = SessionStore::new();
    store.hydrate(&aora(&server)).await;
    assert!(!store.is_logged_in());
    assert!(store.user().is_none());
    assert!(!store.is_loading());
}
