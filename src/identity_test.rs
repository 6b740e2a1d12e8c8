use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::*;

fn test_provider(server: &MockServer) -> ClerkIdentityProvider {
    ClerkIdentityProvider::new(&ClerkConfig {
        secret_key: "sk_test".to_string(),
        endpoint: server.uri(),
    })
}

async fn mount_session(server: &MockServer, status: &str) {
    Mock::given(method("GET"))
        .and(path("/v1/sessions/sess_1"))
        .and(header("Authorization", "Bearer sk_test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "sess_1",
            "user_id": "user_1",
            "status": status
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_active_session_resolves_user() {
    let server = MockServer::start().await;
    mount_session(&server, "active").await;

    Mock::given(method("GET"))
        .and(path("/v1/users/user_1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "user_1",
            "first_name": "Ada",
            "last_name": "Lovelace",
            "username": "ada"
        })))
        .mount(&server)
        .await;

    let user = test_provider(&server).current_user("sess_1").await.unwrap().unwrap();
    assert_eq!(user.id, "user_1");
    assert_eq!(user.name.as_deref(), Some("Ada Lovelace"));
}

#[tokio::test]
async fn test_ended_session_is_signed_out() {
    let server = MockServer::start().await;
    mount_session(&server, "ended").await;

    let user = test_provider(&server).current_user("sess_1").await.unwrap();
    assert!(user.is_none());
}

#[tokio::test]
async fn test_unknown_session_is_signed_out() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let user = test_provider(&server).current_user("sess_missing").await.unwrap();
    assert!(user.is_none());
}

#[tokio::test]
async fn test_provider_error_is_surfaced() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = test_provider(&server).current_user("sess_1").await.unwrap_err();
    assert!(matches!(err, IdentityError::Unexpected { status: 500 }));
}

#[test]
fn test_display_name_falls_back_to_username() {
    let user = ClerkUser {
        id: "user_2".to_string(),
        first_name: None,
        last_name: Some(String::new()),
        username: Some("grace".to_string()),
    };
    assert_eq!(user.display_name().as_deref(), Some("grace"));
}

#[tokio::test]
async fn test_path_traversal_session_id_sends_nothing() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "user_victim",
            "first_name": "Victim"
        })))
        .expect(0)
        .mount(&server)
        .await;

    let provider = test_provider(&server);
    for session_id in ["../users/user_victim", "sess_1/../../users/x", "sess 1", "%2e%2e"] {
        let user = provider.current_user(session_id).await.unwrap();
        assert!(user.is_none(), "session id {:?}", session_id);
    }
}

#[test]
fn test_url_segments_are_encoded() {
    let provider = ClerkIdentityProvider::new(&ClerkConfig {
        secret_key: "sk_test".to_string(),
        endpoint: "https://api.clerk.test/".to_string(),
    });

    let url = provider.url_for(&["users", "user_1/../sessions"]).unwrap();
    assert_eq!(url.path(), "/v1/users/user_1%2F..%2Fsessions");

    let url = provider.url_for(&["sessions", "sess_1"]).unwrap();
    assert_eq!(url.as_str(), "https://api.clerk.test/v1/sessions/sess_1");
}

#[test]
fn test_session_id_format() {
    assert!(is_valid_session_id("sess_2abcDEF123"));
    assert!(!is_valid_session_id(""));
    assert!(!is_valid_session_id("sess_1?x=1"));
    assert!(!is_valid_session_id(&"a".repeat(129)));
}

#[tokio::test]
async fn test_undecodable_body_is_invalid_response() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/sessions/sess_1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let err = test_provider(&server)
        .current_user("sess_1")
        .await
        .unwrap_err();
    assert!(matches!(err, IdentityError::InvalidResponse(_)));
    assert_eq!(err.status_code(), axum::http::StatusCode::BAD_GATEWAY);
}
