//! Login, logout and session persistence against a mock backend

mod common;

use common::{mint_token, TestApp, FAR_FUTURE_EXP};
use faqdesk_client::{ApiClient, ApiError};
use faqdesk_session::{Role, SessionError, SessionState};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn test_login_stores_token_role_and_subject() {
    let app = TestApp::new().await;
    let token = mint_token("user-123", FAR_FUTURE_EXP);

    Mock::given(method("POST"))
        .and(path("/login"))
        .and(body_json(json!({"email": "admin@example.com", "password": "pw"})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"access_token": token, "user_type": "admin"})),
        )
        .expect(1)
        .mount(&app.server)
        .await;

    let response = app.api.login("admin@example.com", "pw").await.unwrap();
    assert_eq!(response.user_type, "admin");

    let store = app.api.session();
    assert_eq!(store.role(), Some(Role::Admin));
    assert_eq!(store.token().as_deref(), Some(token.as_str()));
    assert_eq!(store.subject().as_deref(), Some("user-123"));
    assert_eq!(app.api.authority().state(), SessionState::AuthenticatedValid);
}

#[tokio::test]
async fn test_login_failure_surfaces_detail_and_stores_nothing() {
    let app = TestApp::new().await;

    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"detail": "Invalid credentials"})),
        )
        .mount(&app.server)
        .await;

    let err = app.api.login("a@example.com", "wrong").await.unwrap_err();

    match err {
        ApiError::Server { status, detail } => {
            assert_eq!(status, 401);
            assert_eq!(detail, "Invalid credentials");
        }
        other => panic!("expected server error, got {:?}", other),
    }
    app.assert_signed_out();
}

#[tokio::test]
async fn test_login_failure_without_detail_uses_fallback() {
    let app = TestApp::new().await;

    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .mount(&app.server)
        .await;

    let err = app.api.login("a@example.com", "pw").await.unwrap_err();
    assert_eq!(err.to_string(), "Login failed: 500");
}

#[tokio::test]
async fn test_login_with_unknown_role_stores_nothing() {
    let app = TestApp::new().await;
    let token = mint_token("user-1", FAR_FUTURE_EXP);

    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"access_token": token, "user_type": "superuser"})),
        )
        .mount(&app.server)
        .await;

    let err = app.api.login("a@example.com", "pw").await.unwrap_err();
    assert!(matches!(
        err,
        ApiError::Session(SessionError::UnknownRole(ref role)) if role == "superuser"
    ));
    app.assert_signed_out();
}

#[tokio::test]
async fn test_login_with_subjectless_token_stores_nothing() {
    let app = TestApp::new().await;
    let token = jsonwebtoken::encode(
        &jsonwebtoken::Header::default(),
        &json!({"exp": FAR_FUTURE_EXP}),
        &jsonwebtoken::EncodingKey::from_secret(b"secret"),
    )
    .unwrap();

    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"access_token": token, "user_type": "client"})),
        )
        .mount(&app.server)
        .await;

    let err = app.api.login("a@example.com", "pw").await.unwrap_err();
    assert!(matches!(
        err,
        ApiError::Session(SessionError::MalformedToken(_))
    ));
    app.assert_signed_out();
}

#[tokio::test]
async fn test_authenticated_request_carries_bearer_headers() {
    let app = TestApp::new().await;
    let token = mint_token("client-9", FAR_FUTURE_EXP);
    app.sign_in(&token, Role::Client);

    Mock::given(method("GET"))
        .and(path("/profile"))
        .and(header("authorization", format!("Bearer {}", token).as_str()))
        .and(header("content-type", "application/json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"name": "Acme", "website": "https://acme.example"})),
        )
        .expect(2)
        .mount(&app.server)
        .await;

    let profile = app.api.profile().await.unwrap();
    assert_eq!(profile["name"], "Acme");

    // Same session, same headers on the next call
    let again = app.api.profile().await.unwrap();
    assert_eq!(profile, again);
}

#[tokio::test]
async fn test_session_survives_client_restart() {
    let app = TestApp::new().await;
    let token = mint_token("persisted-user", FAR_FUTURE_EXP);

    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"access_token": token, "user_type": "employee"})),
        )
        .mount(&app.server)
        .await;

    app.api.login("e@example.com", "pw").await.unwrap();

    let restarted = ApiClient::from_config(&app.config());
    let store = restarted.session();
    assert_eq!(store.role(), Some(Role::Employee));
    assert_eq!(store.subject().as_deref(), Some("persisted-user"));
    assert!(restarted.authority().is_valid());
}

#[tokio::test]
async fn test_logout_clears_session_and_is_idempotent() {
    let app = TestApp::new().await;
    app.sign_in(&mint_token("u", FAR_FUTURE_EXP), Role::Admin);
    assert!(app.session_file.exists());

    app.api.logout().unwrap();
    app.assert_signed_out();

    app.api.logout().unwrap();
    app.assert_signed_out();
}
