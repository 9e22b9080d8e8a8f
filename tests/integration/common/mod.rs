//! Common test utilities and fixtures for integration tests
//!
//! - A wiremock server standing in for the FAQ backend
//! - File-backed session stores in a throwaway directory
//! - Token minting with `jsonwebtoken`

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use faqdesk_client::ApiClient;
use faqdesk_common::ClientConfig;
use faqdesk_session::{ManualClock, RequestAuthority, SessionStore};
use serde_json::json;
use tempfile::TempDir;
use wiremock::MockServer;

pub const FAR_FUTURE_EXP: i64 = 9_999_999_999;
pub const TEST_JWT_SECRET: &str = "test_secret_key_for_testing_only"; // pragma: allowlist secret

/// Mint a signed token carrying `user_id` and `exp`
pub fn mint_token(user_id: &str, exp: i64) -> String {
    jsonwebtoken::encode(
        &jsonwebtoken::Header::default(),
        &json!({ "user_id": user_id, "exp": exp }),
        &jsonwebtoken::EncodingKey::from_secret(TEST_JWT_SECRET.as_bytes()),
    )
    .expect("Failed to encode JWT")
}

/// Mock backend plus a client whose session lives in a temp directory
pub struct TestApp {
    pub server: MockServer,
    pub api: ApiClient,
    pub clock: Arc<ManualClock>,
    pub session_file: PathBuf,
    _dir: TempDir,
}

impl TestApp {
    /// Client with the clock pinned to the current wall time
    pub async fn new() -> Self {
        Self::at(chrono::Utc::now().timestamp_millis()).await
    }

    /// Client with the clock pinned to `now_millis`
    pub async fn at(now_millis: i64) -> Self {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let session_file = dir.path().join("session.json");
        let clock = Arc::new(ManualClock::new(now_millis));

        let store = Arc::new(SessionStore::file(&session_file));
        let api = ApiClient::new(server.uri(), RequestAuthority::new(store, clock.clone()));

        Self {
            server,
            api,
            clock,
            session_file,
            _dir: dir,
        }
    }

    /// Configuration pointing at the mock backend and this app's session file
    pub fn config(&self) -> ClientConfig {
        ClientConfig {
            api_base_url: self.server.uri(),
            session_file: self.session_file.clone(),
            login_entry: "login.html".to_string(),
        }
    }

    /// Store a session directly, as a successful login would
    pub fn sign_in(&self, token: &str, role: faqdesk_session::Role) {
        self.api
            .session()
            .set_session(token, role)
            .expect("Failed to store session");
    }

    pub fn assert_signed_out(&self) {
        let store = self.api.session();
        assert_eq!(store.token(), None);
        assert_eq!(store.role(), None);
        assert_eq!(store.subject(), None);
        assert!(!self.session_file.exists());
    }
}
