//! FAQ backend HTTP client
//!
//! Every authenticated call asks the session authority for headers right
//! before sending. A 401 from the server tears the session down exactly like
//! an expired token does.

use std::sync::Arc;

use faqdesk_common::ClientConfig;
use faqdesk_session::{RequestAuthority, Role, SessionStore};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ApiError;
use crate::models::{ErrorBody, LoginRequest, LoginResponse, SignupRequest, SubscriptionStatus};

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    authority: RequestAuthority,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, authority: RequestAuthority) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
            authority,
        }
    }

    /// Client backed by the configured session file and the system clock
    pub fn from_config(config: &ClientConfig) -> Self {
        let store = Arc::new(SessionStore::file(&config.session_file));
        Self::new(
            config.api_base_url.clone(),
            RequestAuthority::with_system_clock(store),
        )
    }

    pub fn authority(&self) -> &RequestAuthority {
        &self.authority
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        self.authority.store()
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Exchange credentials for a session
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };

        let response = self
            .http
            .post(self.url("/login"))
            .json(&body)
            .send()
            .await
            .map_err(|e| ApiError::Request(e.to_string()))?;

        if !response.status().is_success() {
            return Err(server_error(response, "Login failed").await);
        }

        let login: LoginResponse = decode_json(response).await?;
        let role: Role = login.user_type.parse()?;
        self.session().set_session(&login.access_token, role)?;

        tracing::info!(
            role = %role,
            subject_id = ?self.session().subject(),
            "Logged in"
        );
        Ok(login)
    }

    /// Register a new client account. Does not sign in.
    pub async fn signup(&self, request: &SignupRequest) -> Result<serde_json::Value, ApiError> {
        let response = self
            .http
            .post(self.url("/signup"))
            .json(request)
            .send()
            .await
            .map_err(|e| ApiError::Request(e.to_string()))?;

        if !response.status().is_success() {
            return Err(server_error(response, "Signup failed").await);
        }

        tracing::info!(email = %request.email, "Signup accepted");
        decode_json(response).await
    }

    /// Sign out locally. Idempotent.
    pub fn logout(&self) -> Result<(), ApiError> {
        Ok(self.authority.logout()?)
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send::<(), T>(Method::GET, path, None).await
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(Method::POST, path, Some(body)).await
    }

    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(Method::PUT, path, Some(body)).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send::<(), T>(Method::DELETE, path, None).await
    }

    pub async fn profile(&self) -> Result<serde_json::Value, ApiError> {
        self.get("/profile").await
    }

    pub async fn update_profile(
        &self,
        profile: &serde_json::Value,
    ) -> Result<serde_json::Value, ApiError> {
        self.put("/profile", profile).await
    }

    pub async fn subscription_status(&self) -> Result<SubscriptionStatus, ApiError> {
        self.get("/subscription/status").await
    }

    async fn send<B, T>(&self, method: Method, path: &str, body: Option<&B>) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let credentials = self.authority.credentials()?;

        let mut request = self
            .http
            .request(method.clone(), self.url(path))
            .headers(credentials.headers);
        if let Some(body) = body {
            request = request.json(body);
        }

        tracing::debug!(method = %method, path = %path, "Sending authenticated request");

        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Request(e.to_string()))?;

        if response.status() == StatusCode::UNAUTHORIZED {
            self.authority.reject(&credentials.token);
            return Err(ApiError::AuthRequired);
        }

        if !response.status().is_success() {
            return Err(server_error(response, "Request failed").await);
        }

        decode_json(response).await
    }
}

/// Build a server error from a non-2xx response, preferring its `detail`
async fn server_error(response: reqwest::Response, fallback: &str) -> ApiError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();

    let detail = serde_json::from_str::<ErrorBody>(&body)
        .ok()
        .and_then(|b| b.message())
        .unwrap_or_else(|| format!("{}: {}", fallback, status.as_u16()));

    tracing::debug!(status = status.as_u16(), detail = %detail, "API returned error");

    ApiError::Server {
        status: status.as_u16(),
        detail,
    }
}

/// Decode a JSON body; an empty body decodes as `null`
async fn decode_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let bytes = response
        .bytes()
        .await
        .map_err(|e| ApiError::Response(e.to_string()))?;

    let payload: &[u8] = if bytes.iter().all(u8::is_ascii_whitespace) {
        &b"null"[..]
    } else {
        &bytes[..]
    };

    serde_json::from_slice(payload).map_err(|e| ApiError::Response(e.to_string()))
}
