//! # API Client
//!
//! The generic request wrapper every loader goes through.
//!
//! ## Call Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      ApiClient::call(endpoint, method, body)            │
//! │                                                                         │
//! │  base_url + endpoint                                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  session token present? ──yes──► Authorization: Bearer <token>          │
//! │       │                                                                 │
//! │  body present? ──yes──► JSON body + Content-Type: application/json      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  send ──── failed ─────────────────────► Err(Transport)                 │
//! │       │                                                                 │
//! │       ├─── 401 ──► clear session ──────► Err(Unauthorized)              │
//! │       │                                                                 │
//! │       ├─── other non-2xx ──► detail ───► Err(Rejected{status, message}) │
//! │       │                                                                 │
//! │       └─── 2xx ──► parse JSON ─────────► Ok(Value) (unchanged)          │
//! │                                                                         │
//! │  No retries. No client timeout. No caching.                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The client never talks to the user. Presentation of an [`ApiError`] is the
//! caller's job (see `app::Dashboard`).

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use bizdesk_core::{LoginRequest, Session, TokenResponse};

use crate::config::ClientConfig;
use crate::error::{ApiError, ApiResult, ClientResult, GENERIC_ERROR_MESSAGE};
use crate::session::SessionContext;

/// Authentication endpoint.
pub const LOGIN_ENDPOINT: &str = "/auth/login";

// =============================================================================
// Method
// =============================================================================

/// The HTTP methods the backend uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ApiMethod {
    #[default]
    Get,
    Post,
    Put,
    Delete,
}

impl From<ApiMethod> for reqwest::Method {
    fn from(method: ApiMethod) -> Self {
        match method {
            ApiMethod::Get => reqwest::Method::GET,
            ApiMethod::Post => reqwest::Method::POST,
            ApiMethod::Put => reqwest::Method::PUT,
            ApiMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

impl fmt::Display for ApiMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiMethod::Get => write!(f, "GET"),
            ApiMethod::Post => write!(f, "POST"),
            ApiMethod::Put => write!(f, "PUT"),
            ApiMethod::Delete => write!(f, "DELETE"),
        }
    }
}

// =============================================================================
// Client
// =============================================================================

/// REST client bound to one base URL and one session.
///
/// Cloning is cheap; clones share the connection pool and the session.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: SessionContext,
}

impl ApiClient {
    /// Creates a client for `base_url` (e.g. `http://localhost:8000/api`).
    pub fn new(base_url: impl Into<String>, session: SessionContext) -> ClientResult<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("bizdesk/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(ApiClient {
            http,
            base_url,
            session,
        })
    }

    /// Creates a client from a validated configuration.
    pub fn from_config(config: &ClientConfig, session: SessionContext) -> ClientResult<Self> {
        Self::new(config.base_url(), session)
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL for an endpoint path.
    pub fn endpoint_url(&self, endpoint: &str) -> String {
        if endpoint.starts_with('/') {
            format!("{}{}", self.base_url, endpoint)
        } else {
            format!("{}/{}", self.base_url, endpoint)
        }
    }

    // =========================================================================
    // Generic Call
    // =========================================================================

    /// Issues one request and returns the parsed JSON body untouched.
    ///
    /// A 401 clears the session (memory and durable store) before returning
    /// [`ApiError::Unauthorized`].
    pub async fn call(
        &self,
        endpoint: &str,
        method: ApiMethod,
        body: Option<&Value>,
    ) -> ApiResult<Value> {
        match self.send(endpoint, method, body).await {
            Err(ApiError::Rejected { status: 401, .. }) => {
                self.drop_session("401 from server").await;
                Err(ApiError::Unauthorized)
            }
            other => other,
        }
    }

    /// `call` followed by decoding into `T`.
    pub async fn call_as<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        method: ApiMethod,
        body: Option<&Value>,
    ) -> ApiResult<T> {
        let value = self.call(endpoint, method, body).await?;
        Ok(serde_json::from_value(value)?)
    }

    pub async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> ApiResult<T> {
        self.call_as(endpoint, ApiMethod::Get, None).await
    }

    pub async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> ApiResult<T> {
        let body = serde_json::to_value(body)?;
        self.call_as(endpoint, ApiMethod::Post, Some(&body)).await
    }

    pub async fn put<B: Serialize, T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> ApiResult<T> {
        let body = serde_json::to_value(body)?;
        self.call_as(endpoint, ApiMethod::Put, Some(&body)).await
    }

    /// DELETE, returning whatever acknowledgement the server sends.
    pub async fn delete(&self, endpoint: &str) -> ApiResult<Value> {
        self.call(endpoint, ApiMethod::Delete, None).await
    }

    // =========================================================================
    // Authentication
    // =========================================================================

    /// Submits credentials and establishes a new session on success.
    ///
    /// Goes through [`ApiClient::call`] like any other request, so refused
    /// credentials (401) clear any stale session and return
    /// [`ApiError::Unauthorized`].
    pub async fn login(&self, username: &str, password: &str, role: &str) -> ApiResult<Session> {
        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
            role: role.to_string(),
        };
        let body = serde_json::to_value(&request)?;

        let value = self.call(LOGIN_ENDPOINT, ApiMethod::Post, Some(&body)).await?;
        let token: TokenResponse = serde_json::from_value(value)?;
        let session = Session::from(token);
        if !session.is_complete() {
            return Err(ApiError::Decode(
                "login response is missing access_token or role".into(),
            ));
        }

        if let Err(e) = self.session.establish(session.clone()).await {
            warn!(error = %e, "Session active but could not be persisted");
        }
        info!(username = %username, role = %session.role, "Logged in");
        Ok(session)
    }

    /// Clears the session everywhere. Idempotent.
    pub async fn logout(&self) {
        self.drop_session("logout").await;
    }

    async fn drop_session(&self, reason: &str) {
        let had_session = self.session.is_authenticated().await;
        if let Err(e) = self.session.clear().await {
            warn!(error = %e, "Failed to clear stored session");
        }
        if had_session {
            info!(reason, "Session ended");
        }
    }

    // =========================================================================
    // Transport
    // =========================================================================

    /// Sends the request and classifies the response. 401 comes back as a
    /// plain `Rejected`; session handling is left to the public entry points.
    #[instrument(
        name = "api_call",
        skip(self, body),
        fields(request_id = %Uuid::new_v4(), method = %method)
    )]
    async fn send(
        &self,
        endpoint: &str,
        method: ApiMethod,
        body: Option<&Value>,
    ) -> ApiResult<Value> {
        let mut request = self
            .http
            .request(method.into(), self.endpoint_url(endpoint));

        // Read at send time: whatever the session is *now*.
        if let Some(token) = self.session.token().await {
            request = request.bearer_auth(token);
        }

        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .inspect_err(|e| warn!(error = %e, "Request could not be completed"))?;

        let status = response.status();
        if !status.is_success() {
            let payload = response.bytes().await.unwrap_or_default();
            let message = error_message(&payload);
            if status == StatusCode::UNAUTHORIZED {
                warn!("Server answered 401");
            } else {
                warn!(status = status.as_u16(), message = %message, "Request rejected");
            }
            return Err(ApiError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let payload = response.bytes().await?;

        let value = if payload.iter().all(u8::is_ascii_whitespace) {
            Value::Null
        } else {
            serde_json::from_slice(&payload)?
        };

        debug!(status = status.as_u16(), bytes = payload.len(), "Request succeeded");
        Ok(value)
    }
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

/// Extracts the human-readable message from an error body.
///
/// ## Accepted Shapes
/// - `{"detail": "Name required"}` → `Name required`
/// - `{"detail": [{"msg": "field required"}, ...]}` → messages joined by `; `
/// - anything else → [`GENERIC_ERROR_MESSAGE`]
pub fn error_message(body: &[u8]) -> String {
    let Ok(payload) = serde_json::from_slice::<Value>(body) else {
        return GENERIC_ERROR_MESSAGE.to_string();
    };

    match payload.get("detail") {
        Some(Value::String(detail)) if !detail.trim().is_empty() => detail.clone(),
        Some(Value::Array(errors)) => {
            let messages: Vec<&str> = errors
                .iter()
                .filter_map(|e| e.get("msg").and_then(Value::as_str))
                .collect();
            if messages.is_empty() {
                GENERIC_ERROR_MESSAGE.to_string()
            } else {
                messages.join("; ")
            }
        }
        _ => GENERIC_ERROR_MESSAGE.to_string(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
