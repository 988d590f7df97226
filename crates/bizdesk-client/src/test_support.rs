//! In-process backend and recording `Ui` for tests.
//!
//! `MockBackend` is an axum server on `127.0.0.1:0` that answers canned
//! responses keyed by method and path (query included) and records every
//! request it sees.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use serde_json::Value;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use bizdesk_core::Module;

use crate::ui::Ui;
use crate::views::ModuleView;

/// Path prefix the mock serves under, like a real `/api` mount.
const API_PREFIX: &str = "/api";

#[derive(Debug, Clone)]
pub(crate) struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: Option<Value>,
}

#[derive(Default)]
struct MockState {
    routes: Mutex<HashMap<(String, String), (u16, String)>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

pub(crate) struct MockBackend {
    addr: SocketAddr,
    state: Arc<MockState>,
}

impl MockBackend {
    pub async fn start() -> Self {
        let state = Arc::new(MockState::default());
        let app = Router::new().fallback(handle).with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        MockBackend { addr, state }
    }

    /// A base URL nothing listens on.
    pub async fn unreachable_url() -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        format!("http://{}{}", addr, API_PREFIX)
    }

    pub fn base_url(&self) -> String {
        format!("http://{}{}", self.addr, API_PREFIX)
    }

    pub fn respond(&self, method: &str, path: &str, status: u16, body: Value) {
        self.respond_raw(method, path, status, &body.to_string());
    }

    pub fn respond_raw(&self, method: &str, path: &str, status: u16, body: &str) {
        self.state
            .routes
            .lock()
            .unwrap()
            .insert((method.to_string(), path.to_string()), (status, body.to_string()));
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }

    /// Requests matching one method and path.
    pub fn requests_to(&self, method: &str, path: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == method && r.path == path)
            .collect()
    }
}

async fn handle(
    State(state): State<Arc<MockState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let full = uri
        .path_and_query()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| uri.path().to_string());
    let path = full
        .strip_prefix(API_PREFIX)
        .unwrap_or(&full)
        .to_string();

    let header_value = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };

    state.requests.lock().unwrap().push(RecordedRequest {
        method: method.to_string(),
        path: path.clone(),
        authorization: header_value(header::AUTHORIZATION),
        content_type: header_value(header::CONTENT_TYPE),
        body: if body.is_empty() {
            None
        } else {
            serde_json::from_slice(&body).ok()
        },
    });

    let canned = state
        .routes
        .lock()
        .unwrap()
        .get(&(method.to_string(), path))
        .cloned();

    let (status, body) = canned.unwrap_or((404, r#"{"detail":"Not Found"}"#.to_string()));
    let status = StatusCode::from_u16(status).unwrap();
    (status, [(header::CONTENT_TYPE, "application/json")], body).into_response()
}

// =============================================================================
// Recording Ui
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum UiEvent {
    Login,
    Main(String),
    Module(Module, ModuleView),
    Detail(String),
    Notify(String),
}

/// Remembers every call the controller makes on it.
#[derive(Debug, Default)]
pub(crate) struct RecordingUi {
    pub events: Vec<UiEvent>,
}

impl RecordingUi {
    pub fn notifications(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                UiEvent::Notify(m) => Some(m.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn last_module(&self) -> Option<(Module, &ModuleView)> {
        self.events.iter().rev().find_map(|e| match e {
            UiEvent::Module(m, v) => Some((*m, v)),
            _ => None,
        })
    }
}

impl Ui for RecordingUi {
    fn show_login(&mut self) {
        self.events.push(UiEvent::Login);
    }

    fn show_main(&mut self, role: &str) {
        self.events.push(UiEvent::Main(role.to_string()));
    }

    fn show_module(&mut self, module: Module, view: ModuleView) {
        self.events.push(UiEvent::Module(module, view));
    }

    fn show_detail(&mut self, text: &str) {
        self.events.push(UiEvent::Detail(text.to_string()));
    }

    fn notify(&mut self, message: &str) {
        self.events.push(UiEvent::Notify(message.to_string()));
    }
}
