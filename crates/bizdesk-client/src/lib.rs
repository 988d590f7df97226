//! # bizdesk-client: API Client & Session Manager for Bizdesk
//!
//! This crate is the only part of Bizdesk that talks to the backend. It
//! holds the session, issues REST calls, and turns responses into view
//! models for whatever front end sits behind the [`Ui`] trait.
//!
//! ## Architecture Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Client Architecture                              │
//! │                                                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                  Dashboard<U: Ui> (Controller)                   │  │
//! │  │                                                                  │  │
//! │  │  navigate(name) ──► loader ──► views::* ──► ui.show_module()    │  │
//! │  │  Err(Unauthorized) ──► ui.show_login()                          │  │
//! │  │  Err(other)        ──► ui.notify(message)                       │  │
//! │  └────────────────────────────┬─────────────────────────────────────┘  │
//! │                               │                                         │
//! │         ┌─────────────────────┼─────────────────────┐                  │
//! │         ▼                     ▼                     ▼                   │
//! │  ┌────────────────┐  ┌────────────────┐  ┌────────────────────────┐    │
//! │  │   resources    │  │   ApiClient    │  │   SessionContext       │    │
//! │  │                │  │                │  │                        │    │
//! │  │ list/create/   │─►│ call(endpoint, │─►│ token + role           │    │
//! │  │ update/remove/ │  │  method, body) │  │ memory + SessionStore  │    │
//! │  │ fetch          │  │ login/logout   │  │ (file or in-memory)    │    │
//! │  └────────────────┘  └────────────────┘  └────────────────────────┘    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//! - [`api`] - `ApiClient`: generic call, login, logout
//! - [`resources`] - Typed collections and report endpoints
//! - [`session`] - Shared session context
//! - [`storage`] - Durable session stores
//! - [`config`] - Client configuration (base URL, session file, currency)
//! - [`views`] - View models built from backend records
//! - [`ui`] - The presentation trait
//! - [`app`] - `Dashboard` controller
//! - [`error`] - Error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use bizdesk_client::{ApiClient, ClientConfig, Dashboard, FileSessionStore, SessionContext};
//!
//! let config = ClientConfig::load_or_default(None);
//! let store = Arc::new(FileSessionStore::new(config.session_path().unwrap()));
//! let client = ApiClient::from_config(&config, SessionContext::restore(store))?;
//!
//! let mut app = Dashboard::new(client, my_ui);
//! app.startup().await?;
//! app.navigate("suppliers").await;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod resources;
pub mod session;
pub mod storage;
pub mod ui;
pub mod views;

#[cfg(test)]
mod test_support;

// =============================================================================
// Re-exports
// =============================================================================

pub use api::{ApiClient, ApiMethod};
pub use app::Dashboard;
pub use config::ClientConfig;
pub use error::{ApiError, ApiResult, ClientError, ClientResult};
pub use resources::{
    CashFlows, Customers, Documented, Editable, Items, Purchases, Resource, Sales, Suppliers,
};
pub use session::SessionContext;
pub use storage::{FileSessionStore, MemorySessionStore, SessionStore};
pub use ui::Ui;
pub use views::{DashboardView, ModuleView, ReportView, SelectOption, TableView};
