//! # bizdesk-core: Pure Types for Bizdesk
//!
//! This crate holds the data model shared by the API client and the
//! front ends. It has zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Bizdesk Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    apps/cli (bizdesk binary)                    │   │
//! │  │    login ──► show <module> ──► add / update / delete ──► view  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ Ui trait                               │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    bizdesk-client                               │   │
//! │  │    Dashboard controller, ApiClient, SessionContext              │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ bizdesk-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  module   │  │   order   │  │   │
//! │  │   │ Supplier  │  │   Money   │  │ dispatch  │  │ OrderDraft│  │   │
//! │  │   │  Session  │  │  "TK..."  │  │   names   │  │ DraftLine │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • NO GLOBALS                             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Wire types (Supplier, Purchase, DashboardSummary, Session, ...)
//! - [`money`] - Money type with integer arithmetic for display and totals
//! - [`module`] - The closed set of navigable sections
//! - [`order`] - Purchase/sale drafts and the line filter
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use bizdesk_core::order::{DraftLine, OrderDraft};
//!
//! let mut draft = OrderDraft::new();
//! draft.push(DraftLine::new(1, 2.0, 50.0));
//! draft.push(DraftLine::default()); // never filled in
//!
//! assert_eq!(draft.total().to_string(), "TK100.00");
//! assert_eq!(draft.valid_lines().len(), 1);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod module;
pub mod money;
pub mod order;
pub mod types;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult};
pub use module::Module;
pub use money::Money;
pub use order::{DraftLine, OrderDraft};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Base URL of the backend when nothing else is configured.
pub const DEFAULT_API_BASE: &str = "http://localhost:8000/api";

/// Currency prefix used when formatting amounts.
pub const CURRENCY_PREFIX: &str = "TK";
