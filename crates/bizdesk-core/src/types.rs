//! # Domain Types
//!
//! Wire types exchanged with the business management backend.
//!
//! ## Type Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │ Supplier        │   │ Item            │   │ Purchase        │       │
//! │  │ Customer        │   │  current_stock  │   │ Sale            │       │
//! │  │  (PartyInput)   │   │  (ItemInput)    │   │  master+details │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │ CashFlow        │   │ LedgerEntry     │   │ DashboardSummary│       │
//! │  │  type IN/OUT    │   │  movement IN/OUT│   │  totals+series  │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  Session { token, role }  ◄── TokenResponse from POST /auth/login      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Decoding Rules
//! - Unknown fields are ignored (the backend adds audit columns freely)
//! - Optional columns default to `None`
//! - Record ids are integers assigned by the backend

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;
use crate::money::Money;

// =============================================================================
// Session
// =============================================================================

/// The authenticated user's bearer token and role.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Bearer token attached to every request.
    pub token: String,

    /// Role reported by the backend at login (e.g. `admin`, `staff`).
    pub role: String,
}

impl Session {
    pub fn new(token: impl Into<String>, role: impl Into<String>) -> Self {
        Session {
            token: token.into(),
            role: role.into(),
        }
    }

    /// Both fields present. A half-written store never counts as a session.
    pub fn is_complete(&self) -> bool {
        !self.token.is_empty() && !self.role.is_empty()
    }
}

/// Token is redacted so sessions can be logged.
impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token", &"<redacted>")
            .field("role", &self.role)
            .finish()
    }
}

/// Body of `POST /auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
    pub role: String,
}

/// Successful login response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    pub role: String,
}

impl From<TokenResponse> for Session {
    fn from(resp: TokenResponse) -> Self {
        Session::new(resp.access_token, resp.role)
    }
}

// =============================================================================
// Enumerations
// =============================================================================

/// Active flag on suppliers and customers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Status {
    #[default]
    Active,
    Inactive,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Active => write!(f, "Active"),
            Status::Inactive => write!(f, "Inactive"),
        }
    }
}

impl FromStr for Status {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(Status::Active),
            "inactive" => Ok(Status::Inactive),
            _ => Err(CoreError::NotAllowed {
                field: "status".to_string(),
                allowed: vec!["Active".to_string(), "Inactive".to_string()],
            }),
        }
    }
}

/// Direction of a cash flow or an inventory movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlowType {
    #[serde(rename = "IN")]
    In,
    #[serde(rename = "OUT")]
    Out,
}

impl fmt::Display for FlowType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlowType::In => write!(f, "IN"),
            FlowType::Out => write!(f, "OUT"),
        }
    }
}

impl FromStr for FlowType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "IN" => Ok(FlowType::In),
            "OUT" => Ok(FlowType::Out),
            _ => Err(CoreError::NotAllowed {
                field: "type".to_string(),
                allowed: vec!["IN".to_string(), "OUT".to_string()],
            }),
        }
    }
}

// =============================================================================
// Suppliers & Customers
// =============================================================================

/// A supplier or customer record. Both share the same columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Party {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub contact: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub status: Status,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub updated_at: Option<NaiveDateTime>,
}

pub type Supplier = Party;
pub type Customer = Party;

/// Create/update payload for suppliers and customers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartyInput {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default)]
    pub status: Status,
}

impl From<&Party> for PartyInput {
    /// Pre-fills an edit form from an existing record.
    fn from(p: &Party) -> Self {
        PartyInput {
            name: p.name.clone(),
            contact: p.contact.clone(),
            email: p.email.clone(),
            address: p.address.clone(),
            status: p.status,
        }
    }
}

// =============================================================================
// Items
// =============================================================================

/// An inventory item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub unit_of_measure: Option<String>,
    #[serde(default)]
    pub current_stock: f64,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub updated_at: Option<NaiveDateTime>,
}

/// Create/update payload for items.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemInput {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_of_measure: Option<String>,
    #[serde(default)]
    pub current_stock: f64,
}

impl From<&Item> for ItemInput {
    fn from(i: &Item) -> Self {
        ItemInput {
            name: i.name.clone(),
            unit_of_measure: i.unit_of_measure.clone(),
            current_stock: i.current_stock,
        }
    }
}

// =============================================================================
// Purchases & Sales
// =============================================================================

/// One submitted line of a purchase or sale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub item_id: i64,
    pub quantity: f64,
    pub rate: f64,
}

impl LineItem {
    pub fn total(&self) -> Money {
        Money::line_total(self.quantity, self.rate)
    }
}

/// A stored line, as returned inside a purchase or sale document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailLine {
    pub id: i64,
    pub item_id: i64,
    pub quantity: f64,
    pub rate: f64,
    /// Parent id (`purchase_id` or `sales_id` on the wire).
    #[serde(alias = "purchase_id", alias = "sales_id", default)]
    pub parent_id: Option<i64>,
}

/// Purchase master record (list view).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Purchase {
    pub id: i64,
    pub purchase_date: NaiveDate,
    pub supplier_id: i64,
    #[serde(default)]
    pub total_amount: f64,
    #[serde(default)]
    pub created_by: Option<String>,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}

/// `GET /purchases/{id}`: master plus its lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseDocument {
    pub master: Purchase,
    #[serde(default)]
    pub details: Vec<DetailLine>,
}

/// Body of `POST /purchases`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseInput {
    pub purchase_date: NaiveDate,
    pub supplier_id: i64,
    pub details: Vec<LineItem>,
}

/// Sale master record (list view).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sale {
    pub id: i64,
    pub sales_date: NaiveDate,
    pub customer_id: i64,
    #[serde(default)]
    pub total_amount: f64,
    #[serde(default)]
    pub created_by: Option<String>,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}

/// `GET /sales/{id}`: master plus its lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleDocument {
    pub master: Sale,
    #[serde(default)]
    pub details: Vec<DetailLine>,
}

/// Body of `POST /sales`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleInput {
    pub sales_date: NaiveDate,
    pub customer_id: i64,
    pub details: Vec<LineItem>,
}

// =============================================================================
// Cash Flow
// =============================================================================

/// A cash flow transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashFlow {
    pub id: i64,
    pub transaction_date: NaiveDate,
    #[serde(rename = "type")]
    pub flow_type: FlowType,
    pub amount: f64,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub ref_id: Option<String>,
}

/// Create/update payload for cash flow entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashFlowInput {
    pub transaction_date: NaiveDate,
    #[serde(rename = "type")]
    pub flow_type: FlowType,
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ref_id: Option<String>,
}

impl From<&CashFlow> for CashFlowInput {
    fn from(c: &CashFlow) -> Self {
        CashFlowInput {
            transaction_date: c.transaction_date,
            flow_type: c.flow_type,
            amount: c.amount,
            description: c.description.clone(),
            ref_id: c.ref_id.clone(),
        }
    }
}

// =============================================================================
// Reports
// =============================================================================

/// One inventory movement from `GET /reports/inventory`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    #[serde(default)]
    pub id: Option<i64>,
    pub movement_date: NaiveDate,
    pub item_id: i64,
    pub movement_type: FlowType,
    pub quantity: f64,
    #[serde(default)]
    pub movement_reference: Option<String>,
}

/// A dated amount in a dashboard series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmountPoint {
    pub date: String,
    pub amount: f64,
}

/// A dated, directed amount in the dashboard cash flow series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashFlowPoint {
    pub date: String,
    #[serde(rename = "type")]
    pub flow_type: FlowType,
    pub amount: f64,
}

/// `GET /reports/dashboard`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub total_sales: f64,
    pub total_purchases: f64,
    pub net_cashflow: f64,
    pub total_items: i64,
    #[serde(default)]
    pub sales_data: Vec<AmountPoint>,
    #[serde(default)]
    pub purchase_data: Vec<AmountPoint>,
    #[serde(default)]
    pub cashflow_data: Vec<CashFlowPoint>,
}

/// Parses a `YYYY-MM-DD` date as typed on the command line or in a form.
pub fn parse_date(input: &str) -> Result<NaiveDate, CoreError> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .map_err(|_| CoreError::InvalidDate(input.to_string()))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_session_debug_redacts_token() {
        let session = Session::new("secret-token", "admin");
        let debug = format!("{:?}", session);
        assert!(!debug.contains("secret-token"));
        assert!(debug.contains("admin"));
    }

    #[test]
    fn test_session_completeness() {
        assert!(Session::new("T", "owner").is_complete());
        assert!(!Session::new("", "owner").is_complete());
        assert!(!Session::new("T", "").is_complete());
    }

    #[test]
    fn test_token_response_into_session() {
        let resp: TokenResponse = serde_json::from_value(json!({
            "access_token": "T",
            "token_type": "bearer",
            "role": "owner"
        }))
        .unwrap();
        assert_eq!(Session::from(resp), Session::new("T", "owner"));

        // token_type is optional
        let resp: TokenResponse =
            serde_json::from_value(json!({"access_token": "T", "role": "owner"})).unwrap();
        assert_eq!(resp.token_type, None);
    }

    #[test]
    fn test_party_decodes_backend_shape() {
        let supplier: Supplier = serde_json::from_value(json!({
            "id": 7,
            "name": "Acme",
            "contact": null,
            "email": "sales@acme.test",
            "status": "Inactive",
            "created_at": "2024-03-01T10:15:00.123456",
            "updated_at": "2024-03-01T10:15:00",
            "unexpected": true
        }))
        .unwrap();
        assert_eq!(supplier.id, 7);
        assert_eq!(supplier.contact, None);
        assert_eq!(supplier.address, None);
        assert_eq!(supplier.status, Status::Inactive);
        assert!(supplier.created_at.is_some());
    }

    #[test]
    fn test_party_input_omits_absent_fields() {
        let input = PartyInput {
            name: "Acme".into(),
            email: Some("a@b.test".into()),
            ..Default::default()
        };
        let value = serde_json::to_value(&input).unwrap();
        assert_eq!(
            value,
            json!({"name": "Acme", "email": "a@b.test", "status": "Active"})
        );
    }

    #[test]
    fn test_cash_flow_type_field_name() {
        let input = CashFlowInput {
            transaction_date: NaiveDate::from_ymd_opt(2024, 5, 2).unwrap(),
            flow_type: FlowType::Out,
            amount: 250.0,
            description: None,
            ref_id: None,
        };
        let value = serde_json::to_value(&input).unwrap();
        assert_eq!(
            value,
            json!({"transaction_date": "2024-05-02", "type": "OUT", "amount": 250.0})
        );
    }

    #[test]
    fn test_document_details_accept_parent_aliases() {
        let doc: SaleDocument = serde_json::from_value(json!({
            "master": {"id": 4, "sales_date": "2024-01-09", "customer_id": 2, "total_amount": 90.5},
            "details": [{"id": 1, "sales_id": 4, "item_id": 3, "quantity": 2.0, "rate": 45.25}]
        }))
        .unwrap();
        assert_eq!(doc.details[0].parent_id, Some(4));
        assert_eq!(doc.master.total_amount, 90.5);
    }

    #[test]
    fn test_status_and_flow_parsing() {
        assert_eq!("active".parse::<Status>().unwrap(), Status::Active);
        assert_eq!("INACTIVE".parse::<Status>().unwrap(), Status::Inactive);
        assert!("closed".parse::<Status>().is_err());
        assert_eq!("in".parse::<FlowType>().unwrap(), FlowType::In);
        assert_eq!("OUT".parse::<FlowType>().unwrap(), FlowType::Out);
        assert!("sideways".parse::<FlowType>().is_err());
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2024-02-29").unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
        assert_eq!(
            parse_date("29/02/2024"),
            Err(CoreError::InvalidDate("29/02/2024".into()))
        );
    }
}
