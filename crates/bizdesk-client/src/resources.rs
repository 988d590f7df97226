//! # Typed Resources
//!
//! Typed wrappers over [`ApiClient::call`] for every backend collection.
//!
//! ## Endpoint Table
//! ```text
//! ┌──────────────┬──────────┬──────────┬────────────────┬─────────────────┬──────────────────┐
//! │ Resource     │ list     │ create   │ update         │ delete          │ view             │
//! ├──────────────┼──────────┼──────────┼────────────────┼─────────────────┼──────────────────┤
//! │ Suppliers    │ GET      │ POST     │ PUT /{id}      │ DELETE /{id}    │                  │
//! │ Customers    │ GET      │ POST     │ PUT /{id}      │ DELETE /{id}    │                  │
//! │ Items        │ GET      │ POST     │ PUT /{id}      │ DELETE /{id}    │                  │
//! │ CashFlows    │ GET      │ POST     │ PUT /{id}      │ DELETE /{id}    │                  │
//! │ Purchases    │ GET      │ POST     │                │                 │ GET /{id}        │
//! │ Sales        │ GET      │ POST     │                │                 │ GET /{id}        │
//! └──────────────┴──────────┴──────────┴────────────────┴─────────────────┴──────────────────┘
//! ```
//!
//! Purchases and sales are append-only: `update`/`delete` need [`Editable`],
//! which they do not implement, so the calls do not compile.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use bizdesk_core::{
    CashFlow, CashFlowInput, Customer, DashboardSummary, Item, ItemInput, LedgerEntry, PartyInput,
    Purchase, PurchaseDocument, PurchaseInput, Sale, SaleDocument, SaleInput, Supplier,
};

use crate::api::ApiClient;
use crate::error::ApiResult;

/// Dashboard totals and chart series.
pub const DASHBOARD_ENDPOINT: &str = "/reports/dashboard";

/// Inventory ledger, optionally narrowed with `?item_id=N`.
pub const INVENTORY_ENDPOINT: &str = "/reports/inventory";

// =============================================================================
// Traits
// =============================================================================

/// A backend collection.
pub trait Resource {
    /// Collection path, e.g. `/suppliers`.
    const PATH: &'static str;

    /// Shape of one listed record.
    type Record: DeserializeOwned;

    /// Create (and, if editable, update) body.
    type Input: Serialize;

    fn record_path(id: i64) -> String {
        format!("{}/{}", Self::PATH, id)
    }
}

/// Collections that accept `PUT /{id}` and `DELETE /{id}`.
pub trait Editable: Resource {}

/// Collections whose records can be fetched by id as a full document.
pub trait Documented: Resource {
    type Document: DeserializeOwned;
}

// =============================================================================
// Collections
// =============================================================================

pub struct Suppliers;

impl Resource for Suppliers {
    const PATH: &'static str = "/suppliers";
    type Record = Supplier;
    type Input = PartyInput;
}

impl Editable for Suppliers {}

pub struct Customers;

impl Resource for Customers {
    const PATH: &'static str = "/customers";
    type Record = Customer;
    type Input = PartyInput;
}

impl Editable for Customers {}

pub struct Items;

impl Resource for Items {
    const PATH: &'static str = "/items";
    type Record = Item;
    type Input = ItemInput;
}

impl Editable for Items {}

pub struct CashFlows;

impl Resource for CashFlows {
    const PATH: &'static str = "/cashflow";
    type Record = CashFlow;
    type Input = CashFlowInput;
}

impl Editable for CashFlows {}

pub struct Purchases;

impl Resource for Purchases {
    const PATH: &'static str = "/purchases";
    type Record = Purchase;
    type Input = PurchaseInput;
}

impl Documented for Purchases {
    type Document = PurchaseDocument;
}

pub struct Sales;

impl Resource for Sales {
    const PATH: &'static str = "/sales";
    type Record = Sale;
    type Input = SaleInput;
}

impl Documented for Sales {
    type Document = SaleDocument;
}

// =============================================================================
// Client Operations
// =============================================================================

impl ApiClient {
    /// `GET /<collection>`.
    pub async fn list<R: Resource>(&self) -> ApiResult<Vec<R::Record>> {
        self.get(R::PATH).await
    }

    /// `POST /<collection>`; returns the stored record.
    pub async fn create<R: Resource>(&self, input: &R::Input) -> ApiResult<R::Record> {
        self.post(R::PATH, input).await
    }

    /// `PUT /<collection>/{id}`; returns the stored record.
    pub async fn update<R: Editable>(&self, id: i64, input: &R::Input) -> ApiResult<R::Record> {
        self.put(&R::record_path(id), input).await
    }

    /// `DELETE /<collection>/{id}`; returns the server's confirmation text.
    pub async fn remove<R: Editable>(&self, id: i64) -> ApiResult<Option<String>> {
        let ack = self.delete(&R::record_path(id)).await?;
        Ok(ack
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string))
    }

    /// `GET /<collection>/{id}`: master record plus lines.
    pub async fn fetch<R: Documented>(&self, id: i64) -> ApiResult<R::Document> {
        self.get(&R::record_path(id)).await
    }

    /// Looks a record up by id in the full list.
    ///
    /// A failed list comes back as the error, never as "not found".
    pub async fn find<R, F>(&self, id: i64, id_of: F) -> ApiResult<Option<R::Record>>
    where
        R: Resource,
        F: Fn(&R::Record) -> i64,
    {
        let records = self.list::<R>().await?;
        Ok(records.into_iter().find(|r| id_of(r) == id))
    }

    /// `GET /reports/dashboard`.
    pub async fn dashboard(&self) -> ApiResult<DashboardSummary> {
        self.get(DASHBOARD_ENDPOINT).await
    }

    /// `GET /reports/inventory`, for one item or all of them.
    pub async fn inventory(&self, item_id: Option<i64>) -> ApiResult<Vec<LedgerEntry>> {
        self.get(&inventory_endpoint(item_id)).await
    }
}

/// Inventory report path with the optional item filter.
pub fn inventory_endpoint(item_id: Option<i64>) -> String {
    match item_id {
        Some(id) => format!("{}?item_id={}", INVENTORY_ENDPOINT, id),
        None => INVENTORY_ENDPOINT.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use crate::session::SessionContext;
    use crate::storage::MemorySessionStore;
    use crate::test_support::MockBackend;
    use bizdesk_core::{DraftLine, FlowType, OrderDraft, Session, Status};
    use chrono::NaiveDate;
    use serde_json::json;
    use std::sync::Arc;

    async fn setup() -> (MockBackend, ApiClient) {
        let backend = MockBackend::start().await;
        let store = Arc::new(MemorySessionStore::with_session(Session::new("T", "admin")));
        let client = ApiClient::new(backend.base_url(), SessionContext::restore(store)).unwrap();
        (backend, client)
    }

    #[test]
    fn test_paths() {
        assert_eq!(Suppliers::record_path(4), "/suppliers/4");
        assert_eq!(CashFlows::record_path(2), "/cashflow/2");
        assert_eq!(inventory_endpoint(None), "/reports/inventory");
        assert_eq!(inventory_endpoint(Some(7)), "/reports/inventory?item_id=7");
    }

    #[tokio::test]
    async fn test_list_suppliers() {
        let (backend, client) = setup().await;
        backend.respond(
            "GET",
            "/suppliers",
            200,
            json!([
                {"id": 1, "name": "Acme", "contact": "017", "email": null, "address": null,
                 "status": "Active", "created_at": "2024-01-02T10:00:00", "updated_at": null},
                {"id": 2, "name": "Bolt", "status": "Inactive"}
            ]),
        );

        let suppliers = client.list::<Suppliers>().await.unwrap();
        assert_eq!(suppliers.len(), 2);
        assert_eq!(suppliers[0].contact.as_deref(), Some("017"));
        assert_eq!(suppliers[1].status, Status::Inactive);
    }

    #[tokio::test]
    async fn test_update_and_remove_item() {
        let (backend, client) = setup().await;
        backend.respond(
            "PUT",
            "/items/5",
            200,
            json!({"id": 5, "name": "Rice", "unit_of_measure": "kg", "current_stock": 10.0}),
        );
        backend.respond("DELETE", "/items/5", 200, json!({"message": "Item deleted successfully"}));

        let input = ItemInput {
            name: "Rice".into(),
            unit_of_measure: Some("kg".into()),
            current_stock: 10.0,
        };
        let item = client.update::<Items>(5, &input).await.unwrap();
        assert_eq!(item.unit_of_measure.as_deref(), Some("kg"));

        let message = client.remove::<Items>(5).await.unwrap();
        assert_eq!(message.as_deref(), Some("Item deleted successfully"));

        let put = &backend.requests_to("PUT", "/items/5")[0];
        assert_eq!(
            put.body,
            Some(json!({"name": "Rice", "unit_of_measure": "kg", "current_stock": 10.0}))
        );
    }

    #[tokio::test]
    async fn test_create_purchase_with_no_valid_lines_sends_empty_details() {
        let (backend, client) = setup().await;
        backend.respond(
            "POST",
            "/purchases",
            200,
            json!({"id": 9, "purchase_date": "2024-03-01", "supplier_id": 1, "total_amount": 0.0}),
        );

        let mut draft = OrderDraft::new();
        draft.add_line();
        draft.push(DraftLine {
            item_id: Some(3),
            quantity: Some(0.0),
            rate: Some(5.0),
        });
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        client
            .create::<Purchases>(&draft.into_purchase(date, 1))
            .await
            .unwrap();

        let sent = backend.requests_to("POST", "/purchases")[0].body.clone().unwrap();
        assert_eq!(sent["details"], json!([]));
        assert_eq!(sent["supplier_id"], json!(1));
        assert_eq!(sent["purchase_date"], json!("2024-03-01"));
    }

    #[tokio::test]
    async fn test_fetch_sale_document() {
        let (backend, client) = setup().await;
        backend.respond(
            "GET",
            "/sales/4",
            200,
            json!({
                "master": {"id": 4, "sales_date": "2024-05-06", "customer_id": 2,
                           "total_amount": 150.5, "created_by": "admin"},
                "details": [{"id": 1, "sales_id": 4, "item_id": 3, "quantity": 2.0, "rate": 75.25}]
            }),
        );

        let doc = client.fetch::<Sales>(4).await.unwrap();
        assert_eq!(doc.master.customer_id, 2);
        assert_eq!(doc.details[0].parent_id, Some(4));
    }

    #[tokio::test]
    async fn test_find_propagates_list_failure() {
        let (backend, client) = setup().await;
        backend.respond("GET", "/customers", 500, json!({"detail": "database down"}));

        let err = client
            .find::<Customers, _>(1, |c| c.id)
            .await
            .unwrap_err();
        assert_eq!(err.user_message().as_deref(), Some("database down"));
    }

    #[tokio::test]
    async fn test_find_missing_record() {
        let (backend, client) = setup().await;
        backend.respond(
            "GET",
            "/cashflow",
            200,
            json!([{"id": 1, "transaction_date": "2024-01-01", "type": "IN", "amount": 10.0}]),
        );

        let found = client.find::<CashFlows, _>(1, |c| c.id).await.unwrap();
        assert_eq!(found.map(|c| c.flow_type), Some(FlowType::In));
        assert_eq!(client.find::<CashFlows, _>(2, |c| c.id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_inventory_filter_and_shape_mismatch() {
        let (backend, client) = setup().await;
        backend.respond(
            "GET",
            "/reports/inventory?item_id=3",
            200,
            json!([{"id": 1, "movement_date": "2024-02-01", "item_id": 3,
                    "movement_type": "OUT", "quantity": 4.0, "movement_reference": "SALE-7"}]),
        );
        backend.respond("GET", "/reports/dashboard", 200, json!({"total_sales": "lots"}));

        let ledger = client.inventory(Some(3)).await.unwrap();
        assert_eq!(ledger[0].movement_reference.as_deref(), Some("SALE-7"));

        let err = client.dashboard().await.unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }
}
