//! # Dashboard Controller
//!
//! Ties the API client to a [`Ui`]: navigation dispatch, per-module loaders,
//! and the save/delete/submit actions.
//!
//! ## Failure Presentation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Dashboard::report(result)                            │
//! │                                                                         │
//! │   Ok(value)                 ──► returned as is                          │
//! │   Err(Unauthorized)         ──► ui.show_login()    (no message)         │
//! │   Err(Rejected{message})    ──► ui.notify(message)                      │
//! │   Err(Transport)            ──► ui.notify("Network error. ...")         │
//! │   Err(Decode)               ──► ui.notify("Unexpected response ...")    │
//! │                                                                         │
//! │   The error is still returned so callers can stop (no follow-up work    │
//! │   runs on a failed result).                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every action reports its own failure exactly once. A successful save,
//! delete or submit reloads the affected module.

use chrono::NaiveDate;
use tracing::{debug, info};

use bizdesk_core::{
    CashFlow, CashFlowInput, Customer, Item, ItemInput, Module, OrderDraft, PartyInput, Purchase,
    Sale, Session, Supplier,
};

use crate::api::ApiClient;
use crate::error::{ApiError, ApiResult};
use crate::resources::{
    CashFlows, Customers, Editable, Items, Purchases, Resource, Sales, Suppliers,
};
use crate::ui::Ui;
use crate::views::{self, ModuleView, SelectOption};

/// Interactive controller over one client and one front end.
pub struct Dashboard<U: Ui> {
    client: ApiClient,
    ui: U,
    currency_prefix: String,
    active: Option<Module>,
}

impl<U: Ui> Dashboard<U> {
    pub fn new(client: ApiClient, ui: U) -> Self {
        Dashboard {
            client,
            ui,
            currency_prefix: bizdesk_core::CURRENCY_PREFIX.to_string(),
            active: None,
        }
    }

    /// Overrides the prefix used for amounts (default `TK`).
    pub fn with_currency_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.currency_prefix = prefix.into();
        self
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn ui(&self) -> &U {
        &self.ui
    }

    pub fn ui_mut(&mut self) -> &mut U {
        &mut self.ui
    }

    pub fn into_ui(self) -> U {
        self.ui
    }

    /// The module currently on screen.
    pub fn active_module(&self) -> Option<Module> {
        self.active
    }

    // =========================================================================
    // Session
    // =========================================================================

    /// Shows the main view if a session was restored, the login view otherwise.
    pub async fn startup(&mut self) -> ApiResult<()> {
        match self.client.session().role().await {
            Some(role) => {
                self.ui.show_main(&role);
                self.open(Module::Dashboard).await
            }
            None => {
                self.ui.show_login();
                Ok(())
            }
        }
    }

    /// Logs in, then shows the main view with the dashboard.
    pub async fn login(&mut self, username: &str, password: &str, role: &str) -> ApiResult<Session> {
        let result = self.client.login(username, password, role).await;
        let session = self.report(result)?;

        self.ui.show_main(&session.role);
        // A failing dashboard does not undo the login; it has been reported.
        let _ = self.open(Module::Dashboard).await;
        Ok(session)
    }

    pub async fn logout(&mut self) {
        self.client.logout().await;
        self.active = None;
        self.ui.show_login();
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Dispatches on a module name.
    ///
    /// Returns `None` for a name outside the module set: nothing is shown
    /// and no loader runs.
    pub async fn navigate(&mut self, name: &str) -> Option<ApiResult<()>> {
        let Some(module) = Module::lookup(name) else {
            debug!(name, "Ignoring unknown module");
            return None;
        };
        Some(self.open(module).await)
    }

    /// Makes `module` the visible one and runs its loader.
    pub async fn open(&mut self, module: Module) -> ApiResult<()> {
        let result = self.load(module).await;
        let view = self.report(result)?;
        self.ui.show_module(module, view);
        self.active = Some(module);
        Ok(())
    }

    async fn load(&self, module: Module) -> ApiResult<ModuleView> {
        let prefix = self.currency_prefix.as_str();
        let client = &self.client;

        let view = match module {
            Module::Dashboard => {
                let summary = client.dashboard().await?;
                ModuleView::Dashboard(views::dashboard_view(&summary, prefix))
            }
            Module::Suppliers => {
                ModuleView::Table(views::party_table(&client.list::<Suppliers>().await?))
            }
            Module::Customers => {
                ModuleView::Table(views::party_table(&client.list::<Customers>().await?))
            }
            Module::Items => ModuleView::Table(views::item_table(&client.list::<Items>().await?)),
            Module::Purchases => {
                let purchases = client.list::<Purchases>().await?;
                ModuleView::Table(views::purchase_table(&purchases, prefix))
            }
            Module::Sales => {
                ModuleView::Table(views::sale_table(&client.list::<Sales>().await?, prefix))
            }
            Module::CashFlow => {
                let flows = client.list::<CashFlows>().await?;
                ModuleView::Table(views::cashflow_table(&flows, prefix))
            }
            Module::Reports => ModuleView::Report(self.load_report(None).await?),
        };
        Ok(view)
    }

    async fn load_report(&self, item_id: Option<i64>) -> ApiResult<views::ReportView> {
        let items = self.client.list::<Items>().await?;
        let ledger = self.client.inventory(item_id).await?;
        Ok(views::report_view(&items, item_id, &ledger))
    }

    /// Regenerates the inventory report for one item, or all of them.
    pub async fn inventory_report(&mut self, item_id: Option<i64>) -> ApiResult<()> {
        self.active = Some(Module::Reports);
        let result = self.load_report(item_id).await;
        let view = self.report(result)?;
        self.ui.show_module(Module::Reports, ModuleView::Report(view));
        Ok(())
    }

    // =========================================================================
    // Editable Collections
    // =========================================================================

    /// Creates when `id` is `None`, updates otherwise, then reloads.
    async fn save<R: Editable>(
        &mut self,
        module: Module,
        id: Option<i64>,
        input: &R::Input,
    ) -> ApiResult<R::Record> {
        let result = match id {
            Some(id) => self.client.update::<R>(id, input).await,
            None => self.client.create::<R>(input).await,
        };
        let record = self.report(result)?;
        info!(path = R::PATH, ?id, "Saved");
        let _ = self.open(module).await;
        Ok(record)
    }

    async fn delete<R: Editable>(&mut self, module: Module, id: i64) -> ApiResult<()> {
        let result = self.client.remove::<R>(id).await;
        self.report(result)?;
        info!(path = R::PATH, id, "Deleted");
        let _ = self.open(module).await;
        Ok(())
    }

    async fn find<R, F>(&mut self, id: i64, id_of: F) -> ApiResult<Option<R::Record>>
    where
        R: Resource,
        F: Fn(&R::Record) -> i64,
    {
        let result = self.client.find::<R, F>(id, id_of).await;
        self.report(result)
    }

    pub async fn save_supplier(&mut self, id: Option<i64>, input: &PartyInput) -> ApiResult<Supplier> {
        self.save::<Suppliers>(Module::Suppliers, id, input).await
    }

    pub async fn delete_supplier(&mut self, id: i64) -> ApiResult<()> {
        self.delete::<Suppliers>(Module::Suppliers, id).await
    }

    /// Record for pre-filling an edit form.
    pub async fn find_supplier(&mut self, id: i64) -> ApiResult<Option<Supplier>> {
        self.find::<Suppliers, _>(id, |s| s.id).await
    }

    pub async fn save_customer(&mut self, id: Option<i64>, input: &PartyInput) -> ApiResult<Customer> {
        self.save::<Customers>(Module::Customers, id, input).await
    }

    pub async fn delete_customer(&mut self, id: i64) -> ApiResult<()> {
        self.delete::<Customers>(Module::Customers, id).await
    }

    pub async fn find_customer(&mut self, id: i64) -> ApiResult<Option<Customer>> {
        self.find::<Customers, _>(id, |c| c.id).await
    }

    pub async fn save_item(&mut self, id: Option<i64>, input: &ItemInput) -> ApiResult<Item> {
        self.save::<Items>(Module::Items, id, input).await
    }

    pub async fn delete_item(&mut self, id: i64) -> ApiResult<()> {
        self.delete::<Items>(Module::Items, id).await
    }

    pub async fn find_item(&mut self, id: i64) -> ApiResult<Option<Item>> {
        self.find::<Items, _>(id, |i| i.id).await
    }

    pub async fn save_cashflow(&mut self, id: Option<i64>, input: &CashFlowInput) -> ApiResult<CashFlow> {
        self.save::<CashFlows>(Module::CashFlow, id, input).await
    }

    pub async fn delete_cashflow(&mut self, id: i64) -> ApiResult<()> {
        self.delete::<CashFlows>(Module::CashFlow, id).await
    }

    pub async fn find_cashflow(&mut self, id: i64) -> ApiResult<Option<CashFlow>> {
        self.find::<CashFlows, _>(id, |c| c.id).await
    }

    // =========================================================================
    // Purchases & Sales
    // =========================================================================

    /// Submits the draft's valid lines (possibly none), then reloads purchases.
    pub async fn submit_purchase(
        &mut self,
        purchase_date: NaiveDate,
        supplier_id: i64,
        draft: OrderDraft,
    ) -> ApiResult<Purchase> {
        let input = draft.into_purchase(purchase_date, supplier_id);
        let result = self.client.create::<Purchases>(&input).await;
        let purchase = self.report(result)?;
        info!(id = purchase.id, lines = input.details.len(), "Purchase recorded");
        let _ = self.open(Module::Purchases).await;
        Ok(purchase)
    }

    /// Submits the draft's valid lines (possibly none), then reloads sales.
    pub async fn submit_sale(
        &mut self,
        sales_date: NaiveDate,
        customer_id: i64,
        draft: OrderDraft,
    ) -> ApiResult<Sale> {
        let input = draft.into_sale(sales_date, customer_id);
        let result = self.client.create::<Sales>(&input).await;
        let sale = self.report(result)?;
        info!(id = sale.id, lines = input.details.len(), "Sale recorded");
        let _ = self.open(Module::Sales).await;
        Ok(sale)
    }

    pub async fn view_purchase(&mut self, id: i64) -> ApiResult<()> {
        let result = self.client.fetch::<Purchases>(id).await;
        let doc = self.report(result)?;
        let text = views::purchase_summary(&doc, &self.currency_prefix);
        self.ui.show_detail(&text);
        Ok(())
    }

    pub async fn view_sale(&mut self, id: i64) -> ApiResult<()> {
        let result = self.client.fetch::<Sales>(id).await;
        let doc = self.report(result)?;
        let text = views::sale_summary(&doc, &self.currency_prefix);
        self.ui.show_detail(&text);
        Ok(())
    }

    // =========================================================================
    // Pickers
    // =========================================================================

    pub async fn supplier_options(&mut self) -> ApiResult<Vec<SelectOption>> {
        let result = self.client.list::<Suppliers>().await;
        let suppliers = self.report(result)?;
        Ok(views::party_options(&suppliers, "Select Supplier"))
    }

    pub async fn customer_options(&mut self) -> ApiResult<Vec<SelectOption>> {
        let result = self.client.list::<Customers>().await;
        let customers = self.report(result)?;
        Ok(views::party_options(&customers, "Select Customer"))
    }

    /// Item picker; `with_stock` labels each item with its stock on hand.
    pub async fn item_options(&mut self, with_stock: bool) -> ApiResult<Vec<SelectOption>> {
        let result = self.client.list::<Items>().await;
        let items = self.report(result)?;
        Ok(views::item_options(&items, with_stock))
    }

    // =========================================================================
    // Failure Presentation
    // =========================================================================

    fn report<T>(&mut self, result: ApiResult<T>) -> ApiResult<T> {
        if let Err(ref e) = result {
            match e {
                ApiError::Unauthorized => {
                    self.active = None;
                    self.ui.show_login();
                }
                other => {
                    if let Some(message) = other.user_message() {
                        self.ui.notify(&message);
                    }
                }
            }
        }
        result
    }
}
