//! # View Models
//!
//! Pure functions from backend records to what a front end renders. No I/O
//! happens here; the controller fetches, these functions shape.
//!
//! ## Module Tables
//! ```text
//! ┌─────────────┬──────────────────────────────────────────────┐
//! │ Module      │ Columns                                      │
//! ├─────────────┼──────────────────────────────────────────────┤
//! │ suppliers   │ ID, Name, Contact, Email, Status             │
//! │ customers   │ ID, Name, Contact, Email, Status             │
//! │ items       │ ID, Name, Unit, Stock                        │
//! │ purchases   │ ID, Date, Supplier, Total                    │
//! │ sales       │ ID, Date, Customer, Total                    │
//! │ cashflow    │ ID, Date, Type, Amount, Description          │
//! │ reports     │ Date, Item, Type, Quantity, Reference        │
//! └─────────────┴──────────────────────────────────────────────┘
//! ```
//!
//! Absent optional text renders as `-`. Amounts render as
//! `<prefix><amount:.2>`, e.g. `TK1250.00`.

use serde::Serialize;

use bizdesk_core::{
    AmountPoint, CashFlow, DashboardSummary, FlowType, Item, LedgerEntry, Money, Party, Purchase,
    PurchaseDocument, Sale, SaleDocument,
};

/// Placeholder for empty optional columns.
pub const EMPTY_CELL: &str = "-";

/// Label of the "no filter" entry in the report item selector.
pub const ALL_ITEMS_LABEL: &str = "All Items";

// =============================================================================
// View Types
// =============================================================================

/// A rendered table: header row plus string cells.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TableView {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl TableView {
    pub fn new(headers: &[&str]) -> Self {
        TableView {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        debug_assert_eq!(row.len(), self.headers.len());
        self.rows.push(row);
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

/// One entry of a picker. `value` is `None` for placeholder/"all" entries.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectOption {
    pub value: Option<i64>,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: i64, label: impl Into<String>) -> Self {
        SelectOption {
            value: Some(value),
            label: label.into(),
        }
    }

    pub fn placeholder(label: impl Into<String>) -> Self {
        SelectOption {
            value: None,
            label: label.into(),
        }
    }
}

/// Dashboard cards and chart data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub total_sales: String,
    pub total_purchases: String,
    pub net_cashflow: String,
    pub total_items: String,
    /// Recent sales, (date, amount), line chart.
    pub sales_series: Vec<AmountPoint>,
    /// Recent purchases, (date, amount), bar chart.
    pub purchase_series: Vec<AmountPoint>,
    /// Sum of recent IN amounts.
    pub inflow: Money,
    /// Sum of recent OUT amounts.
    pub outflow: Money,
}

/// Inventory report: item selector plus ledger table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportView {
    pub item_options: Vec<SelectOption>,
    pub selected_item: Option<i64>,
    pub ledger: TableView,
}

/// Whatever a module renders.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModuleView {
    Dashboard(DashboardView),
    Table(TableView),
    Report(ReportView),
}

impl ModuleView {
    /// The table, for modules that render one.
    pub fn table(&self) -> Option<&TableView> {
        match self {
            ModuleView::Table(table) => Some(table),
            ModuleView::Report(report) => Some(&report.ledger),
            ModuleView::Dashboard(_) => None,
        }
    }
}

// =============================================================================
// Builders
// =============================================================================

fn or_dash(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => EMPTY_CELL.to_string(),
    }
}

fn amount(value: f64, prefix: &str) -> String {
    Money::from_amount(value).format_with(prefix)
}

pub fn dashboard_view(summary: &DashboardSummary, prefix: &str) -> DashboardView {
    let split = |direction: FlowType| -> Money {
        summary
            .cashflow_data
            .iter()
            .filter(|p| p.flow_type == direction)
            .map(|p| Money::from_amount(p.amount))
            .sum()
    };

    DashboardView {
        total_sales: amount(summary.total_sales, prefix),
        total_purchases: amount(summary.total_purchases, prefix),
        net_cashflow: amount(summary.net_cashflow, prefix),
        total_items: summary.total_items.to_string(),
        sales_series: summary.sales_data.clone(),
        purchase_series: summary.purchase_data.clone(),
        inflow: split(FlowType::In),
        outflow: split(FlowType::Out),
    }
}

/// Suppliers and customers share one layout.
pub fn party_table(parties: &[Party]) -> TableView {
    let mut table = TableView::new(&["ID", "Name", "Contact", "Email", "Status"]);
    for p in parties {
        table.push_row(vec![
            p.id.to_string(),
            p.name.clone(),
            or_dash(p.contact.as_deref()),
            or_dash(p.email.as_deref()),
            p.status.to_string(),
        ]);
    }
    table
}

pub fn item_table(items: &[Item]) -> TableView {
    let mut table = TableView::new(&["ID", "Name", "Unit", "Stock"]);
    for i in items {
        table.push_row(vec![
            i.id.to_string(),
            i.name.clone(),
            or_dash(i.unit_of_measure.as_deref()),
            i.current_stock.to_string(),
        ]);
    }
    table
}

pub fn purchase_table(purchases: &[Purchase], prefix: &str) -> TableView {
    let mut table = TableView::new(&["ID", "Date", "Supplier", "Total"]);
    for p in purchases {
        table.push_row(vec![
            p.id.to_string(),
            p.purchase_date.to_string(),
            p.supplier_id.to_string(),
            amount(p.total_amount, prefix),
        ]);
    }
    table
}

pub fn sale_table(sales: &[Sale], prefix: &str) -> TableView {
    let mut table = TableView::new(&["ID", "Date", "Customer", "Total"]);
    for s in sales {
        table.push_row(vec![
            s.id.to_string(),
            s.sales_date.to_string(),
            s.customer_id.to_string(),
            amount(s.total_amount, prefix),
        ]);
    }
    table
}

pub fn cashflow_table(flows: &[CashFlow], prefix: &str) -> TableView {
    let mut table = TableView::new(&["ID", "Date", "Type", "Amount", "Description"]);
    for c in flows {
        table.push_row(vec![
            c.id.to_string(),
            c.transaction_date.to_string(),
            c.flow_type.to_string(),
            amount(c.amount, prefix),
            or_dash(c.description.as_deref()),
        ]);
    }
    table
}

pub fn ledger_table(entries: &[LedgerEntry]) -> TableView {
    let mut table = TableView::new(&["Date", "Item", "Type", "Quantity", "Reference"]);
    for l in entries {
        table.push_row(vec![
            l.movement_date.to_string(),
            l.item_id.to_string(),
            l.movement_type.to_string(),
            l.quantity.to_string(),
            or_dash(l.movement_reference.as_deref()),
        ]);
    }
    table
}

pub fn report_view(items: &[Item], selected_item: Option<i64>, ledger: &[LedgerEntry]) -> ReportView {
    let mut item_options = vec![SelectOption::placeholder(ALL_ITEMS_LABEL)];
    item_options.extend(items.iter().map(|i| SelectOption::new(i.id, i.name.clone())));

    ReportView {
        item_options,
        selected_item,
        ledger: ledger_table(ledger),
    }
}

// =============================================================================
// Pickers
// =============================================================================

/// Supplier/customer picker, headed by a placeholder such as "Select Supplier".
pub fn party_options(parties: &[Party], placeholder: &str) -> Vec<SelectOption> {
    std::iter::once(SelectOption::placeholder(placeholder))
        .chain(parties.iter().map(|p| SelectOption::new(p.id, p.name.clone())))
        .collect()
}

/// Item picker. Sale forms show the stock on hand next to the name.
pub fn item_options(items: &[Item], with_stock: bool) -> Vec<SelectOption> {
    items
        .iter()
        .map(|i| {
            let label = if with_stock {
                format!("{} (Stock: {})", i.name, i.current_stock)
            } else {
                i.name.clone()
            };
            SelectOption::new(i.id, label)
        })
        .collect()
}

// =============================================================================
// Detail Summaries
// =============================================================================

pub fn purchase_summary(doc: &PurchaseDocument, prefix: &str) -> String {
    format!(
        "Purchase #{}\nSupplier: {}\nTotal: {}",
        doc.master.id,
        doc.master.supplier_id,
        amount(doc.master.total_amount, prefix)
    )
}

pub fn sale_summary(doc: &SaleDocument, prefix: &str) -> String {
    format!(
        "Sale #{}\nCustomer: {}\nTotal: {}",
        doc.master.id,
        doc.master.customer_id,
        amount(doc.master.total_amount, prefix)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use bizdesk_core::{CashFlowPoint, Status};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn party(id: i64, name: &str, contact: Option<&str>) -> Party {
        Party {
            id,
            name: name.into(),
            contact: contact.map(str::to_string),
            email: Some(String::new()),
            address: None,
            status: Status::Active,
            created_at: None,
            updated_at: None,
        }
    }

    fn item(id: i64, name: &str, stock: f64) -> Item {
        Item {
            id,
            name: name.into(),
            unit_of_measure: None,
            current_stock: stock,
            image: None,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_dashboard_view() {
        let summary = DashboardSummary {
            total_sales: 1250.0,
            total_purchases: 800.456,
            net_cashflow: -25.5,
            total_items: 12,
            sales_data: vec![AmountPoint {
                date: "2024-05-01".into(),
                amount: 300.0,
            }],
            purchase_data: vec![],
            cashflow_data: vec![
                CashFlowPoint {
                    date: "2024-05-01".into(),
                    flow_type: FlowType::In,
                    amount: 100.1,
                },
                CashFlowPoint {
                    date: "2024-05-02".into(),
                    flow_type: FlowType::In,
                    amount: 0.2,
                },
                CashFlowPoint {
                    date: "2024-05-02".into(),
                    flow_type: FlowType::Out,
                    amount: 40.0,
                },
            ],
        };

        let view = dashboard_view(&summary, "TK");
        assert_eq!(view.total_sales, "TK1250.00");
        assert_eq!(view.total_purchases, "TK800.46");
        assert_eq!(view.net_cashflow, "-TK25.50");
        assert_eq!(view.total_items, "12");
        assert_eq!(view.sales_series.len(), 1);
        assert_eq!(view.inflow, Money::from_minor(10030));
        assert_eq!(view.outflow, Money::from_minor(4000));
    }

    #[test]
    fn test_party_table_dashes_absent_fields() {
        let table = party_table(&[party(1, "Acme", Some("017")), party(2, "Bolt", None)]);
        assert_eq!(table.headers, vec!["ID", "Name", "Contact", "Email", "Status"]);
        assert_eq!(table.rows[0], vec!["1", "Acme", "017", "-", "Active"]);
        assert_eq!(table.rows[1][2], "-");
    }

    #[test]
    fn test_money_and_quantity_cells() {
        let purchases = [Purchase {
            id: 3,
            purchase_date: date(2024, 1, 9),
            supplier_id: 2,
            total_amount: 99.5,
            created_by: None,
            created_at: None,
        }];
        assert_eq!(
            purchase_table(&purchases, "TK").rows[0],
            vec!["3", "2024-01-09", "2", "TK99.50"]
        );

        let items = item_table(&[item(1, "Rice", 4.0), item(2, "Oil", 2.5)]);
        assert_eq!(items.rows[0][3], "4");
        assert_eq!(items.rows[1][3], "2.5");
    }

    #[test]
    fn test_report_view_options() {
        let view = report_view(&[item(1, "Rice", 4.0)], None, &[]);
        assert_eq!(view.item_options[0], SelectOption::placeholder("All Items"));
        assert_eq!(view.item_options[1], SelectOption::new(1, "Rice"));
        assert!(view.ledger.is_empty());
    }

    #[test]
    fn test_item_options_with_stock() {
        let options = item_options(&[item(7, "Sugar", 3.0)], true);
        assert_eq!(options[0].label, "Sugar (Stock: 3)");
        assert_eq!(options[0].value, Some(7));
    }

    #[test]
    fn test_summaries() {
        let doc = SaleDocument {
            master: Sale {
                id: 4,
                sales_date: date(2024, 5, 6),
                customer_id: 2,
                total_amount: 150.5,
                created_by: None,
                created_at: None,
            },
            details: vec![],
        };
        assert_eq!(sale_summary(&doc, "TK"), "Sale #4\nCustomer: 2\nTotal: TK150.50");
    }
}
