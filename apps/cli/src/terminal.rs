//! Plain-text `Ui` for the terminal.
//!
//! Views go to `out` (stdout), notifications and prompts to `err` (stderr),
//! so `bizdesk show items > items.txt` captures only the table.

use std::io::{self, Write};
use tracing::debug;

use bizdesk_client::views::{DashboardView, ReportView, TableView, ALL_ITEMS_LABEL};
use bizdesk_client::{ModuleView, Ui};
use bizdesk_core::{Module, Money};

pub struct TerminalUi<W: Write, E: Write> {
    out: W,
    err: E,
    currency_prefix: String,
}

impl TerminalUi<io::Stdout, io::Stderr> {
    pub fn stdio() -> Self {
        TerminalUi::new(io::stdout(), io::stderr())
    }
}

impl<W: Write, E: Write> TerminalUi<W, E> {
    pub fn new(out: W, err: E) -> Self {
        TerminalUi {
            out,
            err,
            currency_prefix: bizdesk_core::CURRENCY_PREFIX.to_string(),
        }
    }

    pub fn with_currency_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.currency_prefix = prefix.into();
        self
    }

    pub fn into_parts(self) -> (W, E) {
        (self.out, self.err)
    }

    fn money(&self, amount: f64) -> String {
        Money::from_amount(amount).format_with(&self.currency_prefix)
    }

    fn write_table(&mut self, table: &TableView) -> io::Result<()> {
        if table.is_empty() {
            return writeln!(self.out, "(no records)");
        }

        let mut widths: Vec<usize> = table.headers.iter().map(|h| h.chars().count()).collect();
        for row in &table.rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        write_row(&mut self.out, &table.headers, &widths)?;
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        write_row(&mut self.out, &rule, &widths)?;
        for row in &table.rows {
            write_row(&mut self.out, row, &widths)?;
        }
        Ok(())
    }

    fn write_dashboard(&mut self, view: &DashboardView) -> io::Result<()> {
        writeln!(self.out, "Total Sales      {}", view.total_sales)?;
        writeln!(self.out, "Total Purchases  {}", view.total_purchases)?;
        writeln!(self.out, "Net Cash Flow    {}", view.net_cashflow)?;
        writeln!(self.out, "Total Items      {}", view.total_items)?;

        for (heading, series) in [
            ("Recent Sales", &view.sales_series),
            ("Recent Purchases", &view.purchase_series),
        ] {
            writeln!(self.out)?;
            writeln!(self.out, "{}", heading)?;
            if series.is_empty() {
                writeln!(self.out, "  (none)")?;
            }
            for point in series {
                let amount = self.money(point.amount);
                writeln!(self.out, "  {}  {}", point.date, amount)?;
            }
        }

        writeln!(self.out)?;
        writeln!(
            self.out,
            "Cash Flow        Inflow {}  Outflow {}",
            view.inflow.format_with(&self.currency_prefix),
            view.outflow.format_with(&self.currency_prefix)
        )
    }

    fn write_report(&mut self, view: &ReportView) -> io::Result<()> {
        let label = view
            .item_options
            .iter()
            .find(|o| o.value == view.selected_item)
            .map(|o| o.label.as_str())
            .unwrap_or(ALL_ITEMS_LABEL);
        writeln!(self.out, "Inventory ledger: {}", label)?;
        writeln!(self.out)?;
        self.write_table(&view.ledger)
    }
}

fn write_row<W: Write>(out: &mut W, cells: &[String], widths: &[usize]) -> io::Result<()> {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
        .collect();
    writeln!(out, "{}", padded.join("  ").trim_end())
}

/// Reads the login password without echoing it.
pub fn prompt_password() -> dialoguer::Result<String> {
    dialoguer::Password::new().with_prompt("Password").interact()
}

fn log_failure(result: io::Result<()>) {
    if let Err(e) = result {
        debug!(error = %e, "Terminal write failed");
    }
}

impl<W: Write, E: Write> Ui for TerminalUi<W, E> {
    fn show_login(&mut self) {
        log_failure(writeln!(
            self.err,
            "Not logged in. Run `bizdesk login --username <name> --role <role>`."
        ));
    }

    fn show_main(&mut self, role: &str) {
        log_failure(writeln!(self.err, "Logged in as {}", role));
    }

    fn show_module(&mut self, module: Module, view: ModuleView) {
        let result = writeln!(self.out, "== {} ==", module.title()).and_then(|_| match &view {
            ModuleView::Dashboard(d) => self.write_dashboard(d),
            ModuleView::Table(t) => self.write_table(t),
            ModuleView::Report(r) => self.write_report(r),
        });
        log_failure(result);
    }

    fn show_detail(&mut self, text: &str) {
        log_failure(writeln!(self.out, "{}", text));
    }

    fn notify(&mut self, message: &str) {
        log_failure(writeln!(self.err, "error: {}", message));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bizdesk_client::views::SelectOption;
    use bizdesk_core::AmountPoint;

    fn ui() -> TerminalUi<Vec<u8>, Vec<u8>> {
        TerminalUi::new(Vec::new(), Vec::new())
    }

    fn output(ui: TerminalUi<Vec<u8>, Vec<u8>>) -> (String, String) {
        let (out, err) = ui.into_parts();
        (String::from_utf8(out).unwrap(), String::from_utf8(err).unwrap())
    }

    #[test]
    fn test_table_alignment() {
        let mut table = TableView::new(&["ID", "Name", "Stock"]);
        table.push_row(vec!["1".into(), "Rice".into(), "40".into()]);
        table.push_row(vec!["12".into(), "Mustard Oil".into(), "2.5".into()]);

        let mut ui = ui();
        ui.show_module(Module::Items, ModuleView::Table(table));
        let (out, err) = output(ui);

        assert_eq!(
            out,
            "== Items ==\n\
             ID  Name         Stock\n\
             --  -----------  -----\n\
             1   Rice         40\n\
             12  Mustard Oil  2.5\n"
        );
        assert!(err.is_empty());
    }

    #[test]
    fn test_empty_table() {
        let mut ui = ui();
        ui.show_module(Module::Sales, ModuleView::Table(TableView::new(&["ID"])));
        assert_eq!(output(ui).0, "== Sales ==\n(no records)\n");
    }

    #[test]
    fn test_notifications_go_to_stderr() {
        let mut ui = ui();
        ui.notify("Name required");
        ui.show_detail("Purchase #7\nSupplier: 3\nTotal: TK5.00");
        let (out, err) = output(ui);
        assert_eq!(err, "error: Name required\n");
        assert_eq!(out, "Purchase #7\nSupplier: 3\nTotal: TK5.00\n");
    }

    #[test]
    fn test_dashboard() {
        let view = DashboardView {
            total_sales: "TK10.00".into(),
            total_purchases: "TK4.00".into(),
            net_cashflow: "TK6.00".into(),
            total_items: "3".into(),
            sales_series: vec![AmountPoint {
                date: "2024-05-01".into(),
                amount: 10.0,
            }],
            purchase_series: vec![],
            inflow: Money::from_minor(1000),
            outflow: Money::from_minor(400),
        };

        let mut ui = ui();
        ui.show_module(Module::Dashboard, ModuleView::Dashboard(view));
        let out = output(ui).0;
        assert!(out.contains("Total Sales      TK10.00"));
        assert!(out.contains("  2024-05-01  TK10.00"));
        assert!(out.contains("Recent Purchases\n  (none)"));
        assert!(out.contains("Inflow TK10.00  Outflow TK4.00"));
    }

    #[test]
    fn test_report_names_selected_item() {
        let view = ReportView {
            item_options: vec![
                SelectOption::placeholder(ALL_ITEMS_LABEL),
                SelectOption::new(3, "Rice"),
            ],
            selected_item: Some(3),
            ledger: TableView::new(&["Date"]),
        };

        let mut ui = ui();
        ui.show_module(Module::Reports, ModuleView::Report(view));
        assert!(output(ui).0.contains("Inventory ledger: Rice"));
    }
}
