//! Runs one parsed command against the controller.
//!
//! Failures have already been shown by the time they reach the caller (a
//! notification or the login prompt), so the only thing left to decide is
//! the exit status.

use chrono::{Local, NaiveDate};
use tracing::debug;

use bizdesk_client::{ApiError, Dashboard, Ui};
use bizdesk_core::{CashFlowInput, ItemInput, OrderDraft, PartyInput};

use crate::cli::{
    CashFlowAction, Command, ItemAction, PartyAction, PartyFields, PurchaseAction, ReportCommand,
    SaleAction,
};
use crate::terminal;

/// A command that did not complete. The user has already been told why.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandFailed;

impl From<ApiError> for CommandFailed {
    fn from(err: ApiError) -> Self {
        debug!(error = %err, "Command failed");
        CommandFailed
    }
}

pub type CommandResult = Result<(), CommandFailed>;

#[derive(Clone, Copy)]
enum Party {
    Supplier,
    Customer,
}

impl Party {
    fn label(self) -> &'static str {
        match self {
            Party::Supplier => "Supplier",
            Party::Customer => "Customer",
        }
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn not_found<U: Ui>(app: &mut Dashboard<U>, what: &str, id: i64) -> CommandResult {
    app.ui_mut().notify(&format!("{} #{} not found", what, id));
    Err(CommandFailed)
}

pub async fn run<U: Ui>(app: &mut Dashboard<U>, command: Command) -> CommandResult {
    match command {
        Command::Login {
            username,
            password,
            role,
        } => {
            let password = match password {
                Some(password) => password,
                None => match terminal::prompt_password() {
                    Ok(password) => password,
                    Err(e) => {
                        app.ui_mut().notify(&format!("Could not read password: {}", e));
                        return Err(CommandFailed);
                    }
                },
            };
            app.login(&username, &password, &role).await?;
            Ok(())
        }
        Command::Logout => {
            app.logout().await;
            Ok(())
        }
        Command::Whoami => match app.client().session().role().await {
            Some(role) => {
                app.ui_mut().show_main(&role);
                Ok(())
            }
            None => {
                app.ui_mut().show_login();
                Err(CommandFailed)
            }
        },
        Command::Show { module } => match app.navigate(&module).await {
            Some(result) => Ok(result?),
            None => Ok(()),
        },
        Command::Supplier { action } => party(app, Party::Supplier, action).await,
        Command::Customer { action } => party(app, Party::Customer, action).await,
        Command::Item { action } => item(app, action).await,
        Command::Cashflow { action } => cashflow(app, action).await,
        Command::Purchase { action } => purchase(app, action).await,
        Command::Sale { action } => sale(app, action).await,
        Command::Report {
            report: ReportCommand::Inventory { item },
        } => Ok(app.inventory_report(item).await?),
    }
}

fn overlay_party(input: &mut PartyInput, name: Option<String>, fields: PartyFields) {
    if let Some(name) = name {
        input.name = name;
    }
    if fields.contact.is_some() {
        input.contact = fields.contact;
    }
    if fields.email.is_some() {
        input.email = fields.email;
    }
    if fields.address.is_some() {
        input.address = fields.address;
    }
    if let Some(status) = fields.status {
        input.status = status;
    }
}

async fn party<U: Ui>(app: &mut Dashboard<U>, kind: Party, action: PartyAction) -> CommandResult {
    match action {
        PartyAction::Add { name, fields } => {
            let mut input = PartyInput {
                name,
                ..Default::default()
            };
            overlay_party(&mut input, None, fields);
            match kind {
                Party::Supplier => app.save_supplier(None, &input).await?,
                Party::Customer => app.save_customer(None, &input).await?,
            };
        }
        PartyAction::Update { id, name, fields } => {
            let existing = match kind {
                Party::Supplier => app.find_supplier(id).await?,
                Party::Customer => app.find_customer(id).await?,
            };
            let Some(existing) = existing else {
                return not_found(app, kind.label(), id);
            };

            let mut input = PartyInput::from(&existing);
            overlay_party(&mut input, name, fields);
            match kind {
                Party::Supplier => app.save_supplier(Some(id), &input).await?,
                Party::Customer => app.save_customer(Some(id), &input).await?,
            };
        }
        PartyAction::Delete { id } => match kind {
            Party::Supplier => app.delete_supplier(id).await?,
            Party::Customer => app.delete_customer(id).await?,
        },
    }
    Ok(())
}

async fn item<U: Ui>(app: &mut Dashboard<U>, action: ItemAction) -> CommandResult {
    match action {
        ItemAction::Add { name, unit, stock } => {
            let input = ItemInput {
                name,
                unit_of_measure: unit,
                current_stock: stock,
            };
            app.save_item(None, &input).await?;
        }
        ItemAction::Update {
            id,
            name,
            unit,
            stock,
        } => {
            let Some(existing) = app.find_item(id).await? else {
                return not_found(app, "Item", id);
            };
            let mut input = ItemInput::from(&existing);
            if let Some(name) = name {
                input.name = name;
            }
            if unit.is_some() {
                input.unit_of_measure = unit;
            }
            if let Some(stock) = stock {
                input.current_stock = stock;
            }
            app.save_item(Some(id), &input).await?;
        }
        ItemAction::Delete { id } => app.delete_item(id).await?,
    }
    Ok(())
}

async fn cashflow<U: Ui>(app: &mut Dashboard<U>, action: CashFlowAction) -> CommandResult {
    match action {
        CashFlowAction::Add {
            date,
            flow_type,
            amount,
            description,
        } => {
            let input = CashFlowInput {
                transaction_date: date.unwrap_or_else(today),
                flow_type,
                amount,
                description,
                ref_id: None,
            };
            app.save_cashflow(None, &input).await?;
        }
        CashFlowAction::Update {
            id,
            date,
            flow_type,
            amount,
            description,
        } => {
            let Some(existing) = app.find_cashflow(id).await? else {
                return not_found(app, "Cash flow entry", id);
            };
            let mut input = CashFlowInput::from(&existing);
            if let Some(date) = date {
                input.transaction_date = date;
            }
            if let Some(flow_type) = flow_type {
                input.flow_type = flow_type;
            }
            if let Some(amount) = amount {
                input.amount = amount;
            }
            if description.is_some() {
                input.description = description;
            }
            app.save_cashflow(Some(id), &input).await?;
        }
        CashFlowAction::Delete { id } => app.delete_cashflow(id).await?,
    }
    Ok(())
}

async fn purchase<U: Ui>(app: &mut Dashboard<U>, action: PurchaseAction) -> CommandResult {
    match action {
        PurchaseAction::Create {
            supplier,
            date,
            lines,
        } => {
            let draft = OrderDraft::from_lines(lines);
            app.submit_purchase(date.unwrap_or_else(today), supplier, draft)
                .await?;
        }
        PurchaseAction::View { id } => app.view_purchase(id).await?,
    }
    Ok(())
}

async fn sale<U: Ui>(app: &mut Dashboard<U>, action: SaleAction) -> CommandResult {
    match action {
        SaleAction::Create {
            customer,
            date,
            lines,
        } => {
            let draft = OrderDraft::from_lines(lines);
            app.submit_sale(date.unwrap_or_else(today), customer, draft)
                .await?;
        }
        SaleAction::View { id } => app.view_sale(id).await?,
    }
    Ok(())
}
