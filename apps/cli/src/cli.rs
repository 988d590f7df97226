//! Command-line grammar.

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use bizdesk_core::{parse_date, DraftLine, FlowType, Status};

/// Client for the Bizdesk business management backend
#[derive(Parser, Debug)]
#[command(name = "bizdesk", author, version, about, long_about = None)]
pub struct Cli {
    /// Config file (defaults to the platform config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Backend base URL, e.g. http://localhost:8000/api
    #[arg(long, global = true, env = "BIZDESK_API_BASE")]
    pub api_base: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Sign in and remember the session
    ///
    /// Without --password or BIZDESK_PASSWORD the password is prompted for
    /// on the terminal, which keeps it out of the process list.
    Login {
        #[arg(long, short)]
        username: String,

        /// Visible to other users in the process list; prefer the prompt
        #[arg(long, short, env = "BIZDESK_PASSWORD", hide_env_values = true)]
        password: Option<String>,

        #[arg(long, short, default_value = "admin")]
        role: String,
    },

    /// Forget the stored session
    Logout,

    /// Show the role of the stored session
    Whoami,

    /// Show one module: dashboard, suppliers, customers, items, purchases,
    /// sales, cashflow or reports
    Show { module: String },

    /// Manage suppliers
    Supplier {
        #[command(subcommand)]
        action: PartyAction,
    },

    /// Manage customers
    Customer {
        #[command(subcommand)]
        action: PartyAction,
    },

    /// Manage items
    Item {
        #[command(subcommand)]
        action: ItemAction,
    },

    /// Manage cash flow entries
    Cashflow {
        #[command(subcommand)]
        action: CashFlowAction,
    },

    /// Record or view purchases
    Purchase {
        #[command(subcommand)]
        action: PurchaseAction,
    },

    /// Record or view sales
    Sale {
        #[command(subcommand)]
        action: SaleAction,
    },

    /// Reports
    Report {
        #[command(subcommand)]
        report: ReportCommand,
    },
}

// =============================================================================
// Suppliers & Customers
// =============================================================================

#[derive(Args, Debug, Clone, Default, PartialEq)]
pub struct PartyFields {
    #[arg(long)]
    pub contact: Option<String>,

    #[arg(long)]
    pub email: Option<String>,

    #[arg(long)]
    pub address: Option<String>,

    /// Active or Inactive
    #[arg(long)]
    pub status: Option<Status>,
}

#[derive(Subcommand, Debug)]
pub enum PartyAction {
    Add {
        #[arg(long)]
        name: String,

        #[command(flatten)]
        fields: PartyFields,
    },

    /// Change the given fields, keeping the rest
    Update {
        id: i64,

        #[arg(long)]
        name: Option<String>,

        #[command(flatten)]
        fields: PartyFields,
    },

    Delete { id: i64 },
}

// =============================================================================
// Items
// =============================================================================

#[derive(Subcommand, Debug)]
pub enum ItemAction {
    Add {
        #[arg(long)]
        name: String,

        /// Unit of measure, e.g. kg
        #[arg(long)]
        unit: Option<String>,

        #[arg(long, default_value_t = 0.0)]
        stock: f64,
    },

    /// Change the given fields, keeping the rest
    Update {
        id: i64,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        unit: Option<String>,

        #[arg(long)]
        stock: Option<f64>,
    },

    Delete { id: i64 },
}

// =============================================================================
// Cash Flow
// =============================================================================

#[derive(Subcommand, Debug)]
pub enum CashFlowAction {
    Add {
        /// YYYY-MM-DD, defaults to today
        #[arg(long, value_parser = parse_date)]
        date: Option<NaiveDate>,

        /// IN or OUT
        #[arg(long = "type")]
        flow_type: FlowType,

        #[arg(long)]
        amount: f64,

        #[arg(long)]
        description: Option<String>,
    },

    /// Change the given fields, keeping the rest
    Update {
        id: i64,

        #[arg(long, value_parser = parse_date)]
        date: Option<NaiveDate>,

        #[arg(long = "type")]
        flow_type: Option<FlowType>,

        #[arg(long)]
        amount: Option<f64>,

        #[arg(long)]
        description: Option<String>,
    },

    Delete { id: i64 },
}

// =============================================================================
// Purchases & Sales
// =============================================================================

#[derive(Subcommand, Debug)]
pub enum PurchaseAction {
    Create {
        #[arg(long)]
        supplier: i64,

        /// YYYY-MM-DD, defaults to today
        #[arg(long, value_parser = parse_date)]
        date: Option<NaiveDate>,

        /// ITEM:QTY:RATE, repeatable
        #[arg(long = "line")]
        lines: Vec<DraftLine>,
    },

    View { id: i64 },
}

#[derive(Subcommand, Debug)]
pub enum SaleAction {
    Create {
        #[arg(long)]
        customer: i64,

        /// YYYY-MM-DD, defaults to today
        #[arg(long, value_parser = parse_date)]
        date: Option<NaiveDate>,

        /// ITEM:QTY:RATE, repeatable
        #[arg(long = "line")]
        lines: Vec<DraftLine>,
    },

    View { id: i64 },
}

// =============================================================================
// Reports
// =============================================================================

#[derive(Subcommand, Debug)]
pub enum ReportCommand {
    /// Inventory ledger, for one item or all
    Inventory {
        #[arg(long)]
        item: Option<i64>,
    },
}
