//! # Modules
//!
//! The closed set of top-level sections the client can navigate to.
//!
//! Navigation is a plain dispatch keyed by name: there are no transitions or
//! guards, any module can be shown from any other. A name outside the set
//! parses to `CoreError::UnknownModule` and callers treat that as a no-op.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// A top-level UI section with its own data loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Module {
    Dashboard,
    Suppliers,
    Customers,
    Items,
    Purchases,
    Sales,
    CashFlow,
    Reports,
}

impl Module {
    /// Every module, in navigation-bar order.
    pub const ALL: [Module; 8] = [
        Module::Dashboard,
        Module::Suppliers,
        Module::Customers,
        Module::Items,
        Module::Purchases,
        Module::Sales,
        Module::CashFlow,
        Module::Reports,
    ];

    /// The name used for dispatch.
    pub const fn name(&self) -> &'static str {
        match self {
            Module::Dashboard => "dashboard",
            Module::Suppliers => "suppliers",
            Module::Customers => "customers",
            Module::Items => "items",
            Module::Purchases => "purchases",
            Module::Sales => "sales",
            Module::CashFlow => "cashflow",
            Module::Reports => "reports",
        }
    }

    /// Heading shown above the module's view.
    pub const fn title(&self) -> &'static str {
        match self {
            Module::Dashboard => "Dashboard",
            Module::Suppliers => "Suppliers",
            Module::Customers => "Customers",
            Module::Items => "Items",
            Module::Purchases => "Purchases",
            Module::Sales => "Sales",
            Module::CashFlow => "Cash Flow",
            Module::Reports => "Reports",
        }
    }

    /// Looks a name up in the dispatch table. Exact, lowercase match only.
    pub fn lookup(name: &str) -> Option<Module> {
        Module::ALL.into_iter().find(|m| m.name() == name)
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Module {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Module::lookup(s).ok_or_else(|| CoreError::UnknownModule(s.to_string()))
    }
}
