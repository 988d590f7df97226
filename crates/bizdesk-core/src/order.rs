//! # Order Drafts
//!
//! A purchase or sale being composed before it is submitted.
//!
//! ## Draft Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Draft → Submission                                 │
//! │                                                                         │
//! │  open modal ──► OrderDraft::new()        (no lines)                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  add_line() / set_item() / set_quantity() / set_rate() / remove_line() │
//! │       │            running total() = Σ quantity × rate                  │
//! │       ▼                                                                 │
//! │  submit ──► valid_lines()                                              │
//! │               keeps: item chosen AND quantity > 0 AND rate > 0          │
//! │               drops: everything else, silently                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  POST with details = valid lines (may be an empty list)                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The filter is the only client-side check. Stock levels, totals and
//! foreign keys are the backend's business.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::CoreError;
use crate::money::Money;
use crate::types::{LineItem, PurchaseInput, SaleInput};

// =============================================================================
// Draft Line
// =============================================================================

/// One editable row. Every field starts empty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DraftLine {
    pub item_id: Option<i64>,
    pub quantity: Option<f64>,
    pub rate: Option<f64>,
}

impl DraftLine {
    /// A fully specified line.
    pub fn new(item_id: i64, quantity: f64, rate: f64) -> Self {
        DraftLine {
            item_id: Some(item_id),
            quantity: Some(quantity),
            rate: Some(rate),
        }
    }

    /// Line total; absent fields count as zero.
    pub fn total(&self) -> Money {
        Money::line_total(self.quantity.unwrap_or(0.0), self.rate.unwrap_or(0.0))
    }

    /// Converts to a submittable line if item, quantity and rate are usable.
    pub fn to_line_item(&self) -> Option<LineItem> {
        let item_id = self.item_id?;
        let quantity = self.quantity.filter(|q| *q > 0.0)?;
        let rate = self.rate.filter(|r| *r > 0.0)?;
        Some(LineItem {
            item_id,
            quantity,
            rate,
        })
    }
}

/// Parses `ITEM:QUANTITY:RATE`, e.g. `12:3:99.5`.
impl FromStr for DraftLine {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| CoreError::InvalidLineItem {
            input: s.to_string(),
            reason: reason.to_string(),
        };

        let parts: Vec<&str> = s.split(':').map(str::trim).collect();
        let [item, quantity, rate] = parts.as_slice() else {
            return Err(invalid("expected ITEM:QUANTITY:RATE"));
        };

        let item_id = item
            .parse::<i64>()
            .map_err(|_| invalid("item must be an integer id"))?;
        let quantity = quantity
            .parse::<f64>()
            .map_err(|_| invalid("quantity must be a number"))?;
        let rate = rate
            .parse::<f64>()
            .map_err(|_| invalid("rate must be a number"))?;

        Ok(DraftLine::new(item_id, quantity, rate))
    }
}

// =============================================================================
// Order Draft
// =============================================================================

/// The lines of a purchase or sale under construction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderDraft {
    lines: Vec<DraftLine>,
}

impl OrderDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_lines(lines: impl IntoIterator<Item = DraftLine>) -> Self {
        OrderDraft {
            lines: lines.into_iter().collect(),
        }
    }

    /// Appends an empty line and returns its index.
    pub fn add_line(&mut self) -> usize {
        self.lines.push(DraftLine::default());
        self.lines.len() - 1
    }

    /// Appends a pre-filled line.
    pub fn push(&mut self, line: DraftLine) {
        self.lines.push(line);
    }

    /// Removes a line. Out-of-range indexes are ignored.
    pub fn remove_line(&mut self, index: usize) -> Option<DraftLine> {
        (index < self.lines.len()).then(|| self.lines.remove(index))
    }

    pub fn set_item(&mut self, index: usize, item_id: Option<i64>) {
        if let Some(line) = self.lines.get_mut(index) {
            line.item_id = item_id;
        }
    }

    pub fn set_quantity(&mut self, index: usize, quantity: Option<f64>) {
        if let Some(line) = self.lines.get_mut(index) {
            line.quantity = quantity;
        }
    }

    pub fn set_rate(&mut self, index: usize, rate: Option<f64>) {
        if let Some(line) = self.lines.get_mut(index) {
            line.rate = rate;
        }
    }

    pub fn lines(&self) -> &[DraftLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Running total over every line, valid or not.
    pub fn total(&self) -> Money {
        self.lines.iter().map(DraftLine::total).sum()
    }

    /// Lines that will actually be submitted.
    pub fn valid_lines(&self) -> Vec<LineItem> {
        self.lines.iter().filter_map(DraftLine::to_line_item).collect()
    }

    /// Builds the `POST /purchases` body.
    pub fn into_purchase(self, purchase_date: NaiveDate, supplier_id: i64) -> PurchaseInput {
        PurchaseInput {
            purchase_date,
            supplier_id,
            details: self.valid_lines(),
        }
    }

    /// Builds the `POST /sales` body.
    pub fn into_sale(self, sales_date: NaiveDate, customer_id: i64) -> SaleInput {
        SaleInput {
            sales_date,
            customer_id,
            details: self.valid_lines(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    #[test]
    fn test_valid_lines_filters_incomplete() {
        let draft = OrderDraft::from_lines([
            DraftLine::new(1, 2.0, 10.0),
            DraftLine {
                item_id: None,
                quantity: Some(1.0),
                rate: Some(5.0),
            },
            DraftLine::new(2, 0.0, 10.0),
            DraftLine::new(3, 1.0, -1.0),
            DraftLine {
                item_id: Some(4),
                quantity: Some(1.0),
                rate: None,
            },
            DraftLine::new(5, 0.5, 8.0),
        ]);

        let lines = draft.valid_lines();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].item_id, 1);
        assert_eq!(lines[1].item_id, 5);
    }

    #[test]
    fn test_total_counts_every_line() {
        let mut draft = OrderDraft::new();
        let a = draft.add_line();
        draft.set_quantity(a, Some(2.0));
        draft.set_rate(a, Some(12.5));
        // Not yet submittable (no item) but still in the running total.
        assert_eq!(draft.total().minor(), 2500);
        assert!(draft.valid_lines().is_empty());

        draft.set_item(a, Some(9));
        assert_eq!(draft.valid_lines().len(), 1);
    }

    #[test]
    fn test_remove_line() {
        let mut draft = OrderDraft::from_lines([DraftLine::new(1, 1.0, 1.0)]);
        assert_eq!(draft.remove_line(5), None);
        assert!(draft.remove_line(0).is_some());
        assert!(draft.is_empty());
        // Setters on missing rows are no-ops.
        draft.set_rate(0, Some(1.0));
        assert!(draft.is_empty());
    }

    #[test]
    fn test_empty_draft_still_produces_empty_details() {
        let input = OrderDraft::from_lines([DraftLine::default()]).into_purchase(date(), 3);
        assert_eq!(input.supplier_id, 3);
        assert!(input.details.is_empty());

        let body = serde_json::to_value(&input).unwrap();
        assert_eq!(body["details"], serde_json::json!([]));
    }

    #[test]
    fn test_into_sale() {
        let input = OrderDraft::from_lines([DraftLine::new(7, 3.0, 4.0)]).into_sale(date(), 2);
        assert_eq!(input.customer_id, 2);
        assert_eq!(input.details[0].total().minor(), 1200);
    }

    #[test]
    fn test_parse_draft_line() {
        assert_eq!(
            "12:3:99.5".parse::<DraftLine>().unwrap(),
            DraftLine::new(12, 3.0, 99.5)
        );
        assert_eq!(
            " 1 : 0.25 : 4 ".parse::<DraftLine>().unwrap(),
            DraftLine::new(1, 0.25, 4.0)
        );
        assert!("12:3".parse::<DraftLine>().is_err());
        assert!("abc:3:1".parse::<DraftLine>().is_err());
        assert!("1:x:1".parse::<DraftLine>().is_err());
        assert!("1:1:1:1".parse::<DraftLine>().is_err());
    }
}
