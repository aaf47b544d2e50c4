//! Order domain types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use tally_shared::types::PartyId;

use crate::lines::{LineItem, LineItemTotals, LineTotals};
use crate::workflow::{OrderStatus, OrderType, OrderWorkflow, WorkflowError};

/// Which side of a trade a party is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PartyType {
    /// Buys from us; sales carry output VAT.
    Customer,
    /// Sells to us; purchases carry input VAT.
    Vendor,
}

impl PartyType {
    /// The party an order of this type is raised against.
    #[must_use]
    pub fn for_order(order_type: OrderType) -> Self {
        if order_type.is_purchase() {
            Self::Vendor
        } else {
            Self::Customer
        }
    }

    /// Returns the string representation of the party type.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Customer => "Customer",
            Self::Vendor => "Vendor",
        }
    }
}

impl fmt::Display for PartyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn default_priority() -> String {
    "normal".to_string()
}

/// A purchase or sales order, or a return of either.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderTransaction {
    /// Document number, assigned by the persistence collaborator.
    #[serde(default)]
    pub transaction_no: Option<String>,
    /// Document kind.
    #[serde(rename = "type")]
    pub order_type: OrderType,
    /// Customer or vendor.
    #[serde(default)]
    pub party_id: Option<PartyId>,
    /// Explicit party type; derived from the order type when absent.
    #[serde(default)]
    pub party_type: Option<PartyType>,
    /// Document date.
    #[serde(default)]
    pub date: Option<NaiveDate>,
    /// Expected delivery date.
    #[serde(default)]
    pub delivery_date: Option<NaiveDate>,
    /// Workflow status.
    #[serde(default = "draft_status")]
    pub status: OrderStatus,
    /// Order lines. Return quantities may be stored negative.
    #[serde(default)]
    pub items: Vec<LineItem>,
    /// Stored total; recomputed from the lines on save.
    #[serde(default)]
    pub total_amount: Option<Decimal>,
    /// Payment and delivery terms.
    #[serde(default)]
    pub terms: String,
    /// Internal notes.
    #[serde(default)]
    pub notes: String,
    /// Handling priority.
    #[serde(default = "default_priority")]
    pub priority: String,
    /// Set by the inventory subsystem once goods are received.
    #[serde(default)]
    pub grn_generated: bool,
    /// Set by the invoicing subsystem once an invoice is raised.
    #[serde(default)]
    pub invoice_generated: bool,
}

fn draft_status() -> OrderStatus {
    OrderStatus::Draft
}

impl OrderTransaction {
    /// An empty draft of the given type.
    #[must_use]
    pub fn new(order_type: OrderType) -> Self {
        Self {
            transaction_no: None,
            order_type,
            party_id: None,
            party_type: None,
            date: None,
            delivery_date: None,
            status: OrderStatus::Draft,
            items: Vec::new(),
            total_amount: None,
            terms: String::new(),
            notes: String::new(),
            priority: default_priority(),
            grn_generated: false,
            invoice_generated: false,
        }
    }

    /// The party type, explicit or derived from the order type.
    #[must_use]
    pub fn party_type(&self) -> PartyType {
        self.party_type
            .unwrap_or_else(|| PartyType::for_order(self.order_type))
    }

    /// Signed totals computed from the lines.
    #[must_use]
    pub fn totals(&self) -> LineTotals {
        LineItemTotals::compute(&self.items)
    }

    /// Totals for display: returns show positive refund figures.
    #[must_use]
    pub fn display_totals(&self) -> LineTotals {
        let totals = self.totals();
        if self.order_type.is_return() {
            totals.abs()
        } else {
            totals
        }
    }

    /// The workflow for this order's type and status.
    ///
    /// # Errors
    ///
    /// Returns `StatusNotInFlow` if the stored status does not belong to the
    /// order type's flow.
    pub fn workflow(&self) -> Result<OrderWorkflow, WorkflowError> {
        OrderWorkflow::new(self.order_type, self.status)
    }
}
