//! Save payload sent to the order API.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tally_shared::AppResult;
use tally_shared::types::{ItemId, PartyId};

use super::types::{OrderTransaction, PartyType};
use super::validation::validate_order;
use crate::lines::{LineItem, LineItemTotals};
use crate::workflow::{OrderStatus, OrderType};

/// One line of an order payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLinePayload {
    /// Item identifier.
    pub item_id: ItemId,
    /// Free-text description.
    pub description: String,
    /// Signed quantity.
    pub qty: Decimal,
    /// Unit rate.
    pub rate: Decimal,
    /// Tax rate in percent.
    pub tax_percent: Decimal,
    /// Line value plus tax, rounded.
    pub line_total: Decimal,
}

/// Payload for saving an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPayload {
    /// Document number, when already assigned.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_no: Option<String>,
    /// Document kind.
    #[serde(rename = "type")]
    pub order_type: OrderType,
    /// Customer or vendor.
    pub party_id: Option<PartyId>,
    /// Side of the trade.
    pub party_type: PartyType,
    /// Document date.
    pub date: Option<NaiveDate>,
    /// Expected delivery date.
    pub delivery_date: Option<NaiveDate>,
    /// Workflow status.
    pub status: OrderStatus,
    /// Grand total computed from the lines.
    pub total_amount: Decimal,
    /// Order lines.
    pub items: Vec<OrderLinePayload>,
    /// Payment and delivery terms.
    pub terms: String,
    /// Internal notes.
    pub notes: String,
    /// Handling priority.
    pub priority: String,
}

impl OrderPayload {
    /// Shapes an order for the API without validating it.
    ///
    /// Blank rows left over from editing are dropped. Quantities and the
    /// total keep their stored sign.
    #[must_use]
    pub fn from_order(order: &OrderTransaction) -> Self {
        let items: Vec<LineItem> = order
            .items
            .iter()
            .filter(|item| !item.item_code.trim().is_empty())
            .cloned()
            .collect();
        let totals = LineItemTotals::compute(&items);
        let lines = items
            .iter()
            .zip(LineItemTotals::breakdown(&items))
            .map(|(item, figures)| OrderLinePayload {
                item_id: ItemId::new(item.item_code.trim()),
                description: item.description.clone(),
                qty: item.quantity(),
                rate: item.unit_rate(),
                tax_percent: item.tax_percent(),
                line_total: figures.line_total,
            })
            .collect();

        Self {
            transaction_no: order.transaction_no.clone(),
            order_type: order.order_type,
            party_id: order.party_id.clone(),
            party_type: order.party_type(),
            date: order.date,
            delivery_date: order.delivery_date,
            status: order.status,
            total_amount: totals.total,
            items: lines,
            terms: order.terms.clone(),
            notes: order.notes.clone(),
            priority: order.priority.clone(),
        }
    }

    /// Validates the order and shapes it for the API.
    ///
    /// # Errors
    ///
    /// Returns `Validation` with the failing fields.
    pub fn build(order: &OrderTransaction) -> AppResult<Self> {
        validate_order(order).into_result()?;
        Ok(Self::from_order(order))
    }
}
