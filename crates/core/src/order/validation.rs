//! Field-level validation of orders before they are saved.

use rust_decimal::Decimal;
use tally_shared::FieldErrors;

use super::types::OrderTransaction;

/// Validates an order, collecting every failing field.
#[must_use]
pub fn validate_order(order: &OrderTransaction) -> FieldErrors {
    let mut errors = FieldErrors::new();

    match order.date {
        None => errors.add("date", "Date is required"),
        Some(date) => {
            if order.delivery_date.is_some_and(|delivery| delivery < date) {
                errors.add("deliveryDate", "Delivery date cannot be before the order date");
            }
        }
    }

    if order.party_id.as_ref().is_none_or(|p| p.is_blank()) {
        errors.add("partyId", "Party is required");
    }

    for (index, item) in order.items.iter().enumerate() {
        if item.unit_rate() < Decimal::ZERO || item.tax_percent() < Decimal::ZERO {
            errors.add(
                format!("items[{index}]"),
                "Rate and tax percent cannot be negative",
            );
        }
    }

    if !order.items.iter().any(|item| item.is_valid()) {
        errors.add("items", "At least one valid line item is required");
    }

    errors
}
