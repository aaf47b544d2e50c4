//! VAT report data types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::error::VatError;
use crate::lines::LineItem;
use crate::order::{OrderTransaction, PartyType};

/// Inclusive reporting period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VatPeriod {
    /// First day of the period.
    pub period_start: NaiveDate,
    /// Last day of the period.
    pub period_end: NaiveDate,
}

impl VatPeriod {
    /// Creates a period.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPeriod` if `start` is after `end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, VatError> {
        if start > end {
            return Err(VatError::InvalidPeriod { start, end });
        }
        Ok(Self {
            period_start: start,
            period_end: end,
        })
    }

    /// Returns true if `date` falls inside the period.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.period_start <= date && date <= self.period_end
    }
}

/// A stored sale or purchase, as seen by the VAT report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VatTransaction {
    /// Document number.
    #[serde(default)]
    pub transaction_no: String,
    /// Document date. Undated transactions never fall in a period.
    #[serde(default)]
    pub date: Option<NaiveDate>,
    /// Display name of the customer or vendor.
    #[serde(default)]
    pub party_name: String,
    /// Customer lines are output VAT, vendor lines are input VAT.
    pub party_type: PartyType,
    /// Document lines.
    #[serde(default)]
    pub items: Vec<LineItem>,
}

impl VatTransaction {
    /// Builds the VAT view of an order.
    ///
    /// The party type follows the order: sales documents are customer
    /// (output) transactions, purchase documents are vendor (input) ones.
    /// Return lines always carry a negative quantity here, whatever sign
    /// was stored, so a return reduces the VAT of its side.
    #[must_use]
    pub fn from_order(order: &OrderTransaction, party_name: impl Into<String>) -> Self {
        let items = if order.order_type.is_return() {
            order
                .items
                .iter()
                .map(|item| LineItem {
                    quantity: item.quantity.map(|q| -q.abs()),
                    ..item.clone()
                })
                .collect()
        } else {
            order.items.clone()
        };

        Self {
            transaction_no: order.transaction_no.clone().unwrap_or_default(),
            date: order.date,
            party_name: party_name.into(),
            party_type: order.party_type(),
            items,
        }
    }
}

/// One report row per transaction line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VatLineRow {
    /// Document the line came from.
    pub transaction_no: String,
    /// Item code.
    pub item_code: String,
    /// Item description.
    pub description: String,
    /// Customer or vendor name.
    pub party_name: String,
    /// Signed quantity as stored.
    pub qty: Decimal,
    /// VAT rate in percent.
    pub vat_rate: Decimal,
    /// Line value before VAT, rounded.
    pub taxable_value: Decimal,
    /// VAT on the line, rounded.
    pub vat_amount: Decimal,
    /// Customer (output) or Vendor (input).
    pub party_type: PartyType,
}

/// Lifecycle of a VAT report. Moves forward only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VatReportStatus {
    /// Mutable; may be refreshed or deleted.
    Draft,
    /// Frozen figures.
    Finalized,
    /// Filed with the tax authority.
    Submitted,
}

impl VatReportStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "DRAFT",
            Self::Finalized => "FINALIZED",
            Self::Submitted => "SUBMITTED",
        }
    }
}

impl fmt::Display for VatReportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// VAT report for a period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VatReport {
    /// First day of the period.
    pub period_start: NaiveDate,
    /// Last day of the period.
    pub period_end: NaiveDate,
    /// Report status.
    pub status: VatReportStatus,
    /// One row per transaction line.
    pub items: Vec<VatLineRow>,
    /// VAT collected on sales.
    #[serde(rename = "totalVATOutput")]
    pub total_vat_output: Decimal,
    /// VAT paid on purchases.
    #[serde(rename = "totalVATInput")]
    pub total_vat_input: Decimal,
    /// `total_vat_output - total_vat_input`.
    #[serde(rename = "netVATPayable")]
    pub net_vat_payable: Decimal,
}

impl VatReport {
    /// The report's period.
    #[must_use]
    pub fn period(&self) -> VatPeriod {
        VatPeriod {
            period_start: self.period_start,
            period_end: self.period_end,
        }
    }
}

/// Row totals grouped by party type and VAT rate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateBucket {
    /// VAT rate in percent.
    pub vat_rate: Decimal,
    /// Customer (output) or Vendor (input).
    pub party_type: PartyType,
    /// Sum of taxable values.
    pub taxable_value: Decimal,
    /// Sum of VAT amounts.
    pub vat_amount: Decimal,
}
