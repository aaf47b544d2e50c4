//! VAT aggregation and report lifecycle.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use tally_shared::MoneyMath;
use tracing::{debug, info, warn};

use super::error::VatError;
use super::types::{
    RateBucket, VatLineRow, VatPeriod, VatReport, VatReportStatus, VatTransaction,
};
use crate::order::PartyType;

/// Stateless VAT report builder.
pub struct VatAggregator;

impl VatAggregator {
    /// Builds a draft report from the transactions dated inside `period`.
    ///
    /// Every line becomes one row rounded the same way as the order's own
    /// line totals. Summary totals are the exact sums of the row amounts, so
    /// a report always reconciles with its rows. Missing quantities, rates,
    /// or VAT rates count as zero, and a line that would overflow its side's
    /// total counts as zero with a warning. This never fails.
    #[must_use]
    pub fn aggregate(period: &VatPeriod, transactions: &[VatTransaction]) -> VatReport {
        let items = Self::rows(period, transactions);
        let (total_vat_output, total_vat_input) = Self::totals(&items);

        VatReport {
            period_start: period.period_start,
            period_end: period.period_end,
            status: VatReportStatus::Draft,
            items,
            total_vat_output,
            total_vat_input,
            net_vat_payable: total_vat_output.saturating_sub(total_vat_input),
        }
    }

    /// Recomputes a draft report in place.
    ///
    /// # Errors
    ///
    /// Returns `ReportLocked` unless the report is a draft.
    pub fn refresh(
        report: &mut VatReport,
        transactions: &[VatTransaction],
    ) -> Result<(), VatError> {
        if report.status != VatReportStatus::Draft {
            return Err(VatError::ReportLocked(report.status));
        }
        *report = Self::aggregate(&report.period(), transactions);
        debug!(
            period_start = %report.period_start,
            period_end = %report.period_end,
            rows = report.items.len(),
            "VAT report refreshed"
        );
        Ok(())
    }

    /// Freezes a draft report.
    ///
    /// # Errors
    ///
    /// Returns `InvalidStatusTransition` unless the report is a draft.
    pub fn finalize(report: &mut VatReport) -> Result<(), VatError> {
        Self::advance(report, VatReportStatus::Draft, VatReportStatus::Finalized)
    }

    /// Marks a finalized report as submitted.
    ///
    /// # Errors
    ///
    /// Returns `InvalidStatusTransition` unless the report is finalized.
    pub fn submit(report: &mut VatReport) -> Result<(), VatError> {
        Self::advance(report, VatReportStatus::Finalized, VatReportStatus::Submitted)
    }

    /// Fails unless the report may be deleted.
    ///
    /// # Errors
    ///
    /// Returns `ReportLocked` unless the report is a draft.
    pub fn ensure_deletable(report: &VatReport) -> Result<(), VatError> {
        match report.status {
            VatReportStatus::Draft => Ok(()),
            status => Err(VatError::ReportLocked(status)),
        }
    }

    /// Groups rows by party type and VAT rate, output buckets first.
    #[must_use]
    pub fn summarize_by_rate(report: &VatReport) -> Vec<RateBucket> {
        let mut buckets: BTreeMap<(PartyType, Decimal), RateBucket> = BTreeMap::new();

        for row in &report.items {
            let bucket = buckets
                .entry((row.party_type, row.vat_rate))
                .or_insert_with(|| RateBucket {
                    vat_rate: row.vat_rate,
                    party_type: row.party_type,
                    taxable_value: Decimal::ZERO,
                    vat_amount: Decimal::ZERO,
                });
            bucket.taxable_value = bucket.taxable_value.saturating_add(row.taxable_value);
            bucket.vat_amount = bucket.vat_amount.saturating_add(row.vat_amount);
        }

        buckets.into_values().collect()
    }

    fn rows(period: &VatPeriod, transactions: &[VatTransaction]) -> Vec<VatLineRow> {
        let mut rows = Vec::new();
        let mut output = Decimal::ZERO;
        let mut input = Decimal::ZERO;

        for transaction in transactions {
            let Some(date) = transaction.date else {
                debug!(
                    transaction_no = %transaction.transaction_no,
                    "Skipping undated transaction"
                );
                continue;
            };
            if !period.contains(date) {
                continue;
            }

            let side = match transaction.party_type {
                PartyType::Customer => &mut output,
                PartyType::Vendor => &mut input,
            };

            for item in &transaction.items {
                let figures = item.breakdown();
                let (taxable_value, vat_amount) = match side.checked_add(figures.line_tax) {
                    Some(sum) => {
                        *side = sum;
                        (figures.line_value, figures.line_tax)
                    }
                    None => {
                        warn!(
                            transaction_no = %transaction.transaction_no,
                            item_code = %item.item_code,
                            "VAT total overflows, counting the line as zero"
                        );
                        (Decimal::ZERO, Decimal::ZERO)
                    }
                };

                rows.push(VatLineRow {
                    transaction_no: transaction.transaction_no.clone(),
                    item_code: item.item_code.clone(),
                    description: item.description.clone(),
                    party_name: transaction.party_name.clone(),
                    qty: item.quantity(),
                    vat_rate: item.tax_percent(),
                    taxable_value,
                    vat_amount,
                    party_type: transaction.party_type,
                });
            }
        }

        rows
    }

    fn totals(rows: &[VatLineRow]) -> (Decimal, Decimal) {
        let sum_for = |party_type: PartyType| {
            MoneyMath::round2(MoneyMath::sum(
                rows.iter()
                    .filter(|row| row.party_type == party_type)
                    .map(|row| row.vat_amount),
            ))
        };
        (sum_for(PartyType::Customer), sum_for(PartyType::Vendor))
    }

    fn advance(
        report: &mut VatReport,
        required: VatReportStatus,
        next: VatReportStatus,
    ) -> Result<(), VatError> {
        if report.status != required {
            return Err(VatError::InvalidStatusTransition {
                from: report.status,
                to: next,
            });
        }

        info!(
            period_start = %report.period_start,
            period_end = %report.period_end,
            from = %report.status,
            to = %next,
            net_vat_payable = %report.net_vat_payable,
            "VAT report status changed"
        );
        report.status = next;
        Ok(())
    }
}
