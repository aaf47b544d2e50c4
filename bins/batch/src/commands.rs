//! Batch commands.

use std::path::PathBuf;

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use serde::Deserialize;
use tracing::{info, warn};

use tally_core::order::{OrderPayload, OrderTransaction, validate_order};
use tally_core::vat::{VatAggregator, VatPeriod, VatReport, VatTransaction};

/// Tally batch runner.
#[derive(Debug, Parser)]
#[command(name = "tally-batch", version, about = "VAT reports and order totals from JSON files")]
pub struct Cli {
    /// Command to run.
    #[command(subcommand)]
    pub command: Command,
}

/// A batch command.
#[derive(Debug, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Aggregate a VAT report for a period
    Vat {
        /// JSON file with `periodStart`, `periodEnd` and `transactions`
        input: PathBuf,
        /// Finalize the report even if configuration leaves it a draft
        #[arg(long)]
        finalize: bool,
    },
    /// Compute order totals and save payloads
    Totals {
        /// JSON file with a list of orders
        input: PathBuf,
    },
}

/// Input of the `vat` command.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VatInput {
    period_start: NaiveDate,
    period_end: NaiveDate,
    #[serde(default)]
    transactions: Vec<VatTransaction>,
}

/// Aggregates a VAT report from JSON input, finalizing it when asked.
pub fn run_vat(input: &str, finalize: bool) -> anyhow::Result<VatReport> {
    let input: VatInput = serde_json::from_str(input).context("Invalid VAT input")?;
    let period = VatPeriod::new(input.period_start, input.period_end)?;

    let mut report = VatAggregator::aggregate(&period, &input.transactions);
    info!(
        transactions = input.transactions.len(),
        rows = report.items.len(),
        net_vat_payable = %report.net_vat_payable,
        "VAT report aggregated"
    );

    if finalize {
        VatAggregator::finalize(&mut report)?;
    }
    Ok(report)
}

/// Computes the save payload of every order in a JSON array.
///
/// Orders that fail validation are still shaped, with a warning.
pub fn run_totals(input: &str) -> anyhow::Result<Vec<OrderPayload>> {
    let orders: Vec<OrderTransaction> =
        serde_json::from_str(input).context("Invalid order input")?;

    let payloads = orders
        .iter()
        .map(|order| {
            let errors = validate_order(order);
            if !errors.is_empty() {
                warn!(
                    transaction_no = order.transaction_no.as_deref().unwrap_or("-"),
                    errors = %errors,
                    "Order failed validation"
                );
            }
            OrderPayload::from_order(order)
        })
        .collect();

    Ok(payloads)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Command, clap::Error> {
        Cli::try_parse_from(std::iter::once("tally-batch").chain(args.iter().copied()))
            .map(|cli| cli.command)
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            parse(&["vat", "march.json"]).unwrap(),
            Command::Vat {
                input: PathBuf::from("march.json"),
                finalize: false,
            }
        );
        assert_eq!(
            parse(&["vat", "--finalize", "march.json"]).unwrap(),
            Command::Vat {
                input: PathBuf::from("march.json"),
                finalize: true,
            }
        );
        assert_eq!(
            parse(&["totals", "orders.json"]).unwrap(),
            Command::Totals {
                input: PathBuf::from("orders.json"),
            }
        );
    }

    #[test]
    fn test_parse_rejects_bad_arguments() {
        assert!(parse(&[]).is_err());
        assert!(parse(&["vat"]).is_err());
        assert!(parse(&["post", "x.json"]).is_err());
        assert!(parse(&["vat", "a.json", "b.json"]).is_err());
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_run_vat() {
        let input = r#"{
            "periodStart": "2024-03-01",
            "periodEnd": "2024-03-31",
            "transactions": [
                {
                    "transactionNo": "SO-1",
                    "date": "2024-03-05",
                    "partyName": "Acme",
                    "partyType": "Customer",
                    "items": [{ "itemCode": "A", "qty": 1, "rate": 100, "vatRate": 5 }]
                }
            ]
        }"#;

        let report = serde_json::to_value(run_vat(input, true).unwrap()).unwrap();
        assert_eq!(report["status"], "FINALIZED");
        assert_eq!(report["totalVATOutput"], "5.00");
        assert_eq!(report["netVATPayable"], "5.00");
    }

    #[test]
    fn test_run_vat_rejects_inverted_period() {
        let input = r#"{ "periodStart": "2024-04-01", "periodEnd": "2024-03-01" }"#;
        assert!(run_vat(input, false).is_err());
    }

    #[test]
    fn test_run_totals() {
        let input = r#"[
            {
                "type": "purchase_return",
                "partyId": "V-1",
                "date": "2024-03-12",
                "items": [
                    { "itemId": "SKU-1", "qty": 2, "rate": 50, "taxPercent": 5 },
                    { "itemId": "SKU-2", "qty": 1, "rate": 20, "taxPercent": 0 }
                ]
            }
        ]"#;

        let payloads = run_totals(input).unwrap();
        let value = serde_json::to_value(&payloads[0]).unwrap();
        assert_eq!(value["totalAmount"], "125.00");
        assert_eq!(value["items"][0]["lineTotal"], "105.00");
    }
}
