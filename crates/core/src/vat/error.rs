//! VAT report error types.

use chrono::NaiveDate;
use tally_shared::{AppError, FieldErrors};
use thiserror::Error;

use super::types::VatReportStatus;

/// Errors that can occur while building or filing a VAT report.
#[derive(Debug, Error)]
pub enum VatError {
    /// Period starts after it ends.
    #[error("Period start {start} is after period end {end}")]
    InvalidPeriod {
        /// Period start.
        start: NaiveDate,
        /// Period end.
        end: NaiveDate,
    },

    /// The report is not in the status the action requires.
    #[error("Cannot move report from {from} to {to}")]
    InvalidStatusTransition {
        /// Current status.
        from: VatReportStatus,
        /// Requested status.
        to: VatReportStatus,
    },

    /// Only draft reports may be recomputed or deleted.
    #[error("Report is {0} and can no longer be changed")]
    ReportLocked(VatReportStatus),
}

impl VatError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidPeriod { .. } => 400,
            Self::InvalidStatusTransition { .. } | Self::ReportLocked(_) => 409,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidPeriod { .. } => "VALIDATION_ERROR",
            Self::InvalidStatusTransition { .. } => "INVALID_STATUS_TRANSITION",
            Self::ReportLocked(_) => "REPORT_LOCKED",
        }
    }
}

impl From<VatError> for AppError {
    fn from(err: VatError) -> Self {
        match err {
            VatError::InvalidPeriod { .. } => {
                let mut errors = FieldErrors::new();
                errors.add("periodEnd", err.to_string());
                Self::Validation(errors)
            }
            VatError::InvalidStatusTransition { .. } | VatError::ReportLocked(_) => {
                Self::InvalidStatusTransition(err.to_string())
            }
        }
    }
}
