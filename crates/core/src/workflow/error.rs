//! Workflow error types for the order lifecycle.

use tally_shared::{AppError, FieldErrors};
use thiserror::Error;

use crate::workflow::types::{OrderStatus, OrderType, WorkflowAction};

/// Errors that can occur during workflow operations.
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// The action is not legal from the current status.
    #[error("Cannot {action} a {order_type} in status {from}")]
    InvalidTransition {
        /// The order type.
        order_type: OrderType,
        /// The current status.
        from: OrderStatus,
        /// The attempted action.
        action: WorkflowAction,
    },

    /// The order may no longer be edited.
    #[error("Order in status {0} cannot be edited")]
    NotEditable(OrderStatus),

    /// The order may no longer be deleted.
    #[error("Order in status {0} cannot be deleted")]
    NotDeletable(OrderStatus),

    /// The status does not belong to the order type's flow.
    #[error("Status {status} is not used by {order_type}")]
    StatusNotInFlow {
        /// The order type.
        order_type: OrderType,
        /// The rejected status.
        status: OrderStatus,
    },

    /// Persistence rejected the transition.
    #[error("Transition was not saved: {0}")]
    Upstream(String),
}

impl WorkflowError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidTransition { .. } | Self::NotEditable(_) | Self::NotDeletable(_) => 409,
            Self::StatusNotInFlow { .. } => 400,
            Self::Upstream(_) => 502,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidTransition { .. } => "INVALID_TRANSITION",
            Self::NotEditable(_) => "NOT_EDITABLE",
            Self::NotDeletable(_) => "NOT_DELETABLE",
            Self::StatusNotInFlow { .. } => "VALIDATION_ERROR",
            Self::Upstream(_) => "UPSTREAM_FAILURE",
        }
    }
}

impl From<WorkflowError> for AppError {
    fn from(err: WorkflowError) -> Self {
        match err {
            WorkflowError::InvalidTransition { .. }
            | WorkflowError::NotEditable(_)
            | WorkflowError::NotDeletable(_) => Self::InvalidTransition(err.to_string()),
            WorkflowError::StatusNotInFlow { .. } => {
                let mut errors = FieldErrors::new();
                errors.add("status", err.to_string());
                Self::Validation(errors)
            }
            WorkflowError::Upstream(message) => Self::Upstream(message),
        }
    }
}
