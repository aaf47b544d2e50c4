//! Order workflow state machine.
//!
//! Legal transitions depend on the order type; see [`crate::workflow::types`].
//! The workflow decides transitions but never persists them: callers pass a
//! commit closure that talks to the persistence layer.

use chrono::Utc;
use std::fmt::Display;
use tracing::{debug, warn};

use crate::workflow::error::WorkflowError;
use crate::workflow::types::{
    OrderStatus, OrderTransition, OrderType, TransitionRequest, WorkflowAction,
};

/// Workflow state of a single order.
///
/// The caller owns the state and must hand in the current authoritative
/// status; concurrent edits are resolved by persistence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderWorkflow {
    order_type: OrderType,
    status: OrderStatus,
}

impl OrderWorkflow {
    /// Creates the workflow for an order.
    ///
    /// # Errors
    ///
    /// Returns `StatusNotInFlow` if the order type never holds `status`.
    pub fn new(order_type: OrderType, status: OrderStatus) -> Result<Self, WorkflowError> {
        if !order_type.supports(status) {
            return Err(WorkflowError::StatusNotInFlow { order_type, status });
        }
        Ok(Self { order_type, status })
    }

    /// A new draft order.
    #[must_use]
    pub fn draft(order_type: OrderType) -> Self {
        Self {
            order_type,
            status: OrderStatus::Draft,
        }
    }

    /// The order type.
    #[must_use]
    pub fn order_type(&self) -> OrderType {
        self.order_type
    }

    /// The current status.
    #[must_use]
    pub fn status(&self) -> OrderStatus {
        self.status
    }

    /// Returns true if `action` is legal for this order right now.
    #[must_use]
    pub fn can(&self, action: WorkflowAction) -> bool {
        action.flow() == self.order_type.flow() && action.allowed_from(self.status)
    }

    /// Every action legal for this order right now.
    #[must_use]
    pub fn available_actions(&self) -> Vec<WorkflowAction> {
        WorkflowAction::ALL
            .into_iter()
            .filter(|action| self.can(*action))
            .collect()
    }

    /// Returns true if the order may be edited.
    #[must_use]
    pub fn can_edit(&self) -> bool {
        self.status.can_edit()
    }

    /// Returns true if the order may be deleted.
    #[must_use]
    pub fn can_delete(&self) -> bool {
        self.status.can_delete()
    }

    /// Returns true if a goods received note may be generated.
    ///
    /// `grn_generated` is read from the order, never computed here.
    #[must_use]
    pub fn can_generate_grn(&self, grn_generated: bool) -> bool {
        self.order_type == OrderType::PurchaseOrder
            && self.status == OrderStatus::Approved
            && !grn_generated
    }

    /// Fails unless the order may be edited.
    pub fn ensure_editable(&self) -> Result<(), WorkflowError> {
        if self.can_edit() {
            Ok(())
        } else {
            Err(WorkflowError::NotEditable(self.status))
        }
    }

    /// Fails unless the order may be deleted.
    pub fn ensure_deletable(&self) -> Result<(), WorkflowError> {
        if self.can_delete() {
            Ok(())
        } else {
            Err(WorkflowError::NotDeletable(self.status))
        }
    }

    /// Decides the transition for `request` without changing state.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTransition` if the action is not legal from the
    /// current status for this order type.
    pub fn plan(&self, request: &TransitionRequest) -> Result<OrderTransition, WorkflowError> {
        if !self.can(request.action) {
            warn!(
                order_type = %self.order_type,
                from = %self.status,
                action = %request.action,
                "Rejected workflow transition"
            );
            return Err(WorkflowError::InvalidTransition {
                order_type: self.order_type,
                from: self.status,
                action: request.action,
            });
        }

        Ok(OrderTransition {
            action: request.action,
            from: self.status,
            to: request.action.target_status(),
            performed_at: Utc::now(),
            remarks: request
                .remarks
                .as_deref()
                .map(str::trim)
                .filter(|r| !r.is_empty())
                .map(ToString::to_string),
        })
    }

    /// Applies `action` locally.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTransition` if the action is not legal.
    pub fn apply(&mut self, action: WorkflowAction) -> Result<OrderTransition, WorkflowError> {
        let transition = self.plan(&TransitionRequest::new(action))?;
        self.status = transition.to;
        Ok(transition)
    }

    /// Decides the transition and hands it to `commit` for persistence.
    ///
    /// The status only changes once `commit` succeeds. A commit failure is
    /// returned as `Upstream` and is not retried.
    ///
    /// # Errors
    ///
    /// * `InvalidTransition` if the action is not legal
    /// * `Upstream` if `commit` fails
    pub fn process<F, E>(
        &mut self,
        request: &TransitionRequest,
        commit: F,
    ) -> Result<OrderTransition, WorkflowError>
    where
        F: FnOnce(&OrderTransition) -> Result<(), E>,
        E: Display,
    {
        let transition = self.plan(request)?;

        if let Err(err) = commit(&transition) {
            warn!(
                action = %transition.action,
                from = %transition.from,
                error = %err,
                "Workflow transition was not saved"
            );
            return Err(WorkflowError::Upstream(err.to_string()));
        }

        debug!(
            action = %transition.action,
            from = %transition.from,
            to = %transition.to,
            "Workflow transition saved"
        );
        self.status = transition.to;
        Ok(transition)
    }
}
