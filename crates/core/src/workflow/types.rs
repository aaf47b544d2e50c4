//! Workflow domain types for the order lifecycle.
//!
//! Purchase orders and purchase returns go through an approval flow:
//! - Draft → Pending (submit)
//! - Pending → Approved (approve)
//! - Pending → Rejected (reject)
//! - Rejected → Pending (submit again)
//!
//! Sales orders and sales returns go through a fulfilment flow:
//! - Draft → Confirmed (confirm)
//! - Confirmed → Invoiced (invoice)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of order document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderType {
    /// Order placed with a vendor.
    PurchaseOrder,
    /// Goods sent back to a vendor.
    PurchaseReturn,
    /// Order received from a customer.
    SalesOrder,
    /// Goods taken back from a customer.
    SalesReturn,
}

/// The status flow an order type follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowFlow {
    /// Draft → Pending → Approved | Rejected.
    Approval,
    /// Draft → Confirmed → Invoiced.
    Fulfilment,
}

impl OrderType {
    /// Returns the string representation of the type.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PurchaseOrder => "purchase_order",
            Self::PurchaseReturn => "purchase_return",
            Self::SalesOrder => "sales_order",
            Self::SalesReturn => "sales_return",
        }
    }

    /// Parses a type from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "purchase_order" => Some(Self::PurchaseOrder),
            "purchase_return" => Some(Self::PurchaseReturn),
            "sales_order" => Some(Self::SalesOrder),
            "sales_return" => Some(Self::SalesReturn),
            _ => None,
        }
    }

    /// Returns true for documents raised against a vendor.
    #[must_use]
    pub fn is_purchase(&self) -> bool {
        matches!(self, Self::PurchaseOrder | Self::PurchaseReturn)
    }

    /// Returns true for return documents.
    #[must_use]
    pub fn is_return(&self) -> bool {
        matches!(self, Self::PurchaseReturn | Self::SalesReturn)
    }

    /// The status flow this type follows.
    #[must_use]
    pub fn flow(&self) -> WorkflowFlow {
        if self.is_purchase() {
            WorkflowFlow::Approval
        } else {
            WorkflowFlow::Fulfilment
        }
    }

    /// Statuses an order of this type may hold.
    #[must_use]
    pub fn statuses(&self) -> &'static [OrderStatus] {
        match self.flow() {
            WorkflowFlow::Approval => &[
                OrderStatus::Draft,
                OrderStatus::Pending,
                OrderStatus::Approved,
                OrderStatus::Rejected,
            ],
            WorkflowFlow::Fulfilment => &[
                OrderStatus::Draft,
                OrderStatus::Confirmed,
                OrderStatus::Invoiced,
            ],
        }
    }

    /// Returns true if an order of this type may hold `status`.
    #[must_use]
    pub fn supports(&self, status: OrderStatus) -> bool {
        self.statuses().contains(&status)
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Order status across both flows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Being drafted; the only state in which lines may change.
    Draft,
    /// Submitted and awaiting a decision.
    Pending,
    /// Approved (terminal).
    Approved,
    /// Rejected; may be edited and resubmitted or deleted.
    Rejected,
    /// Confirmed with the customer.
    Confirmed,
    /// Invoice raised (terminal).
    Invoiced,
}

impl OrderStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [Self; 6] = [
        Self::Draft,
        Self::Pending,
        Self::Approved,
        Self::Rejected,
        Self::Confirmed,
        Self::Invoiced,
    ];

    /// Returns the string representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "DRAFT",
            Self::Pending => "PENDING",
            Self::Approved => "APPROVED",
            Self::Rejected => "REJECTED",
            Self::Confirmed => "CONFIRMED",
            Self::Invoiced => "INVOICED",
        }
    }

    /// Parses a status from a string, ignoring case.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "DRAFT" => Some(Self::Draft),
            "PENDING" => Some(Self::Pending),
            "APPROVED" => Some(Self::Approved),
            "REJECTED" => Some(Self::Rejected),
            "CONFIRMED" => Some(Self::Confirmed),
            "INVOICED" => Some(Self::Invoiced),
            _ => None,
        }
    }

    /// Returns true if the order's lines and header may change.
    #[must_use]
    pub fn can_edit(&self) -> bool {
        matches!(self, Self::Draft | Self::Rejected)
    }

    /// Returns true if the order may be deleted.
    #[must_use]
    pub fn can_delete(&self) -> bool {
        matches!(self, Self::Draft | Self::Rejected)
    }

    /// Returns true if the order may be sent for approval.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        matches!(self, Self::Draft | Self::Rejected)
    }

    /// Returns true if the order is awaiting approval.
    #[must_use]
    pub fn can_approve(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// Returns true if the order is awaiting approval.
    #[must_use]
    pub fn can_reject(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// Returns true if the order may be confirmed.
    #[must_use]
    pub fn can_confirm(&self) -> bool {
        matches!(self, Self::Draft)
    }

    /// Returns true if an invoice may be raised.
    #[must_use]
    pub fn can_invoice(&self) -> bool {
        matches!(self, Self::Confirmed)
    }

    /// Returns true if no further action is possible.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Approved | Self::Invoiced)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A workflow action requested against an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkflowAction {
    /// Send a draft for approval.
    Submit,
    /// Approve a pending order.
    Approve,
    /// Reject a pending order.
    Reject,
    /// Confirm a draft sales document.
    Confirm,
    /// Mark a confirmed sales document as invoiced.
    Invoice,
}

impl WorkflowAction {
    /// Every action.
    pub const ALL: [Self; 5] = [
        Self::Submit,
        Self::Approve,
        Self::Reject,
        Self::Confirm,
        Self::Invoice,
    ];

    /// Returns the string representation of the action.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Submit => "submit",
            Self::Approve => "approve",
            Self::Reject => "reject",
            Self::Confirm => "confirm",
            Self::Invoice => "invoice",
        }
    }

    /// The flow this action belongs to.
    #[must_use]
    pub fn flow(&self) -> WorkflowFlow {
        match self {
            Self::Submit | Self::Approve | Self::Reject => WorkflowFlow::Approval,
            Self::Confirm | Self::Invoice => WorkflowFlow::Fulfilment,
        }
    }

    /// The status an order ends in after this action.
    #[must_use]
    pub fn target_status(&self) -> OrderStatus {
        match self {
            Self::Submit => OrderStatus::Pending,
            Self::Approve => OrderStatus::Approved,
            Self::Reject => OrderStatus::Rejected,
            Self::Confirm => OrderStatus::Confirmed,
            Self::Invoice => OrderStatus::Invoiced,
        }
    }

    /// Returns true if `status` is a legal source for this action.
    #[must_use]
    pub fn allowed_from(&self, status: OrderStatus) -> bool {
        match self {
            Self::Submit => status.can_submit(),
            Self::Approve => status.can_approve(),
            Self::Reject => status.can_reject(),
            Self::Confirm => status.can_confirm(),
            Self::Invoice => status.can_invoice(),
        }
    }
}

impl fmt::Display for WorkflowAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body of a `/transactions/{id}/process` request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitionRequest {
    /// The action to perform.
    pub action: WorkflowAction,
    /// Optional remarks, e.g. a rejection reason.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

impl TransitionRequest {
    /// A request without remarks.
    #[must_use]
    pub fn new(action: WorkflowAction) -> Self {
        Self {
            action,
            remarks: None,
        }
    }

    /// Attaches remarks.
    #[must_use]
    pub fn with_remarks(mut self, remarks: impl Into<String>) -> Self {
        self.remarks = Some(remarks.into());
        self
    }
}

/// A transition decided by the workflow, handed to persistence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderTransition {
    /// Action performed.
    pub action: WorkflowAction,
    /// Status before the action.
    pub from: OrderStatus,
    /// Status after the action.
    pub to: OrderStatus,
    /// When the transition was decided.
    pub performed_at: DateTime<Utc>,
    /// Remarks carried from the request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serde() {
        let json = serde_json::to_string(&OrderStatus::Pending).unwrap();
        assert_eq!(json, "\"PENDING\"");
        let back: OrderStatus = serde_json::from_str("\"INVOICED\"").unwrap();
        assert_eq!(back, OrderStatus::Invoiced);
    }

    #[test]
    fn test_status_parse() {
        assert_eq!(OrderStatus::parse("draft"), Some(OrderStatus::Draft));
        assert_eq!(OrderStatus::parse(" Rejected "), Some(OrderStatus::Rejected));
        assert_eq!(OrderStatus::parse("posted"), None);
    }

    #[test]
    fn test_order_type_serde() {
        let json = serde_json::to_string(&OrderType::PurchaseReturn).unwrap();
        assert_eq!(json, "\"purchase_return\"");
        assert_eq!(OrderType::parse("SALES_ORDER"), Some(OrderType::SalesOrder));
    }

    #[test]
    fn test_flows() {
        assert_eq!(OrderType::PurchaseOrder.flow(), WorkflowFlow::Approval);
        assert_eq!(OrderType::PurchaseReturn.flow(), WorkflowFlow::Approval);
        assert_eq!(OrderType::SalesOrder.flow(), WorkflowFlow::Fulfilment);
        assert_eq!(OrderType::SalesReturn.flow(), WorkflowFlow::Fulfilment);
        assert!(!OrderType::SalesReturn.supports(OrderStatus::Pending));
        assert!(!OrderType::PurchaseOrder.supports(OrderStatus::Invoiced));
    }

    #[test]
    fn test_transition_request_json() {
        let request: TransitionRequest = serde_json::from_str(r#"{"action":"approve"}"#).unwrap();
        assert_eq!(request, TransitionRequest::new(WorkflowAction::Approve));
        assert_eq!(
            serde_json::to_string(&TransitionRequest::new(WorkflowAction::Confirm)).unwrap(),
            r#"{"action":"confirm"}"#
        );
    }

    #[test]
    fn test_action_targets() {
        assert_eq!(WorkflowAction::Reject.target_status(), OrderStatus::Rejected);
        assert_eq!(WorkflowAction::Invoice.target_status(), OrderStatus::Invoiced);
        assert!(WorkflowAction::Submit.allowed_from(OrderStatus::Rejected));
        assert!(!WorkflowAction::Invoice.allowed_from(OrderStatus::Draft));
    }
}
