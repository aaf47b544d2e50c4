//! Property-based tests for OrderWorkflow.

use proptest::prelude::*;

use crate::workflow::error::WorkflowError;
use crate::workflow::service::OrderWorkflow;
use crate::workflow::types::{OrderStatus, OrderType, TransitionRequest, WorkflowAction};

fn arb_status() -> impl Strategy<Value = OrderStatus> {
    proptest::sample::select(OrderStatus::ALL.to_vec())
}

fn arb_action() -> impl Strategy<Value = WorkflowAction> {
    proptest::sample::select(WorkflowAction::ALL.to_vec())
}

fn arb_order_type() -> impl Strategy<Value = OrderType> {
    prop_oneof![
        Just(OrderType::PurchaseOrder),
        Just(OrderType::PurchaseReturn),
        Just(OrderType::SalesOrder),
        Just(OrderType::SalesReturn),
    ]
}

/// A workflow in a status its type supports.
fn arb_workflow() -> impl Strategy<Value = OrderWorkflow> {
    arb_order_type().prop_flat_map(|order_type| {
        proptest::sample::select(order_type.statuses().to_vec())
            .prop_map(move |status| OrderWorkflow::new(order_type, status).unwrap())
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Same status in, same predicates out.
    #[test]
    fn prop_predicates_are_referentially_transparent(status in arb_status()) {
        let first = (
            status.can_edit(),
            status.can_delete(),
            status.can_approve(),
            status.can_reject(),
        );
        for _ in 0..3 {
            let again = (
                status.can_edit(),
                status.can_delete(),
                status.can_approve(),
                status.can_reject(),
            );
            prop_assert_eq!(first, again);
        }
    }

    /// Planning never changes state and always agrees with `can`.
    #[test]
    fn prop_plan_agrees_with_can(workflow in arb_workflow(), action in arb_action()) {
        let before = workflow;
        let planned = workflow.plan(&TransitionRequest::new(action));
        prop_assert_eq!(workflow, before);
        prop_assert_eq!(planned.is_ok(), workflow.can(action));
        if let Err(err) = planned {
            let is_invalid = matches!(err, WorkflowError::InvalidTransition { .. });
            prop_assert!(is_invalid);
        }
    }

    /// Every reachable status stays inside the order type's flow.
    #[test]
    fn prop_transitions_stay_in_flow(
        order_type in arb_order_type(),
        actions in prop::collection::vec(arb_action(), 0..12),
    ) {
        let mut workflow = OrderWorkflow::draft(order_type);
        for action in actions {
            let before = workflow.status();
            match workflow.apply(action) {
                Ok(transition) => {
                    prop_assert_eq!(transition.from, before);
                    prop_assert!(order_type.supports(transition.to));
                }
                Err(_) => prop_assert_eq!(workflow.status(), before),
            }
        }
    }

    /// Terminal statuses accept no action.
    #[test]
    fn prop_terminal_statuses_are_final(workflow in arb_workflow(), action in arb_action()) {
        if workflow.status().is_terminal() {
            prop_assert!(!workflow.can(action));
            prop_assert!(!workflow.can_edit());
            prop_assert!(!workflow.can_delete());
        }
    }

    /// A failed commit leaves the status untouched.
    #[test]
    fn prop_failed_commit_keeps_status(workflow in arb_workflow(), action in arb_action()) {
        let mut workflow = workflow;
        let before = workflow.status();
        let result = workflow.process(&TransitionRequest::new(action), |_| Err("down"));
        prop_assert!(result.is_err());
        prop_assert_eq!(workflow.status(), before);
    }
}
