//! Order workflow management for Tally.
//!
//! This module implements the order lifecycle state machine for purchase
//! and sales documents and their returns.
//!
//! # Modules
//!
//! - `types` - Workflow domain types (OrderType, OrderStatus, WorkflowAction)
//! - `error` - Workflow-specific error types
//! - `service` - State transition logic

pub mod error;
pub mod service;
pub mod types;

#[cfg(test)]
mod service_props;

pub use error::WorkflowError;
pub use service::OrderWorkflow;
pub use types::{
    OrderStatus, OrderTransition, OrderType, TransitionRequest, WorkflowAction, WorkflowFlow,
};
