//! Use case layer: application workflows and orchestration.

pub mod bootstrap;
pub mod context;
pub mod contracts;
pub mod load_history;
pub mod reconcile_response;
pub mod shell;
pub mod submit_message;
