//! Infrastructure layer: configuration, logging, error types.

pub mod config;
pub mod error;
pub mod logging;
