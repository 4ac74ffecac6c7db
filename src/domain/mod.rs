//! Domain layer: core entities and business rules.

pub mod compose_state;
pub mod events;
pub mod feed_state;
pub mod message;
pub mod shell_state;
