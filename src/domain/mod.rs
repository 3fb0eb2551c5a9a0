//! Domain layer - pure business logic with no I/O.

pub mod conversation;
pub mod foundation;
