//! Adapters - Implementations of the ports.
//!
//! - `memory` - In-memory stores, used for development and tests
//! - `http` - Axum HTTP surface for the agent

pub mod http;
pub mod memory;
