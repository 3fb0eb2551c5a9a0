//! Application layer - Use-case orchestration.
//!
//! Handlers wire the pure conversation domain to the ports: the agent
//! decides, the handlers execute and report back.

pub mod handlers;
