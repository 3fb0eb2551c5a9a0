//! Command handlers, one module per conversational surface.

pub mod chat;
