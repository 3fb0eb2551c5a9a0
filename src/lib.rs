//! Juniper - Conversational assistant for the RSVP campaign system.
//!
//! This crate implements a rule-table conversation agent that classifies
//! user intents, extracts typed slots from utterances, and emits structured
//! action requests for campaign, template, and audience management.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
