//! AMW Chatbot - website assistant proxy for AMW Cooling & Heating.
//!
//! Relays visitor chat turns to a hosted LLM under a fixed business persona,
//! and emails captured leads and transcripts to the office inbox.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
