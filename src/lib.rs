//! Careerist - career and learning assistant
//!
//! Rule-based career and learning agents, a set of local lookup tools, and a
//! chat relay that lets GigaChat call those tools (or falls back to answering
//! from them offline).

pub mod agents;
pub mod config;
pub mod documents;
pub mod error;
pub mod llm;
pub mod orchestrator;
pub mod tools;

pub use error::{AssistantError, Result};
