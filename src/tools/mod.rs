//! Tool system for LLM interactions
//!
//! Tools are deterministic lookups over static career and learning data.
//! Some of them can also read a document referenced by path and return a
//! bounded excerpt of it.

mod career;
mod context;
mod learning;
mod registry;

pub use context::ToolContext;
pub use registry::ToolRegistry;

use async_trait::async_trait;
use serde_json::Value;

/// A tool that can be called by the LLM
#[async_trait]
pub trait Tool: Send + Sync {
    /// Tool name (matches the function name advertised to the LLM)
    fn name(&self) -> &'static str;

    /// Human-readable description
    fn description(&self) -> &'static str;

    /// JSON Schema for input parameters
    fn input_schema(&self) -> Value;

    /// Execute the tool
    async fn execute(&self, input: Value, ctx: &ToolContext) -> Result<Value, eyre::Error>;
}

pub use career::{InterviewQaTool, ResumeExamplesTool, VacancyReviewsTool};
pub use learning::{CareerPathsTool, LearningMaterialsTool, SimpleExplanationsTool};

/// Optional string argument; empty strings count as absent
pub(crate) fn str_arg<'a>(input: &'a Value, key: &str) -> Option<&'a str> {
    input[key].as_str().filter(|s| !s.is_empty())
}
