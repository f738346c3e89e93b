//! Tool registry - manages tool registration and invocation

use std::collections::HashMap;

use serde_json::Value;

use super::{
    CareerPathsTool, InterviewQaTool, LearningMaterialsTool, ResumeExamplesTool, SimpleExplanationsTool, Tool,
    ToolContext, VacancyReviewsTool,
};
use crate::error::{AssistantError, Result};
use crate::llm::ToolDefinition;

/// Named tools in registration order
pub struct ToolRegistry {
    tools: Vec<Box<dyn Tool>>,
    index: HashMap<&'static str, usize>,
    context: ToolContext,
}

impl ToolRegistry {
    /// Create registry with the built-in career and learning tools
    pub fn standard(context: ToolContext) -> Self {
        let mut registry = Self::new(context);

        // Career
        registry.register(Box::new(ResumeExamplesTool));
        registry.register(Box::new(VacancyReviewsTool));
        registry.register(Box::new(InterviewQaTool));

        // Learning
        registry.register(Box::new(CareerPathsTool));
        registry.register(Box::new(LearningMaterialsTool));
        registry.register(Box::new(SimpleExplanationsTool));

        registry
    }

    /// Create an empty registry (for custom tool sets)
    pub fn new(context: ToolContext) -> Self {
        Self {
            tools: Vec::new(),
            index: HashMap::new(),
            context,
        }
    }

    /// Add a tool. A second tool with the same name replaces the first in place.
    pub fn register(&mut self, tool: Box<dyn Tool>) {
        let name = tool.name();
        match self.index.get(name) {
            Some(&slot) => {
                log::warn!("Tool {} registered twice, replacing the earlier definition", name);
                self.tools[slot] = tool;
            }
            None => {
                self.index.insert(name, self.tools.len());
                self.tools.push(tool);
            }
        }
    }

    /// Get tool definitions for LLM
    pub fn describe(&self) -> Vec<ToolDefinition> {
        self.tools
            .iter()
            .map(|t| ToolDefinition::new(t.name(), t.description(), t.input_schema()))
            .collect()
    }

    /// Look up a tool by name and run it
    pub async fn invoke(&self, name: &str, arguments: Value) -> Result<Value> {
        let tool = self
            .index
            .get(name)
            .map(|&slot| &self.tools[slot])
            .ok_or_else(|| AssistantError::ToolNotFound(name.to_string()))?;

        log::debug!("Invoking tool {} with {}", name, arguments);
        tool.execute(arguments, &self.context)
            .await
            .map_err(|e| AssistantError::Tool(format!("{}: {:#}", name, e)))
    }

    /// Check if a tool exists
    pub fn has_tool(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Get the list of tool names
    pub fn tool_names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name()).collect()
    }

    pub fn context(&self) -> &ToolContext {
        &self.context
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::standard(ToolContext::default())
    }
}
