//! Tool registry and built-in research tools.
//!
//! Every tool takes one string argument and returns a string. The built-ins
//! are a closed set of variants dispatched by a single `match`; embedders can
//! add their own with [`ToolHandler::custom`] or [`ToolHandler::from_fn`]
//! passed to [`ToolRegistry::register`].

mod save;
mod web;
mod wiki;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::config::Config;

pub use save::SaveToFile;
pub use web::WebSearch;
pub use wiki::WikiLookup;

pub const SEARCH_TOOL: &str = "search";
pub const WIKI_TOOL: &str = "wikipedia";
pub const SAVE_TOOL: &str = "save_text_to_file";

/// A tool failed while running.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("{tool} failed: {source:#}")]
    Execution {
        tool: String,
        #[source]
        source: anyhow::Error,
    },
}

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("tool already registered: {0}")]
    Duplicate(String),

    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// A user-supplied tool body.
#[async_trait]
pub trait ToolFunction: Send + Sync {
    async fn call(&self, input: &str) -> anyhow::Result<String>;
}

/// Adapts a synchronous closure into a [`ToolFunction`].
struct FnTool<F>(F);

#[async_trait]
impl<F> ToolFunction for FnTool<F>
where
    F: Fn(&str) -> anyhow::Result<String> + Send + Sync,
{
    async fn call(&self, input: &str) -> anyhow::Result<String> {
        (self.0)(input)
    }
}

/// What runs when a tool is called.
pub enum ToolHandler {
    Search(WebSearch),
    WikiLookup(WikiLookup),
    SaveToFile(SaveToFile),
    Custom(Arc<dyn ToolFunction>),
}

impl ToolHandler {
    pub fn custom(func: impl ToolFunction + 'static) -> Self {
        Self::Custom(Arc::new(func))
    }

    /// Wrap a plain synchronous function.
    pub fn from_fn<F>(func: F) -> Self
    where
        F: Fn(&str) -> anyhow::Result<String> + Send + Sync + 'static,
    {
        Self::custom(FnTool(func))
    }

    async fn run(&self, input: &str) -> anyhow::Result<String> {
        match self {
            Self::Search(tool) => tool.run(input).await,
            Self::WikiLookup(tool) => tool.run(input).await,
            Self::SaveToFile(tool) => tool.run(input).await,
            Self::Custom(func) => func.call(input).await,
        }
    }
}

/// A named, described, single-argument tool.
pub struct Tool {
    name: String,
    description: String,
    handler: ToolHandler,
}

impl Tool {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Run the tool once.
    pub async fn call(&self, input: &str) -> Result<String, ToolError> {
        self.handler
            .run(input)
            .await
            .map_err(|source| ToolError::Execution {
                tool: self.name.clone(),
                source,
            })
    }
}

/// Tools available to the agent, in registration order.
#[derive(Default)]
pub struct ToolRegistry {
    tools: Vec<Tool>,
}

impl ToolRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the built-in search, wikipedia and save tools.
    pub fn with_defaults(config: &Config) -> Result<Self, RegistryError> {
        let mut registry = Self::new();
        registry.register(
            SEARCH_TOOL,
            "Search the web for relevant and recent information on a given topic.",
            ToolHandler::Search(WebSearch::new()?),
        )?;
        registry.register(
            WIKI_TOOL,
            "Look up a topic on Wikipedia and return a concise summary.",
            ToolHandler::WikiLookup(WikiLookup::new(config.wiki.clone())?),
        )?;
        registry.register(
            SAVE_TOOL,
            "Saves the provided research output text to a local .txt file with a timestamp.",
            ToolHandler::SaveToFile(SaveToFile::new(config.output_path.clone())),
        )?;
        Ok(registry)
    }

    /// Add a tool. Names are unique.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        handler: ToolHandler,
    ) -> Result<(), RegistryError> {
        let name = name.into();
        if self.lookup(&name).is_some() {
            return Err(RegistryError::Duplicate(name));
        }
        self.tools.push(Tool {
            name,
            description: description.into(),
            handler,
        });
        Ok(())
    }

    /// Find a tool by its exact name.
    pub fn lookup(&self, name: &str) -> Option<&Tool> {
        self.tools.iter().find(|tool| tool.name == name)
    }

    pub fn list_tools(&self) -> &[Tool] {
        &self.tools
    }

    /// One `name: description` line per tool.
    pub fn describe(&self) -> String {
        self.tools
            .iter()
            .map(|t| format!("{}: {}", t.name, t.description))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn echo_registry() -> ToolRegistry {
        let mut registry = ToolRegistry::new();
        registry
            .register(
                "echo",
                "Repeat the input.",
                ToolHandler::from_fn(|input: &str| Ok(format!("echo: {input}"))),
            )
            .expect("register echo");
        registry
            .register(
                "broken",
                "Always fails.",
                ToolHandler::from_fn(|_: &str| Err(anyhow::anyhow!("connection reset"))),
            )
            .expect("register broken");
        registry
    }

    #[test]
    fn defaults_register_three_tools_in_order() {
        let config = Config::new("key".to_string(), "model".to_string());
        let registry = ToolRegistry::with_defaults(&config).expect("registry");
        let names: Vec<&str> = registry.list_tools().iter().map(Tool::name).collect();
        assert_eq!(names, vec![SEARCH_TOOL, WIKI_TOOL, SAVE_TOOL]);
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let mut registry = echo_registry();
        let err = registry
            .register("echo", "again", ToolHandler::from_fn(|_: &str| Ok(String::new())))
            .unwrap_err();
        assert!(matches!(err, RegistryError::Duplicate(name) if name == "echo"));
    }

    #[test]
    fn lookup_is_exact() {
        let registry = echo_registry();
        assert!(registry.lookup("echo").is_some());
        assert!(registry.lookup("Echo").is_none());
        assert!(registry.lookup("nonexistent").is_none());
    }

    #[test]
    fn describe_lists_name_and_description() {
        assert_eq!(
            echo_registry().describe(),
            "echo: Repeat the input.\nbroken: Always fails."
        );
    }

    #[tokio::test]
    async fn call_runs_custom_handler() {
        let registry = echo_registry();
        let tool = registry.lookup("echo").expect("echo");
        assert_eq!(tool.call("hi").await.expect("call"), "echo: hi");
    }

    #[tokio::test]
    async fn call_wraps_failures_with_tool_name() {
        let registry = echo_registry();
        let tool = registry.lookup("broken").expect("broken");
        let err = tool.call("hi").await.unwrap_err();
        assert_eq!(err.to_string(), "broken failed: connection reset");
    }
}
