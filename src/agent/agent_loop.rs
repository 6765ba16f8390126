//! Core decision loop implementation.

use std::sync::Arc;

use crate::config::Config;
use crate::llm::{AnthropicClient, LlmClient};
use crate::schema::{Action, AgentDecision, ResearchResponse};
use crate::tools::{Tool, ToolRegistry};

use super::error::{AgentError, DispatchError};
use super::notes::Notes;
use super::prompt::build_decision_prompt;

/// Where the loop is. Success and abort are the loop's return values.
enum LoopState<'a> {
    Deciding,
    Dispatching { tool: &'a Tool, tool_input: String },
    Finalizing,
}

/// What the decision loop gathered before handing over to the finalizer.
#[derive(Debug, Clone, Default)]
pub struct LoopOutcome {
    pub notes: Notes,

    /// Tool names in dispatch order, duplicates included
    pub tools_used: Vec<String>,

    /// Number of decision-step model calls made
    pub decision_calls: usize,
}

/// The research agent.
pub struct Agent {
    pub(super) config: Config,
    pub(super) llm: Arc<dyn LlmClient>,
    pub(super) tools: ToolRegistry,
}

impl Agent {
    /// Create an agent from explicit parts.
    pub fn new(config: Config, llm: Arc<dyn LlmClient>, tools: ToolRegistry) -> Self {
        Self { config, llm, tools }
    }

    /// Create an agent talking to Anthropic with the built-in tools.
    pub fn from_config(config: Config) -> anyhow::Result<Self> {
        let llm = Arc::new(AnthropicClient::new(&config)?);
        let tools = ToolRegistry::with_defaults(&config)?;
        Ok(Self::new(config, llm, tools))
    }

    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }

    /// Research `query` and return the structured summary.
    pub async fn run(&self, query: &str) -> Result<ResearchResponse, AgentError> {
        tracing::info!(query, "Research run started");
        let outcome = self.gather(query).await?;
        self.finalize(outcome).await
    }

    /// Run decision steps until the model finishes or the budget is spent.
    pub async fn gather(&self, query: &str) -> Result<LoopOutcome, AgentError> {
        let mut outcome = LoopOutcome::default();
        let mut iterations = 0;
        let mut state = LoopState::Deciding;

        loop {
            state = match state {
                LoopState::Deciding if iterations >= self.config.max_iterations => {
                    tracing::info!(
                        iterations,
                        "Iteration budget spent, finalizing with current notes"
                    );
                    LoopState::Finalizing
                }
                LoopState::Deciding => {
                    tracing::debug!("Agent iteration {}", iterations + 1);
                    let decision = self.decide(query, &mut outcome).await?;
                    self.route(decision, &mut outcome.notes)?
                }
                LoopState::Dispatching { tool, tool_input } => {
                    self.dispatch(tool, &tool_input, &mut outcome).await;
                    iterations += 1;
                    LoopState::Deciding
                }
                LoopState::Finalizing => return Ok(outcome),
            };
        }
    }

    /// One decision-step model call, parsed against the decision schema.
    async fn decide(
        &self,
        query: &str,
        outcome: &mut LoopOutcome,
    ) -> Result<AgentDecision, AgentError> {
        let prompt = build_decision_prompt(&self.tools, query, &outcome.notes);
        outcome.decision_calls += 1;
        let raw = self.llm.complete(&prompt).await?;

        AgentDecision::parse(&raw).map_err(|source| {
            tracing::warn!(%source, "Model returned an invalid decision");
            AgentError::DecisionParse { source, raw }
        })
    }

    /// Validate a decision and pick the next state.
    fn route(
        &self,
        decision: AgentDecision,
        notes: &mut Notes,
    ) -> Result<LoopState<'_>, AgentError> {
        if decision.action == Action::Final {
            tracing::info!("Agent chose to finalize");
            return Ok(LoopState::Finalizing);
        }

        let (tool_name, tool_input) = match (decision.tool_name, decision.tool_input) {
            (Some(name), Some(input)) if !name.is_empty() && !input.is_empty() => (name, input),
            _ => {
                return Err(abort(
                    notes,
                    "Tool step missing tool_name or tool_input",
                    DispatchError::MissingFields,
                ))
            }
        };

        let Some(tool) = self.tools.lookup(&tool_name) else {
            return Err(abort(
                notes,
                &format!("Unknown tool: {tool_name}"),
                DispatchError::UnknownTool(tool_name),
            ));
        };

        Ok(LoopState::Dispatching { tool, tool_input })
    }

    /// Run a tool once. Failures become the recorded result.
    async fn dispatch(&self, tool: &Tool, tool_input: &str, outcome: &mut LoopOutcome) {
        let tool_name = tool.name();
        tracing::info!(tool = tool_name, input = tool_input, "Calling tool");
        let result = match tool.call(tool_input).await {
            Ok(output) => output,
            Err(e) => {
                tracing::warn!(tool = tool_name, error = %e, "Tool failed");
                format!("[Tool Error] {e}")
            }
        };

        outcome.tools_used.push(tool_name.to_string());
        outcome.notes.push_tool_result(tool_name, tool_input, &result);
    }
}

fn abort(notes: &mut Notes, issue: &str, source: DispatchError) -> AgentError {
    tracing::warn!(%source, "Aborting research loop");
    notes.push_issue(issue);
    AgentError::ToolDispatch {
        source,
        notes: notes.to_string(),
    }
}
