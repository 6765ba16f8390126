use crate::schema::ResearchResponse;

use super::agent_loop::{Agent, LoopOutcome};
use super::error::AgentError;
use super::prompt::build_final_prompt;

impl Agent {
    /// Ask for the structured summary of the gathered notes.
    ///
    /// Whatever the model lists under `tools_used` is replaced by the tools
    /// that actually ran, sorted and deduplicated.
    pub async fn finalize(&self, outcome: LoopOutcome) -> Result<ResearchResponse, AgentError> {
        let prompt = build_final_prompt(&outcome.notes);
        let raw = self.llm.complete(&prompt).await?;

        let mut response = ResearchResponse::parse(&raw).map_err(|source| {
            tracing::warn!(%source, "Model returned an invalid research response");
            AgentError::FinalParse { source, raw }
        })?;

        if response.tools_used != outcome.tools_used {
            tracing::debug!(
                claimed = ?response.tools_used,
                "Replacing model-reported tools with dispatched tools"
            );
        }
        response.reconcile_tools_used(outcome.tools_used);

        tracing::info!(
            topic = %response.topic,
            sources = response.sources.len(),
            tools = ?response.tools_used,
            "Research run finished"
        );
        Ok(response)
    }
}
