use thiserror::Error;

use crate::llm::LlmError;
use crate::schema::SchemaError;

/// The model asked for a tool call the loop cannot honor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    #[error("tool step missing tool_name or tool_input")]
    MissingFields,

    #[error("unknown tool: {0}")]
    UnknownTool(String),
}

/// Reasons a research run ends without a structured response.
#[derive(Debug, Error)]
pub enum AgentError {
    #[error("failed to parse agent decision: {source}")]
    DecisionParse {
        #[source]
        source: SchemaError,
        raw: String,
    },

    #[error("agent stopped: {source}")]
    ToolDispatch {
        #[source]
        source: DispatchError,
        notes: String,
    },

    #[error("failed to parse final response: {source}")]
    FinalParse {
        #[source]
        source: SchemaError,
        raw: String,
    },

    #[error("model call failed: {0}")]
    Llm(#[from] LlmError),
}

impl AgentError {
    /// Text worth showing the user alongside the error: the raw model output
    /// for parse failures, the accumulated notes for dispatch failures.
    pub fn diagnostic(&self) -> Option<&str> {
        match self {
            Self::DecisionParse { raw, .. } | Self::FinalParse { raw, .. } => Some(raw),
            Self::ToolDispatch { notes, .. } => Some(notes),
            Self::Llm(_) => None,
        }
    }
}
