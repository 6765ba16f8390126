use serde::{Deserialize, Serialize};
use serde_json::json;

use super::{
    parse_object, render_format_instructions, required_string, required_string_list, SchemaError,
};

/// Final structured research summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResearchResponse {
    /// Short title / topic of the research
    pub topic: String,

    /// Concise summary of the findings
    pub summary: String,

    /// Sources used (URLs or source names)
    pub sources: Vec<String>,

    /// Tools used during the research; rewritten from actual dispatches
    pub tools_used: Vec<String>,
}

impl ResearchResponse {
    /// Parse and validate a raw model response.
    pub fn parse(content: &str) -> Result<Self, SchemaError> {
        let map = parse_object(content)?;

        Ok(Self {
            topic: required_string(&map, "topic")?,
            summary: required_string(&map, "summary")?,
            sources: required_string_list(&map, "sources")?,
            tools_used: required_string_list(&map, "tools_used")?,
        })
    }

    /// Replace whatever the model claimed with the tools that actually ran,
    /// sorted and without duplicates.
    pub fn reconcile_tools_used<I, S>(&mut self, dispatched: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut tools: Vec<String> = dispatched.into_iter().map(Into::into).collect();
        tools.sort();
        tools.dedup();
        self.tools_used = tools;
    }

    /// Instructions embedded in the final prompt.
    pub fn format_instructions() -> String {
        render_format_instructions(&json!({
            "properties": {
                "topic": {
                    "description": "Short title / topic of the research paper",
                    "title": "Topic",
                    "type": "string"
                },
                "summary": {
                    "description": "A concise summary of the research findings / answer",
                    "title": "Summary",
                    "type": "string"
                },
                "sources": {
                    "description": "List of sources used (URLs or source names)",
                    "items": {"type": "string"},
                    "title": "Sources",
                    "type": "array"
                },
                "tools_used": {
                    "description": "List of tools used in the research",
                    "items": {"type": "string"},
                    "title": "Tools Used",
                    "type": "array"
                }
            },
            "required": ["topic", "summary", "sources", "tools_used"]
        }))
    }
}
