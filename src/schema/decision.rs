use serde::Serialize;
use serde_json::json;

use super::{
    optional_string, parse_object, render_format_instructions, required_string, SchemaError,
};

/// What the model wants to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Call a tool and keep researching
    Tool,
    /// Enough information gathered; write the answer
    Final,
}

/// One decision step, produced and consumed within a single loop iteration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgentDecision {
    pub action: Action,
    pub tool_name: Option<String>,
    pub tool_input: Option<String>,
}

impl AgentDecision {
    /// Parse and validate a raw model response.
    pub fn parse(content: &str) -> Result<Self, SchemaError> {
        let map = parse_object(content)?;

        let action = match required_string(&map, "action")?.as_str() {
            "tool" => Action::Tool,
            "final" => Action::Final,
            other => {
                return Err(SchemaError::InvalidEnumValue {
                    field: "action",
                    value: other.to_string(),
                })
            }
        };

        Ok(Self {
            action,
            tool_name: optional_string(&map, "tool_name")?,
            tool_input: optional_string(&map, "tool_input")?,
        })
    }

    /// Instructions embedded in the decision prompt.
    pub fn format_instructions() -> String {
        render_format_instructions(&json!({
            "properties": {
                "action": {
                    "description": "Whether to call a tool or produce the final answer",
                    "enum": ["tool", "final"],
                    "title": "Action",
                    "type": "string"
                },
                "tool_name": {
                    "anyOf": [{"type": "string"}, {"type": "null"}],
                    "default": null,
                    "description": "Tool name if action=tool",
                    "title": "Tool Name"
                },
                "tool_input": {
                    "anyOf": [{"type": "string"}, {"type": "null"}],
                    "default": null,
                    "description": "Input to the tool if action=tool",
                    "title": "Tool Input"
                }
            },
            "required": ["action"]
        }))
    }
}
