//! Prompt templates for the decision and final steps.

use crate::llm::Prompt;
use crate::schema::{AgentDecision, ResearchResponse};
use crate::tools::ToolRegistry;

use super::notes::Notes;

/// Prompt asking the model whether to call a tool or finish.
pub fn build_decision_prompt(tools: &ToolRegistry, query: &str, notes: &Notes) -> Prompt {
    let system = format!(
        "You are an AI research agent.\n\
         You can use tools to gather information.\n\n\
         Available tools:\n\
         {tool_descriptions}\n\n\
         Decide the next step.\n\
         If you need external info, choose action=tool and specify tool_name and tool_input.\n\
         If you have enough info to answer, choose action=final.\n\n\
         Return ONLY valid JSON that matches the schema:\n\
         {format_instructions}",
        tool_descriptions = tools.describe(),
        format_instructions = AgentDecision::format_instructions(),
    );

    let user = format!("User Question: \n{query}\n\nCurrent notes (maybe empty): \n{notes}\n");

    Prompt { system, user }
}

/// Prompt asking for the structured research summary. Only the notes are
/// passed; anything the answer needs must already be in them.
pub fn build_final_prompt(notes: &Notes) -> Prompt {
    let system = format!(
        "You are a research assistant.\n\
         Use the notes to write the final answer.\n\
         Return ONLY valid JSON matching this schema:\n\
         {format_instructions}\n\
         No extra text.",
        format_instructions = ResearchResponse::format_instructions(),
    );

    let user = format!("Here are your research notes:\n{notes}\n");

    Prompt { system, user }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::ToolHandler;

    fn registry() -> ToolRegistry {
        let mut registry = ToolRegistry::new();
        registry
            .register(
                "search",
                "Search the web.",
                ToolHandler::from_fn(|_: &str| Ok(String::new())),
            )
            .expect("register");
        registry
    }

    #[test]
    fn decision_prompt_embeds_tools_query_and_notes() {
        let mut notes = Notes::new();
        notes.push_tool_result("search", "reefs", "bleaching events");

        let prompt = build_decision_prompt(&registry(), "What harms reefs?", &notes);

        assert!(prompt.system.contains("Available tools:\nsearch: Search the web.\n"));
        assert!(prompt.system.contains("\"action\""));
        assert!(prompt.user.starts_with("User Question: \nWhat harms reefs?\n"));
        assert!(prompt.user.contains("bleaching events"));
    }

    #[test]
    fn final_prompt_omits_the_query() {
        let mut notes = Notes::new();
        notes.push_tool_result("search", "reefs", "bleaching events");

        let prompt = build_final_prompt(&notes);

        assert!(prompt.system.contains("\"tools_used\""));
        assert!(prompt.system.ends_with("No extra text."));
        assert_eq!(
            prompt.user,
            "Here are your research notes:\n\n[Tool: search | Input: reefs]\nResult: bleaching events\n\n"
        );
    }
}
