use std::fmt;

/// Append-only transcript of tool results carried between model calls.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Notes {
    text: String,
    tool_blocks: usize,
}

impl Notes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one tool call and what it returned.
    pub fn push_tool_result(&mut self, tool_name: &str, tool_input: &str, result: &str) {
        self.text.push_str(&format!(
            "\n[Tool: {tool_name} | Input: {tool_input}]\nResult: {result}\n"
        ));
        self.tool_blocks += 1;
    }

    /// Record a problem with the agent's own decision.
    pub fn push_issue(&mut self, message: &str) {
        self.text.push_str(&format!("\n[Agent Issue] {message}\n"));
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Number of tool result blocks appended so far.
    pub fn tool_blocks(&self) -> usize {
        self.tool_blocks
    }
}

impl fmt::Display for Notes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tool_block_format() {
        let mut notes = Notes::new();
        notes.push_tool_result("search", "X", "Y");
        assert_eq!(notes.as_str(), "\n[Tool: search | Input: X]\nResult: Y\n");
        assert_eq!(notes.tool_blocks(), 1);
    }

    #[test]
    fn issues_do_not_count_as_tool_blocks() {
        let mut notes = Notes::new();
        notes.push_issue("Unknown tool: nonexistent");
        assert_eq!(notes.as_str(), "\n[Agent Issue] Unknown tool: nonexistent\n");
        assert_eq!(notes.tool_blocks(), 0);
        assert!(!notes.is_empty());
    }
}
