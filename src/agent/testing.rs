//! Scripted model client for loop tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::llm::{LlmClient, LlmError, Prompt};

/// Replays canned responses in order and records every prompt it receives.
pub(crate) struct ScriptedLlm {
    responses: Mutex<VecDeque<String>>,
    prompts: Mutex<Vec<Prompt>>,
    fallback: Option<String>,
}

impl ScriptedLlm {
    pub(crate) fn new<I, S>(responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            responses: Mutex::new(responses.into_iter().map(Into::into).collect()),
            prompts: Mutex::new(Vec::new()),
            fallback: None,
        }
    }

    /// Answer with `response` once the script runs out.
    pub(crate) fn repeating(response: impl Into<String>) -> Self {
        Self {
            fallback: Some(response.into()),
            ..Self::new(Vec::<String>::new())
        }
    }

    pub(crate) fn prompts(&self) -> Vec<Prompt> {
        self.prompts.lock().expect("prompts lock").clone()
    }

    pub(crate) fn calls(&self) -> usize {
        self.prompts.lock().expect("prompts lock").len()
    }
}

#[async_trait]
impl LlmClient for ScriptedLlm {
    async fn complete(&self, prompt: &Prompt) -> Result<String, LlmError> {
        self.prompts.lock().expect("prompts lock").push(prompt.clone());
        let next = self.responses.lock().expect("responses lock").pop_front();
        next.or_else(|| self.fallback.clone())
            .ok_or(LlmError::EmptyResponse)
    }
}
