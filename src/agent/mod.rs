//! Agent module - the research decision loop.
//!
//! The agent follows a bounded "tools in a loop" pattern:
//! 1. Ask the model whether to call a tool or finish, given the query and notes
//! 2. If it picks a tool, run it once and append the result to the notes
//! 3. Repeat until the model finishes or the iteration budget is spent
//! 4. Ask the model for a structured summary of the notes

mod agent_loop;
mod error;
mod finalize;
mod notes;
mod prompt;

#[cfg(test)]
pub(crate) mod testing;

pub use agent_loop::{Agent, LoopOutcome};
pub use error::{AgentError, DispatchError};
pub use notes::Notes;
pub use prompt::{build_decision_prompt, build_final_prompt};
