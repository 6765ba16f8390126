//! # Research Agent
//!
//! A minimal tool-using research agent.
//!
//! This library provides:
//! - A bounded decision loop that lets a language model pick tools
//! - Built-in web search, Wikipedia lookup and save-to-file tools
//! - Strict parsing of the model's JSON output into typed decisions and answers
//!
//! ## Architecture
//!
//! 1. Ask the model for a decision: call a tool, or finish
//! 2. Run the chosen tool and append its result to the notes
//! 3. Repeat at most `max_iterations` times
//! 4. Ask the model to turn the notes into a [`ResearchResponse`]
//!
//! ## Example
//!
//! ```rust,ignore
//! use research_agent::{agent::Agent, config::Config};
//!
//! let config = Config::from_env()?;
//! let agent = Agent::from_config(config)?;
//! let response = agent.run("How does ocean warming affect coral reefs?").await?;
//! println!("{}", serde_json::to_string_pretty(&response)?);
//! ```

pub mod agent;
pub mod config;
pub mod llm;
pub mod schema;
pub mod tools;

pub use config::Config;
pub use schema::ResearchResponse;
