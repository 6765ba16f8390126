//! Configuration management for the research agent.
//!
//! Configuration can be set via environment variables (a `.env` file in the
//! working directory is loaded first by the binary):
//! - `ANTHROPIC_API_KEY` - Required. Your Anthropic API key.
//! - `RESEARCH_MODEL` - Optional. Model identifier. Defaults to `claude-sonnet-4-20250514`.
//! - `ANTHROPIC_BASE_URL` - Optional. API base URL. Defaults to `https://api.anthropic.com`.
//! - `MAX_ITERATIONS` - Optional. Maximum decision steps. Defaults to `3`.
//! - `MAX_TOKENS` - Optional. Completion token limit per model call. Defaults to `4096`.
//! - `REQUEST_TIMEOUT_SECS` - Optional. Model request timeout. Defaults to `120`.
//! - `RESEARCH_OUTPUT_PATH` - Optional. File used by `save_text_to_file`. Defaults to `research_output.txt`.
//! - `WIKI_TOP_K` - Optional. Wikipedia hits per lookup. Defaults to `1`.
//! - `WIKI_MAX_CHARS` - Optional. Wikipedia result length cap. Defaults to `500`.

use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";
pub const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
pub const DEFAULT_MAX_ITERATIONS: usize = 3;
pub const DEFAULT_OUTPUT_PATH: &str = "research_output.txt";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

/// Settings for the Wikipedia lookup tool.
#[derive(Debug, Clone)]
pub struct WikiConfig {
    /// Base URL of the wiki (API and REST endpoints hang off it)
    pub base_url: String,

    /// Number of search hits summarized per lookup
    pub top_k_results: usize,

    /// Maximum characters returned to the agent
    pub doc_content_chars_max: usize,
}

impl Default for WikiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://en.wikipedia.org".to_string(),
            top_k_results: 1,
            doc_content_chars_max: 500,
        }
    }
}

/// Agent configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Anthropic API key
    pub api_key: String,

    /// Model identifier
    pub model: String,

    /// Anthropic API base URL
    pub base_url: String,

    /// Maximum decision steps before the loop falls through to the final answer
    pub max_iterations: usize,

    /// Completion token limit per model call
    pub max_tokens: u32,

    /// Sampling temperature
    pub temperature: f32,

    /// Model request timeout in seconds
    pub request_timeout_secs: u64,

    /// File the save tool appends to
    pub output_path: PathBuf,

    pub wiki: WikiConfig,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingEnvVar` if `ANTHROPIC_API_KEY` is not set,
    /// and `ConfigError::InvalidValue` for numeric variables that fail to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = std::env::var("ANTHROPIC_API_KEY")
            .map_err(|_| ConfigError::MissingEnvVar("ANTHROPIC_API_KEY".to_string()))?;

        let model = std::env::var("RESEARCH_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        let base_url =
            std::env::var("ANTHROPIC_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let max_iterations = env_or("MAX_ITERATIONS", DEFAULT_MAX_ITERATIONS)?;
        let max_tokens = env_or("MAX_TOKENS", 4096)?;
        let request_timeout_secs = env_or("REQUEST_TIMEOUT_SECS", 120)?;

        let output_path = std::env::var("RESEARCH_OUTPUT_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_OUTPUT_PATH));

        let defaults = WikiConfig::default();
        let wiki = WikiConfig {
            top_k_results: env_or("WIKI_TOP_K", defaults.top_k_results)?,
            doc_content_chars_max: env_or("WIKI_MAX_CHARS", defaults.doc_content_chars_max)?,
            ..defaults
        };

        Ok(Self {
            api_key,
            model,
            base_url,
            max_iterations,
            max_tokens,
            temperature: 0.0,
            request_timeout_secs,
            output_path,
            wiki,
        })
    }

    /// Create a config with custom values (useful for testing).
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            api_key,
            model,
            base_url: DEFAULT_BASE_URL.to_string(),
            max_iterations: DEFAULT_MAX_ITERATIONS,
            max_tokens: 4096,
            temperature: 0.0,
            request_timeout_secs: 120,
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            wiki: WikiConfig::default(),
        }
    }
}

fn env_or<T>(name: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(name) {
        Ok(raw) => parse_value(name, &raw),
        Err(_) => Ok(default),
    }
}

fn parse_value<T>(name: &str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|e: T::Err| ConfigError::InvalidValue(name.to_string(), e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_uses_three_iterations() {
        let config = Config::new("key".to_string(), DEFAULT_MODEL.to_string());
        assert_eq!(config.max_iterations, 3);
        assert_eq!(config.output_path, PathBuf::from("research_output.txt"));
        assert_eq!(config.wiki.top_k_results, 1);
        assert_eq!(config.wiki.doc_content_chars_max, 500);
    }

    #[test]
    fn parse_value_trims_whitespace() {
        let parsed: usize = parse_value("MAX_ITERATIONS", " 5 ").expect("parse");
        assert_eq!(parsed, 5);
    }

    #[test]
    fn parse_value_reports_variable_name() {
        let err = parse_value::<usize>("MAX_ITERATIONS", "three").unwrap_err();
        match err {
            ConfigError::InvalidValue(name, _) => assert_eq!(name, "MAX_ITERATIONS"),
            other => panic!("unexpected error: {other}"),
        }
    }
}
