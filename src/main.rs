//! Research Agent - command line entry point.
//!
//! Prints the research summary as JSON on stdout. Logs go to stderr.

use std::process::ExitCode;

use clap::Parser;
use research_agent::agent::{Agent, AgentError};
use research_agent::config::Config;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_QUERY: &str =
    "Provide a detailed research summary on the impact of climate change on marine biodiversity.";

#[derive(Debug, Parser)]
#[command(name = "research-agent", version, about)]
struct Cli {
    /// Research question
    #[arg(default_value = DEFAULT_QUERY)]
    query: String,

    /// Model identifier (overrides RESEARCH_MODEL)
    #[arg(long)]
    model: Option<String>,

    /// Maximum decision steps (overrides MAX_ITERATIONS)
    #[arg(long)]
    max_iterations: Option<usize>,

    /// File the save tool appends to (overrides RESEARCH_OUTPUT_PATH)
    #[arg(long)]
    output: Option<std::path::PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Missing .env is fine; the environment may already be populated.
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "research_agent=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = Config::from_env()?;
    if let Some(model) = cli.model {
        config.model = model;
    }
    if let Some(max_iterations) = cli.max_iterations {
        config.max_iterations = max_iterations;
    }
    if let Some(output) = cli.output {
        config.output_path = output;
    }
    info!(
        "Loaded configuration: model={}, max_iterations={}",
        config.model, config.max_iterations
    );

    let agent = Agent::from_config(config)?;

    match agent.run(&cli.query).await {
        Ok(response) => {
            println!("{}", serde_json::to_string_pretty(&response)?);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            println!("\n{e}");
            if let Some(diagnostic) = e.diagnostic() {
                let label = match &e {
                    AgentError::ToolDispatch { .. } => "Notes",
                    AgentError::FinalParse { .. } => "Raw final output",
                    _ => "Raw decision output",
                };
                println!("\n{label}:\n{diagnostic}");
            }
            Ok(ExitCode::FAILURE)
        }
    }
}
