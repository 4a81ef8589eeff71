//! CampusCare CLI entry point.
//!
//! This binary is the composition root. Responsibilities:
//!
//! 1. **Parse configuration**: load `campus-care.toml` (or `--config`) and
//!    validate it before anything else happens.
//! 2. **Wire observability**: `tracing-subscriber` with a pretty or JSON fmt
//!    layer and, when configured, an OpenTelemetry OTLP exporter.
//! 3. **Construct infrastructure**: an [`llm::AnthropicClassifier`] injected
//!    into a [`triage::IssueFactory`], and one [`triage::IssueStore`] per run.
//! 4. **Select mode**: an interactive session, or a one-shot submission that
//!    prints the created issue as JSON.

mod config;
mod render;
mod session;
mod telemetry;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, Context};
use clap::{Parser, Subcommand};
use llm::AnthropicClassifier;
use tracing::info;
use triage::{IssueFactory, IssueStore, Timestamp};

use crate::config::AppConfig;
use crate::session::Session;

#[derive(Debug, Parser)]
#[command(name = "campus-care", version, about = "Facility-maintenance issue intake and triage")]
struct Cli {
    /// Configuration file (defaults to ./campus-care.toml when present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Start an interactive triage session (the default).
    Session {
        /// Start with the two sample issues.
        #[arg(long)]
        demo: bool,
    },
    /// Classify one description and print the new issue as JSON.
    Submit {
        /// Free-text description of the problem.
        description: String,
    },
}

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("campus-care error: {error:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref())?;
    let _telemetry = telemetry::init(&config.telemetry)?;

    let classifier = AnthropicClassifier::from_config(&config.classifier)
        .context("failed to set up the classifier")?;
    info!(model = classifier.model_name(), "Classifier ready");
    let factory = IssueFactory::new(Arc::new(classifier));

    match cli.command.unwrap_or(Commands::Session { demo: false }) {
        Commands::Session { demo } => {
            let store = if demo {
                IssueStore::with_issues(triage::seed::demo_issues(Timestamp::now())?)
            } else {
                IssueStore::new()
            };
            let session = Session::new(factory, Arc::new(store));
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            tokio::select! {
                result = session.run(stdin, tokio::io::stdout()) => result,
                _ = tokio::signal::ctrl_c() => {
                    // Any in-flight classification is dropped here; nothing
                    // partial reaches the store.
                    info!("Interrupted; session abandoned");
                    Ok(())
                }
            }
        }
        Commands::Submit { description } => {
            let session = Session::new(factory, Arc::new(IssueStore::new()));
            let issue = session
                .submit(description)
                .await
                .map_err(|e| anyhow!(render::user_message(&e)))?;
            println!("{}", serde_json::to_string_pretty(&issue)?);
            Ok(())
        }
    }
}
