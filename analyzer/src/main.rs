//! Main entry point for the analyzer binary
//!
//! Analyzes a single URL against the workflow service and prints the
//! assessment.

use clap::Parser;
use std::path::PathBuf;
use tokio::signal;

use analyzer::{Analyzer, AnalyzerError, AnalyzerResult};
use shared::{logging, process_debug, AnalyzerConfig, ConfigOverrides, ProcessId};

/// Assess the tone, bias and emotional impact of a headline or article URL
#[derive(Parser)]
#[command(name = "analyzer")]
#[command(about = "Submits a URL to the headline analysis workflow and prints the assessment")]
pub struct Args {
    /// Page URL to analyze
    #[arg(long)]
    pub url: String,

    /// Workflow service base URL (overrides HEADLINE_METER_BASE_URL)
    #[arg(long)]
    pub base_url: Option<String>,

    /// Workflow identifier (overrides HEADLINE_METER_WORKFLOW_ID)
    #[arg(long)]
    pub workflow_id: Option<String>,

    /// Missing-output policy: raw-fallback or required
    #[arg(long)]
    pub output_policy: Option<String>,

    /// JSON file used as persistent result cache
    #[arg(long)]
    pub cache_file: Option<PathBuf>,

    /// Print the full record as JSON instead of the assessment text
    #[arg(long)]
    pub json: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

#[tokio::main]
async fn main() -> AnalyzerResult<()> {
    dotenv::dotenv().ok();
    let args = Args::parse();

    ProcessId::init_analyzer();
    logging::init_tracing_with_level(Some(&args.log_level));

    let config = AnalyzerConfig::from_env()?.with_overrides(ConfigOverrides {
        base_url: args.base_url,
        workflow_id: args.workflow_id,
        output_policy: args.output_policy,
        cache_file: args.cache_file,
    })?;

    if args.url.trim().is_empty() {
        return Err(AnalyzerError::Configuration {
            field: "url must not be empty".to_string(),
        });
    }

    logging::log_startup(ProcessId::current(), &format!("analysis of {}", args.url));
    process_debug!(
        ProcessId::current(),
        "Workflow {} at {} (output policy: {})",
        config.workflow_id,
        config.base_url,
        config.output_policy
    );

    let analyzer = Analyzer::from_config(&config);

    let record = tokio::select! {
        record = analyzer.analyze_and_wait(&args.url) => record,
        _ = signal::ctrl_c() => {
            logging::log_shutdown(ProcessId::current(), "Received Ctrl+C signal");
            analyzer.cancel(&args.url).await;
            std::process::exit(130);
        }
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&record)?);
    } else if let Some(result) = &record.result {
        println!("{result}");
    }

    if let Some(error) = &record.error {
        logging::log_error(ProcessId::current(), "Analysis", error);
        if !args.json {
            eprintln!("Error: {error}");
        }
        std::process::exit(1);
    }

    Ok(())
}
