//! WebServer entry point
//!
//! Serves the analysis API on localhost for the browser extension.

use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;

use analyzer::Analyzer;
use shared::{logging, process_info, AnalyzerConfig, ConfigOverrides, ProcessId};
use webserver::{WebServer, WebServerError, WebServerResult};

#[derive(Parser, Debug)]
#[command(name = "webserver")]
#[command(about = "Local HTTP API for headline and article analysis")]
struct Args {
    /// Port for the HTTP server
    #[arg(long, default_value = "8080")]
    port: u16,

    /// Workflow service base URL (overrides HEADLINE_METER_BASE_URL)
    #[arg(long)]
    base_url: Option<String>,

    /// Workflow identifier (overrides HEADLINE_METER_WORKFLOW_ID)
    #[arg(long)]
    workflow_id: Option<String>,

    /// Missing-output policy: raw-fallback or required
    #[arg(long)]
    output_policy: Option<String>,

    /// JSON file used as persistent result cache
    #[arg(long)]
    cache_file: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> WebServerResult<()> {
    dotenv::dotenv().ok();
    let args = Args::parse();

    ProcessId::init_webserver();
    logging::init_tracing_with_level(Some(&args.log_level));

    let config = AnalyzerConfig::from_env()?.with_overrides(ConfigOverrides {
        base_url: args.base_url,
        workflow_id: args.workflow_id,
        output_policy: args.output_policy,
        cache_file: args.cache_file,
    })?;

    let bind_address: SocketAddr = format!("127.0.0.1:{}", args.port)
        .parse()
        .map_err(|e| WebServerError::ServerStartup(format!("Invalid port: {}", e)))?;

    logging::log_startup(ProcessId::current(), &format!("HTTP API on {}", bind_address));
    process_info!(
        ProcessId::current(),
        "🔧 Workflow {} at {} (output policy: {}, cache: {})",
        config.workflow_id,
        config.base_url,
        config.output_policy,
        config
            .cache_file
            .as_ref()
            .map(|path| path.display().to_string())
            .unwrap_or_else(|| "memory only".to_string())
    );

    let webserver = WebServer::new(bind_address, Analyzer::from_config(&config));
    webserver.run().await?;

    logging::log_success(ProcessId::current(), "WebServer stopped gracefully");
    Ok(())
}
