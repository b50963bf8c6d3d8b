use std::path::PathBuf;

use clap::Parser;
use docqa_server::{ServerSettings, run_server, telemetry::init_tracing};

/// Answer questions over a directory of text documents.
#[derive(Debug, Parser)]
#[command(name = "docqa-server", version, about)]
struct Cli {
    /// TOML config file (defaults to ./docqa.toml when present)
    #[arg(short, long, env = "DOCQA_CONFIG")]
    config: Option<PathBuf>,

    /// Directory of .txt documents to serve
    #[arg(short, long)]
    documents: Option<PathBuf>,

    /// Address to bind
    #[arg(long)]
    host: Option<String>,

    /// Port to bind
    #[arg(short, long)]
    port: Option<u16>,

    /// Log as JSON lines
    #[arg(long)]
    json_logs: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut settings = ServerSettings::load(cli.config.as_deref())?;
    if let Some(documents) = cli.documents {
        settings.documents_dir = documents;
    }
    if let Some(host) = cli.host {
        settings.host = host;
    }
    if let Some(port) = cli.port {
        settings.port = port;
    }
    if cli.json_logs {
        settings.log.json = true;
    }

    init_tracing(&settings.log)?;
    run_server(settings).await
}
