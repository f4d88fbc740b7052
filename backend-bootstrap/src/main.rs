use anyhow::Result;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "combatlog-backend")]
#[command(about = "Combat log ingestion and match report server", long_about = None)]
struct Args {
    /// Path to config file
    #[arg(short, long)]
    config: Option<String>,

    /// Directory of combat logs to ingest at startup
    #[arg(long)]
    data_dir: Option<String>,

    /// Address to listen on, e.g. 0.0.0.0:8080
    #[arg(long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    if let Some(config) = args.config {
        std::env::set_var("COMBATLOG_CONFIG", config);
    }
    if let Some(data_dir) = args.data_dir {
        std::env::set_var("COMBATLOG_DATA_DIR", data_dir);
    }
    if let Some(bind) = args.bind {
        std::env::set_var("COMBATLOG_BIND_ADDR", bind);
    }

    backend_bootstrap::run().await
}
