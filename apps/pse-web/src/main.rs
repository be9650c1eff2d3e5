use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use pse_app::{AppConfig, AppResult};
use pse_web::AppState;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pse-web")]
#[command(about = "PSE gas release calculator - HTTP API", long_about = None)]
struct Args {
    /// YAML configuration file
    #[arg(long)]
    config: Option<PathBuf>,
    /// Saved calculations file (overrides config and PSE_STORE)
    #[arg(long)]
    store: Option<PathBuf>,
    /// Listen address (overrides config and PSE_BIND)
    #[arg(long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> AppResult<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = Args::parse();
    let mut config = AppConfig::load(args.config.as_deref())?;
    config.apply_overrides(args.store, args.bind);

    let state = Arc::new(AppState::open(&config.store_path));
    pse_web::serve(state, &config.bind).await?;
    Ok(())
}
