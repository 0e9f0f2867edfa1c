//! Payslip server
//!
//! Serves the employee, adjustment and payslip endpoints over HTTP.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use payslip_engine::api::{AppState, create_router};
use payslip_engine::config::ConfigLoader;
use payslip_engine::store::InMemoryEmployeeStore;

/// Payslip server - salary adjustments and PDF payslips over HTTP
#[derive(Parser, Debug)]
#[command(name = "payslip-server")]
#[command(version, about, long_about = None)]
struct Args {
    /// Configuration directory containing app.yaml and layout.yaml
    #[arg(
        short,
        long,
        value_name = "DIR",
        env = "PAYSLIP_CONFIG",
        default_value = "./config/payslip"
    )]
    config: PathBuf,

    /// Host address to bind to
    #[arg(long, env = "PAYSLIP_HOST")]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "PAYSLIP_PORT")]
    port: Option<u16>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "PAYSLIP_LOG_LEVEL")]
    log_level: Option<String>,
}

fn init_tracing(log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = ConfigLoader::load(&args.config)?;

    let server = config.server();
    let host = args.host.unwrap_or_else(|| server.host.clone());
    let port = args.port.unwrap_or(server.port);
    let log_level = args.log_level.unwrap_or_else(|| server.log_level.clone());

    init_tracing(&log_level);

    tracing::info!(
        config_dir = %args.config.display(),
        template = %config.payslip().template_path.display(),
        font_size = config.payslip().font_size,
        date_format = %config.payslip().date_format,
        "Configuration loaded"
    );
    if !config.payslip().template_path.exists() {
        tracing::warn!(
            template = %config.payslip().template_path.display(),
            "Payslip template not found; payslip downloads will fail"
        );
    }

    let state = AppState::from_config(&config, Arc::new(InMemoryEmployeeStore::new()));
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind((host.as_str(), port)).await?;
    tracing::info!(address = %listener.local_addr()?, "Starting server");

    axum::serve(listener, app).await?;

    Ok(())
}
