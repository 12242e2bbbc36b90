//! Dashboard entry point
//!
//! Serves the device map and its JSON API. Configuration comes from flags,
//! the environment and an optional `.env` file.

use clap::Parser;
use shared::{DashboardConfig, ProcessId, logging, process_info};

use dashboard::{
    cli::SourceArgs, ConfiguredStore, DashboardError, DashboardResult, DashboardServer, RealStaticFileServer,
};

#[derive(Parser, Debug)]
#[command(name = "dashboard")]
#[command(about = "US map of smart water heater relay activity")]
struct Args {
    /// Port for the HTTP server
    #[arg(long, env = "PORT", default_value = "8080")]
    port: u16,

    /// Interface to bind
    #[arg(long, env = "HOST", default_value = "127.0.0.1")]
    host: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Static files directory
    #[arg(long, env = "STATIC_DIR", default_value = "./static")]
    static_dir: String,

    #[command(flatten)]
    source: SourceArgs,
}

impl Args {
    fn into_config(self) -> DashboardResult<DashboardConfig> {
        Ok(DashboardConfig {
            source: self.source.device_source()?,
            bind_host: self.host,
            bind_port: self.port,
            static_dir: self.static_dir,
            log_level: self.log_level,
        })
    }
}

#[tokio::main]
async fn main() -> DashboardResult<()> {
    // Missing .env is fine
    let _ = dotenv::dotenv();

    let args = Args::parse();

    ProcessId::init_dashboard();
    let config = args.into_config()?;

    logging::init_tracing_with_level(Some(&config.log_level));
    logging::log_startup(ProcessId::current(), "smart water heater dashboard");

    let bind_address = config
        .bind_address()
        .map_err(|e| DashboardError::config(format!("Invalid bind address: {e}")))?;

    let store = ConfiguredStore::from_source(&config.source)?;
    let static_server = RealStaticFileServer::new(&config.static_dir);

    process_info!(ProcessId::current(), "📁 Serving static files from {}", config.static_dir);

    let server = DashboardServer::new(bind_address, store, static_server);
    server.run().await?;

    logging::log_success(ProcessId::current(), "Dashboard stopped gracefully");
    Ok(())
}
