// src/main.rs
//! Server entry point
use anyhow::Result;
use clap::{Parser, Subcommand};
use goalsetter::{ApiServer, AppConfig};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(name = "goalsetter")]
#[command(about = "Goal tracking REST backend")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Args {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the API server
    Serve {
        /// Host to bind (overrides HOST)
        #[arg(long)]
        host: Option<String>,
        /// Port to bind (overrides PORT)
        #[arg(long)]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Before logging, so a .env file can set RUST_LOG. Its absence is normal.
    let env_file = dotenvy::dotenv().ok();

    init_logging()?;

    if let Some(path) = env_file {
        info!("Loaded environment from {}", path.display());
    }

    info!("Starting goalsetter v{}", env!("CARGO_PKG_VERSION"));

    // A missing signing secret must stop us before anything binds.
    let mut config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Refusing to start: {}", e);
            std::process::exit(1);
        }
    };

    if let Some(Commands::Serve { host, port }) = args.command {
        if let Some(host) = host {
            config.host = host;
        }
        if let Some(port) = port {
            config.port = port;
        }
    }

    let server = ApiServer::new(&config).await?;
    server.start().await
}

fn init_logging() -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,hyper=info,h2=info"));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
