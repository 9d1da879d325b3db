//! Render deploy status relay entry point.

use std::net::SocketAddr;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use render_status::api::{create_router, resolve_badge, resolve_status, AppState};
use render_status::config::Config;
use render_status::metrics;
use render_status::render::RenderClient;
use render_status::utils::shutdown_signal;
use render_status::RelayError;

/// Render deploy status relay.
#[derive(Parser, Debug)]
#[command(name = "render-status")]
#[command(about = "Serve Render deploy status as JSON and shields.io badges")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON.
    #[arg(long, global = true)]
    json: bool,

    /// HTTP listen port (overrides PORT).
    #[arg(short, long)]
    port: Option<u16>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server (default).
    Serve {
        /// HTTP listen port (overrides PORT).
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Check configuration validity.
    CheckConfig,

    /// Look up one service and print both responses.
    Lookup {
        /// Render service id, e.g. srv-abc123.
        service_id: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Load configuration before logging so RUST_LOG from .env applies
    let config = Config::load();
    let level = config
        .as_ref()
        .map(|c| c.rust_log.clone())
        .unwrap_or_else(|_| "info".to_string());

    // Initialize logging
    let filter = if args.verbose {
        EnvFilter::new("render_status=debug,info")
    } else {
        EnvFilter::try_new(&level).unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(args.json.then(|| fmt::layer().json()))
        .with((!args.json).then(|| fmt::layer()))
        .with(filter)
        .init();

    // Handle subcommands
    match args.command {
        Some(Command::CheckConfig) => cmd_check_config(config),
        Some(Command::Lookup { service_id }) => cmd_lookup(config, &service_id).await,
        Some(Command::Serve { port }) => cmd_serve(config, port.or(args.port)).await,
        None => cmd_serve(config, args.port).await,
    }
}

/// Load and validate configuration, logging failures.
fn validated(config: Result<Config, RelayError>) -> anyhow::Result<Config> {
    let config = config.map_err(|e| {
        error!("Failed to load configuration: {}", e);
        e
    })?;

    if let Err(e) = config.validate() {
        error!("Invalid configuration: {}", e);
        return Err(e.into());
    }

    Ok(config)
}

/// Check configuration validity.
fn cmd_check_config(config: Result<Config, RelayError>) -> anyhow::Result<()> {
    println!("======================================================================");
    println!("RENDER STATUS RELAY - CONFIGURATION CHECK");
    println!("======================================================================");

    print!("Loading configuration... ");
    let config = match config {
        Ok(c) => {
            println!("OK");
            c
        }
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration load failed"));
        }
    };

    print!("Validating configuration... ");
    match config.validate() {
        Ok(()) => println!("OK"),
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration validation failed"));
        }
    }

    println!("----------------------------------------------------------------------");
    println!("Configuration Summary:");
    println!("  Environment: {}", config.app_env);
    println!("  Port: {}", config.port);
    println!("  Render API: {}", config.render_api_url);
    println!("  API Key: present");
    match config.http_timeout() {
        Some(timeout) => println!("  HTTP Timeout: {}ms", timeout.as_millis()),
        None => println!("  HTTP Timeout: client default"),
    }
    println!("  Metrics: {}", if config.metrics_enabled { "Enabled" } else { "Disabled" });
    println!("======================================================================");
    println!("CONFIGURATION CHECK PASSED");
    println!("======================================================================");

    Ok(())
}

/// Look up a single service and print the status and badge payloads.
async fn cmd_lookup(config: Result<Config, RelayError>, service_id: &str) -> anyhow::Result<()> {
    let config = validated(config)?;
    let client = RenderClient::new(&config)?;

    let status = resolve_status(&client, Some(service_id)).await;
    let badge = resolve_badge(&client, Some(service_id)).await;

    println!("GET /{}", service_id);
    println!("{}", serde_json::to_string_pretty(&status)?);
    println!("GET /endpoint/{}", service_id);
    println!("{}", serde_json::to_string_pretty(&badge)?);

    Ok(())
}

/// Run the HTTP server until SIGINT or SIGTERM.
async fn cmd_serve(config: Result<Config, RelayError>, port: Option<u16>) -> anyhow::Result<()> {
    info!("Loading configuration...");
    let mut config = validated(config)?;

    // Override with CLI args if provided
    if let Some(port) = port {
        config.port = port;
    }

    info!("Configuration loaded successfully");
    info!("Environment: {}", config.app_env);
    info!("Render API: {}", config.render_api_url);

    let client = RenderClient::new(&config)?;
    let mut state = AppState::new(Arc::new(client));

    if config.metrics_enabled {
        match metrics::install_recorder() {
            Ok(handle) => state = state.with_metrics(handle),
            Err(e) => warn!("Metrics disabled, failed to install recorder: {}", e),
        }
    }

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr).await?;
    info!("App listening on {}", addr);

    let (signal_tx, signal_rx) = oneshot::channel();
    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(async move {
            let signal = shutdown_signal().await;
            let _ = signal_tx.send(signal);
        })
        .await?;

    // Terminate the way the signal would have, now that connections are drained
    if let Ok(signal) = signal_rx.await {
        info!("Server closed after {}", signal.name());
        std::process::exit(signal.exit_code());
    }

    Ok(())
}
