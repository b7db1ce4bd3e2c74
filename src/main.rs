use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use wiki::{Dispatcher, Server, WikiConfig};

/// A small wiki: one text file per page, served over HTTP
#[derive(Parser, Debug)]
#[command(name = "wiki", version, about)]
struct Args {
    /// JSON configuration file
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Host address to bind to
    #[arg(short = 'H', long, env = "WIKI_HOST")]
    host: Option<String>,

    /// Port to listen on
    #[arg(short = 'p', long, env = "WIKI_PORT")]
    port: Option<u16>,

    /// Directory holding the pages
    #[arg(short = 'd', long, value_name = "DIR", env = "WIKI_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Directory holding view.html, edit.html and index.html
    #[arg(short = 't', long, value_name = "DIR", env = "WIKI_TEMPLATE_DIR")]
    template_dir: Option<PathBuf>,

    /// Largest accepted request body in bytes
    #[arg(long, env = "WIKI_MAX_BODY_BYTES")]
    max_body_bytes: Option<usize>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info", env = "WIKI_LOG_LEVEL")]
    log_level: String,

    /// Enable verbose logging
    #[arg(short = 'v', long)]
    verbose: bool,

    /// Print the effective configuration and exit
    #[arg(long)]
    print_config: bool,
}

fn init_logging(args: &Args) {
    let level = if args.verbose { "debug" } else { args.log_level.as_str() };
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(format!("wiki={level}")))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn load_config(args: &Args) -> Result<WikiConfig> {
    let mut config = match &args.config {
        Some(path) => WikiConfig::load(path)
            .with_context(|| format!("Failed to load config file {}", path.display()))?,
        None => WikiConfig::default(),
    };

    if let Some(host) = &args.host {
        config.host = host.clone();
    }
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(dir) = &args.data_dir {
        config.data_dir = dir.clone();
    }
    if let Some(dir) = &args.template_dir {
        config.template_dir = dir.clone();
    }
    if let Some(max) = args.max_body_bytes {
        config.max_body_bytes = max;
    }

    config.validate().context("Invalid configuration")?;
    Ok(config)
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "cannot listen for ctrl-c, running until killed");
        std::future::pending::<()>().await;
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args);

    let config = load_config(&args)?;
    if args.print_config {
        println!("{}", config.to_json()?);
        return Ok(());
    }

    let dispatcher = Dispatcher::from_config(&config).with_context(|| {
        format!("Failed to set up routes with templates from {}", config.template_dir.display())
    })?;
    dispatcher
        .handlers()
        .store()
        .ensure_dir()
        .with_context(|| format!("Failed to create {}", config.data_dir.display()))?;
    info!(data_dir = %config.data_dir.display(), "page store ready");

    let addr = config.listen_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    Server::new(dispatcher, config.limits())
        .serve(listener, shutdown_signal())
        .await;
    Ok(())
}
