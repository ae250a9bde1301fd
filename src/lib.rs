pub mod api;
pub mod bot;
pub mod cli;
pub mod config;
pub mod constants;
pub mod db;
pub mod entities;
pub mod models;
pub mod services;
pub mod state;

use std::sync::Arc;
use tokio::io::BufReader;
use tokio::signal;

use anyhow::Context;
use clap::{CommandFactory, Parser};
use cli::{Cli, Commands};
pub use config::Config;
use db::Store;
use metrics_exporter_prometheus::PrometheusHandle;
use state::SharedState;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Runs the CLI with an already loaded config.
pub async fn run(config: Config) -> anyhow::Result<()> {
    config.validate()?;

    let prometheus_handle = if config.observability.metrics_enabled {
        use metrics_exporter_prometheus::PrometheusBuilder;
        let handle = PrometheusBuilder::new()
            .install_recorder()
            .context("Failed to install Prometheus recorder")?;
        info!("Prometheus metrics recorder initialized");
        Some(handle)
    } else {
        None
    };

    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));

    // Logs go to stderr so `get` and `bot` output stays clean on stdout.
    let fmt_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        None => {
            Cli::command().print_help()?;
            Ok(())
        }

        Some(Commands::Serve) => run_server(config, prometheus_handle).await,

        Some(Commands::Bot { console }) => run_bot(config, console).await,

        Some(Commands::Get { identifier, fields }) => {
            cli::cmd_get_anime(&config, &identifier, fields).await
        }

        Some(Commands::Add(args)) => cli::cmd_add_anime(&config, args).await,

        Some(Commands::Fields) => {
            cli::cmd_list_fields();
            Ok(())
        }

        Some(Commands::Init) => {
            Config::create_default_if_missing()?;
            println!("✓ Config file created. Edit config.toml and run again.");
            Ok(())
        }
    }
}

async fn run_server(
    config: Config,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<()> {
    info!("Anidex v{} starting...", env!("CARGO_PKG_VERSION"));

    if !config.server.enabled {
        info!("Web API disabled in config, nothing to serve");
        return Ok(());
    }

    let port = config.server.port;

    let store = Store::with_pool_options(
        &config.general.database_path,
        config.general.max_db_connections,
        config.general.min_db_connections,
    )
    .await?;

    match store.count_anime().await {
        Ok(count) => info!("Catalogue holds {} anime", count),
        Err(e) => error!("Could not count anime: {}", e),
    }

    let shared = Arc::new(SharedState::with_store(config, Arc::new(store)));
    let app = api::router(api::create_app_state(shared, prometheus_handle));

    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!("🌐 Web Server running at http://0.0.0.0:{}", port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn run_bot(config: Config, console: bool) -> anyhow::Result<()> {
    let token = config.bot.token.clone();
    let state = SharedState::new(config).await?;

    if console {
        info!("Bot ready, reading commands from stdin");
        return bot::console::run(
            &state.bot,
            BufReader::new(tokio::io::stdin()),
            tokio::io::stdout(),
        )
        .await;
    }

    let token = token.context(
        "No Discord token configured: set ANIDEX_BOT_TOKEN (or bot.token) or pass --console",
    )?;

    bot::discord::run(state.bot.clone(), &token).await
}

async fn shutdown_signal() {
    match signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => error!("Error listening for shutdown: {}", e),
    }
}
