//! snipbin API server entrypoint.

use snipbin_core::db::RedbSnippetStore;
use snipbin_core::DEFAULT_PORT;
use snipbin_server::{config::Config, db::Database, reaper, serve_router, AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct CliFlags {
    help: bool,
    purge: bool,
}

fn parse_cli_flags(args: &[String]) -> anyhow::Result<CliFlags> {
    let mut flags = CliFlags::default();
    for arg in args.iter().skip(1) {
        match arg.as_str() {
            "--help" | "-h" => flags.help = true,
            "--purge" => flags.purge = true,
            value if value.starts_with('-') => {
                anyhow::bail!(
                    "Unknown option: '{}'. Use --help to see supported options.",
                    value
                );
            }
            value => {
                anyhow::bail!(
                    "Unexpected positional argument: '{}'. Use --help to see supported options.",
                    value
                );
            }
        }
    }
    Ok(flags)
}

fn default_log_filter(verbose: bool) -> &'static str {
    if verbose {
        "snipbin_server=debug,snipbin_core=debug,tower_http=debug"
    } else {
        "snipbin_server=info,snipbin_core=info,tower_http=warn"
    }
}

fn init_tracing(verbose: bool) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_log_filter(verbose).into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stdout),
        )
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let cli_flags = parse_cli_flags(&args)?;

    if cli_flags.help {
        print_help();
        return Ok(());
    }

    let config = Config::from_env()?;
    init_tracing(config.verbose);

    let database = Database::open(&config.db_path)?;

    if cli_flags.purge {
        return run_purge(&config, database);
    }

    let db = database.clone();
    let state = AppState::new(config.clone(), database);
    let reaper = reaper::spawn_reaper(state.store.clone(), config.reap_interval);

    let listener = tokio::net::TcpListener::bind(config.listen_address()).await?;
    let actual_addr = listener.local_addr()?;
    tracing::info!(
        retention_secs = config.retention.as_secs(),
        "snipbin running at http://{}",
        actual_addr
    );

    let serve_result = serve_router(listener, state, shutdown_signal()).await;
    reaper.abort();

    if let Err(err) = db.flush() {
        tracing::error!("Failed to flush database: {}", err);
    } else {
        tracing::info!("Database flushed successfully");
    }

    serve_result?;
    Ok(())
}

fn run_purge(config: &Config, database: Database) -> anyhow::Result<()> {
    let store = RedbSnippetStore::new(database.clone(), config.retention);
    let removed = snipbin_core::SnippetStore::purge_expired(&store)?;
    let remaining = database.record_count()?;
    println!(
        "Removed {} expired snippet(s); {} remain in {}",
        removed, remaining, config.db_path
    );
    Ok(())
}

fn print_help() {
    println!("snipbin server\n");
    println!("Usage: snipbin [OPTIONS]\n");
    println!("Options:");
    println!("  --purge           Remove expired snippets from the database and exit");
    println!("  --help            Show this help message");
    println!("\nEnvironment variables:");
    println!("  HOST                    Listen host (default: 127.0.0.1)");
    println!(
        "  PORT                    Listen port (default: {})",
        DEFAULT_PORT
    );
    println!("  VERBOSE                 Enable debug logging");
    println!("  SNIPPET_RETENTION_TIME  Snippet lifetime, e.g. 90s, 15m, 72h, 7d (default: 24h)");
    println!("  DB_PATH                 Database directory (default: ~/.cache/snipbin/db)");
    println!("  MAX_SNIPPET_SIZE        Maximum request body in bytes (default: 10MB)");
    println!("  REAP_INTERVAL           Expired-snippet sweep interval (default: 60s)");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!("Failed to install SIGTERM handler: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("Shutdown signal received");
}
