//! Portfolio backend server binary.
//!
//! Startup order: parse flags, load env config, initialize logging,
//! connect to the document store, declare indexes, seed fixtures if the
//! store is empty, then serve until a shutdown signal arrives and close
//! the store connection last.

use clap::Parser;
use tracing::{error, info};

use folio_core::config::AppConfig;
use folio_core::error::FolioResult;
use folio_core::{constants, logging};
use folio_server::{build_router, AppState};
use folio_store::{seed, Database};

/// Portfolio backend - contact form, blog, and project API.
#[derive(Parser)]
#[command(
    name = "folio-server",
    version,
    about = "Portfolio backend API server"
)]
struct Args {
    /// Interface to bind (overrides FOLIO_HOST).
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on (overrides FOLIO_PORT).
    #[arg(long)]
    port: Option<u16>,

    /// Enable verbose logging (debug level).
    #[arg(short, long)]
    verbose: bool,

    /// Skip fixture seeding even when collections are empty.
    #[arg(long)]
    no_seed: bool,
}

#[tokio::main]
async fn main() -> FolioResult<()> {
    let args = Args::parse();

    let mut config = AppConfig::from_env()?;
    if let Some(host) = args.host {
        config.http.host = host;
    }
    if let Some(port) = args.port {
        config.http.port = port;
    }
    if args.verbose {
        config.logging.level = "debug".to_string();
    }
    if args.no_seed {
        config.seed_on_startup = false;
    }

    let _log_guard = logging::init_logging(&config.logging, &config.effective_log_dir())?;
    info!("{} v{} starting", constants::APP_NAME, constants::APP_VERSION);

    let db = Database::connect(&config.store).await?;
    if let Err(e) = db.ensure_indexes().await {
        error!("failed to create indexes: {e}");
    }
    if config.seed_on_startup {
        if let Err(e) = seed::seed_if_empty(&db).await {
            error!("failed to seed fixture data: {e}");
        }
    }

    let state = AppState::new(&db);
    let router = build_router(state, &config.http.cors_origins);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("listening on http://{addr}{}", constants::API_PREFIX);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.shutdown().await;
    info!("application shutdown completed");
    Ok(())
}

/// Resolve when the process receives ctrl-c or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("failed to listen for ctrl-c: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("failed to install SIGTERM handler: {e}");
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
    info!("shutdown signal received");
}
