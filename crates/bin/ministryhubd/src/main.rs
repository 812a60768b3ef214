//! # ministryhubd: ministryhub automation daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Load configuration (`ministryhub.toml` plus env overrides)
//! - Initialize `tracing` with the configured filter
//! - Initialize the `SQLite` connection pool and run migrations
//! - Load the built-in automation template catalog
//! - Construct repositories, services and the HTTP router
//! - Bind to a TCP port and serve until SIGINT/SIGTERM
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer; no domain logic belongs here.

mod config;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use ministryhub_adapter_http_axum::state::AppState;
use ministryhub_adapter_storage_sqlite_sqlx::{
    Config as StorageConfig, SqliteAutomationRepository, SqliteRunRepository,
};
use ministryhub_app::catalog::StaticTemplates;
use ministryhub_app::dispatcher::LoggingDispatcher;
use ministryhub_app::event_bus::InProcessEventBus;
use ministryhub_app::services::automation_service::AutomationService;
use ministryhub_app::services::run_service::RunService;
use ministryhub_app::services::template_service::TemplateService;

use crate::config::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&config.logging.filter)?)
        .init();

    // Database
    let db = StorageConfig {
        database_url: config.database_url().to_string(),
    }
    .build()
    .await?;
    let pool = db.pool().clone();

    // Repositories
    let automation_repo = SqliteAutomationRepository::new(pool.clone());
    let run_repo = SqliteRunRepository::new(pool);

    // Template catalog
    let templates = StaticTemplates::builtin()?;
    tracing::info!(templates = templates.len(), "template catalog loaded");

    // Event bus
    let event_bus = Arc::new(InProcessEventBus::new(256));

    // Services
    let template_service = TemplateService::new(templates);
    let automation_service =
        AutomationService::new(automation_repo.clone(), Arc::clone(&event_bus));
    let run_service = RunService::new(
        automation_repo,
        run_repo,
        LoggingDispatcher,
        Arc::clone(&event_bus),
    )
    .with_default_limit(config.runs.default_limit);

    // HTTP
    let state = AppState::new(
        template_service,
        automation_service,
        run_service,
        event_bus,
    );
    let app = ministryhub_adapter_http_axum::router::build(state);

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "ministryhubd listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("ministryhubd stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for ctrl-c");
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
                tracing::error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    tracing::info!("shutdown signal received");
}
