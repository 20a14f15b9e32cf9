use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use jobly_api::config::config;
use jobly_api::database::DatabaseManager;
use jobly_api::is_production;
use jobly_api::types::AppState;

#[derive(Parser, Debug)]
#[command(name = "jobly-api", version, about = "Jobly job board API server")]
struct Cli {
    /// Port to listen on (overrides PORT)
    #[arg(short, long)]
    port: Option<u16>,

    /// Apply pending migrations before serving
    #[arg(long)]
    migrate: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, SECRET_KEY, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("jobly_api=debug,tower_http=info")),
        )
        .init();

    let cli = Cli::parse();

    // Initialize configuration (this loads the config singleton)
    let config = config();
    tracing::info!("Starting Jobly API in {:?} mode", config.environment);

    if is_production!() && config.security.secret_key == "secret-dev" {
        tracing::warn!("SECRET_KEY is unset; tokens are signed with the development key");
    }

    let pool = DatabaseManager::connect(&config.database)
        .await
        .context("failed to connect to database")?;

    if cli.migrate || config.database.run_migrations {
        DatabaseManager::run_migrations(&pool)
            .await
            .context("failed to run migrations")?;
    }

    let app = jobly_api::app(AppState::new(pool.clone()));

    let port = cli.port.unwrap_or(config.server.port);
    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Jobly API listening on http://{}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    DatabaseManager::close(pool).await;
    tracing::info!("Shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
