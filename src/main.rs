mod core;
mod features;
mod shared;

use std::sync::Arc;

use clap::{Parser, Subcommand};

use crate::core::config::Config;
use crate::core::database::{self, LivenessProbe};
use crate::core::{logging, router};
use crate::features::categories::{CategoryService, PgCategoryRepository};
use crate::features::status::StatusService;

#[derive(Parser)]
#[command(name = "category-api", version, about = "REST API for categories")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Clone, Copy)]
enum Command {
    /// Start the HTTP server (default)
    Serve,
    /// Apply pending database migrations and exit
    Migrate,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Build Tokio runtime with configurable worker threads
    let worker_threads = std::env::var("TOKIO_WORKER_THREADS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|p| p.get())
                .unwrap_or(4)
        });

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(worker_threads)
        .max_blocking_threads(worker_threads * 4)
        .enable_all()
        .build()?;

    runtime.block_on(async_main(
        cli.command.unwrap_or(Command::Serve),
        worker_threads,
    ))
}

async fn async_main(command: Command, worker_threads: usize) -> anyhow::Result<()> {
    // Load .env file BEFORE reading configuration so every variable is available
    if dotenvy::dotenv().is_err() {
        eprintln!("No .env file found, using system environment variables");
    }

    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;
    logging::init(config.app.mode);

    if config.app.mode.is_release() {
        tracing::info!("PRODUCTION mode activated");
    } else {
        tracing::info!("DEBUG mode activated");
    }
    tracing::info!(
        "System info: tokio_worker_threads={}, pid={}",
        worker_threads,
        std::process::id()
    );
    tracing::debug!("Database configuration: {:?}", config.database);

    // A failed connection is fatal; there is no retry
    tracing::info!("Connecting to database...");
    let pool = database::create_pool(&config.database)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to connect to database: {}", e))?;
    tracing::info!("Database connected successfully");

    match command {
        Command::Migrate => {
            tracing::info!("Running database migrations...");
            database::run_migrations(&pool)
                .await
                .map_err(|e| anyhow::anyhow!("Migration failed: {}", e))?;
            tracing::info!("Database migrations completed successfully");
            Ok(())
        }
        Command::Serve => serve(config, pool).await,
    }
}

async fn serve(config: Config, pool: sqlx::PgPool) -> anyhow::Result<()> {
    if config.database.auto_migrate {
        match database::run_migrations(&pool).await {
            Ok(()) => tracing::info!("Database migration completed"),
            Err(e) => tracing::warn!("Warning: migration failed: {}", e),
        }
    } else {
        tracing::info!("Automatic migration disabled (DB_AUTO_MIGRATE=false)");
    }

    match pool.ping().await {
        Ok(result) => tracing::info!("Database test query successful: {}", result),
        Err(e) => tracing::warn!("Database test query failed: {}", e),
    }

    let category_repository = Arc::new(PgCategoryRepository::new(pool.clone()));
    let category_service = Arc::new(CategoryService::new(category_repository));
    tracing::info!("Category service initialized");

    let status_service = Arc::new(StatusService::new(Arc::new(pool), config.app.mode));

    let app = router::build_router(&config, category_service, status_service);

    // Start server
    let addr = config.app.server_address();
    let socket_addr: std::net::SocketAddr = addr
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid address: {}", e))?;

    // Use socket2 for TCP listener configuration
    let socket = socket2::Socket::new(
        socket2::Domain::for_address(socket_addr),
        socket2::Type::STREAM,
        Some(socket2::Protocol::TCP),
    )?;

    socket.set_reuse_address(true)?;
    socket.set_nodelay(true)?;

    let keepalive = socket2::TcpKeepalive::new().with_time(std::time::Duration::from_secs(60));
    socket.set_tcp_keepalive(&keepalive)?;

    socket.set_nonblocking(true)?;
    socket.bind(&socket_addr.into())?;
    socket.listen(1024)?;

    let listener = tokio::net::TcpListener::from_std(socket.into())?;
    tracing::info!("Server running on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
