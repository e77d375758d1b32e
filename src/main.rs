use actix_web::{App, HttpServer, middleware::Logger, web};
use clap::Parser;
use tracing::{error, info};

use job_tracker::api::{self, job::JobService, validation};
use job_tracker::cli::{Cli, Command};
use job_tracker::config::Config;
use job_tracker::db;
use job_tracker::shutdown::ShutdownCoordinator;
use job_tracker::telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let cli = Cli::parse();

    let config = Config::from_env()
        .and_then(|config| cli.apply(config))
        .map_err(std::io::Error::other)?;

    telemetry::init(&config.log_dir)?;

    match cli.command() {
        Command::Migrate => migrate(&config).await,
        Command::Serve => serve(config).await,
    }
}

async fn migrate(config: &Config) -> std::io::Result<()> {
    let pool = db::connect_and_migrate(config).await.map_err(|e| {
        error!("Migration failed: {}", e);
        std::io::Error::other(e)
    })?;
    pool.close().await;
    Ok(())
}

async fn serve(config: Config) -> std::io::Result<()> {
    info!("Starting job-tracker application");
    info!("Configuration loaded successfully:");
    info!("  - Storage backend: {}", config.storage);
    info!("  - Max payload size: {} bytes", config.max_payload_size);
    info!("  - Max database connections: {}", config.max_db_connections);

    let store = db::open_store(&config).await.map_err(|e| {
        error!("Failed to open job store: {}", e);
        std::io::Error::other(e)
    })?;

    let job_service = web::Data::new(JobService::new(store.clone()));
    let max_payload_size = config.max_payload_size;

    let server = HttpServer::new(move || {
        // Configure payload size limits globally
        let payload_config = web::PayloadConfig::default().limit(max_payload_size);

        App::new()
            .wrap(Logger::default())
            .app_data(job_service.clone())
            .app_data(payload_config)
            .app_data(validation::json_config())
            .configure(api::routes)
    });

    info!("Server starting on http://{}:{}", config.host, config.port);

    let server = server.bind((config.host.as_str(), config.port))?.run();
    let server_handle = server.handle();
    let server_task = tokio::spawn(server);

    ShutdownCoordinator::new(server_handle, server_task, store)
        .wait_for_shutdown()
        .await
}
