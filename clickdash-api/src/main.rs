use actix_cors::Cors;
use actix_web::{get, web, App, HttpResponse, HttpServer, Responder};
use anyhow::Context;
use clap::Parser;
use std::sync::Arc;
use tracing_subscriber::prelude::*;

use clickdash_api::config::{self, CredentialsSource};
use clickdash_api::handlers::dashboard::{self, DashboardAppState};
use clickdash_api::integrations::clickup::ClickUpClient;

#[get("/health")]
async fn health() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy"
    }))
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(long)]
    log_file_path: Option<String>,
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    if let Some(log_path) = args.log_file_path {
        let log_path = std::path::Path::new(&log_path);
        let file_appender = tracing_appender::rolling::never(
            log_path.parent().unwrap_or(std::path::Path::new(".")),
            log_path
                .file_name()
                .unwrap_or(std::ffi::OsStr::new("clickdash-api.log")),
        );
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
        std::mem::forget(guard);

        tracing_subscriber::registry()
            .with(env_filter.clone())
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(true)
                    .with_writer(std::io::stdout),
            )
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(non_blocking),
            )
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    // Load config
    let (config, config_path) = config::ApiConfig::load().context("Failed to load config")?;
    tracing::info!("Loaded config from {:?}", config_path);

    // Get server config or use defaults
    let (host, port) = if let Some(server_config) = &config.server {
        (server_config.host.clone(), server_config.port)
    } else {
        ("127.0.0.1".to_string(), 8080)
    };

    let clickup_config = config.clickup();
    let client = Arc::new(
        ClickUpClient::from_config(&clickup_config).context("Failed to initialize ClickUp client")?,
    );
    tracing::info!("Using ClickUp API at {}", client.base_url());

    let dashboard_state = DashboardAppState {
        client,
        credentials: CredentialsSource::Environment,
    };

    // Surface a missing key at startup; requests still re-check it
    if let Err(e) = dashboard_state.credentials.load() {
        tracing::warn!("{}", e);
    }

    tracing::info!("Server will listen on {}:{}", host, port);

    let cors_config = config.cors.clone();
    let server = HttpServer::new(move || {
        // Configure CORS
        let cors = if let Some(cors_config) = &cors_config {
            let mut cors_builder = Cors::default();
            for origin in &cors_config.allowed_origins {
                cors_builder = cors_builder.allowed_origin(origin);
            }
            cors_builder
                .allowed_methods(vec!["GET", "OPTIONS"])
                .allowed_headers(vec!["Accept", "Content-Type"])
                .max_age(3600)
        } else {
            Cors::default()
                .allow_any_origin()
                .allowed_methods(vec!["GET", "OPTIONS"])
                .allowed_headers(vec!["Accept", "Content-Type"])
                .max_age(3600)
        };

        App::new()
            .wrap(cors)
            .app_data(web::Data::new(dashboard_state.clone()))
            .service(health)
            .route("/api/tasks", web::get().to(dashboard::get_dashboard))
    })
    .bind((host.as_str(), port))?
    .run();

    let handle = server.handle();

    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            return;
        }

        tracing::info!("Ctrl+C received, shutting down...");
        handle.stop(true).await;
    });

    server.await?;
    Ok(())
}
