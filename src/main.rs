mod config;
mod db;
mod error;
mod models;
mod routes;
mod schema;
mod services;
mod state;
mod store;

use actix_cors::Cors;
use actix_web::{
    http::header,
    middleware::{Logger, NormalizePath},
    web, App, HttpServer,
};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::state::AppState;
use crate::store::NoteStoreFactory;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    info!("Starting mail notes backend");

    let config = Config::from_env().map_err(|e| {
        error!("Invalid configuration: {}", e);
        anyhow::anyhow!(e)
    })?;
    info!("Configuration loaded from environment");

    if config.enable_bulk_delete {
        warn!("Unscoped DELETE /notes is enabled");
    }

    // Schema must be verified before the port is bound
    let store = match NoteStoreFactory::from_config(&config).await {
        Ok(store) => store,
        Err(e) => {
            error!("Store initialization failed: {:#}", e);
            return Err(e);
        }
    };

    let state = web::Data::new(AppState::new(config.clone(), store));

    let bind_addr = config.bind_addr();
    info!("Server running at http://{}", bind_addr);

    HttpServer::new(move || {
        let cors = build_cors(&config.cors_allow_origin);
        let config = config.clone();

        App::new()
            .app_data(state.clone())
            .wrap(cors)
            .wrap(Logger::default())
            .wrap(NormalizePath::trim())
            .configure(move |cfg| routes::create_routes(cfg, &config))
    })
    .bind(&bind_addr)?
    .run()
    .await?;

    Ok(())
}

fn build_cors(allow_origin: &str) -> Cors {
    if allow_origin == "*" {
        // Browser extension origins included
        Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .max_age(3600)
    } else {
        let mut cors = Cors::default();
        for origin in allow_origin.split(',').map(|s| s.trim()).filter(|s| !s.is_empty()) {
            cors = cors.allowed_origin(origin);
        }
        cors.allowed_methods(vec!["GET", "POST", "DELETE", "OPTIONS"])
            .allowed_headers(vec![header::CONTENT_TYPE, header::ACCEPT])
            .max_age(3600)
    }
}
