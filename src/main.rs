// src/main.rs
mod config;
mod content;
mod handlers;
mod master;
mod models;
mod storage;
mod utils;

use std::net::IpAddr;
use std::path::Path;
use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use env_logger::Env;
use governor::state::keyed::DefaultKeyedStateStore;
use governor::{clock::DefaultClock, RateLimiter};
use log::info;

use crate::config::Config;
use crate::content::SiteContent;
use crate::master::MasterClient;
use crate::storage::cache::ServerListCache;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize logger only once at the start
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    dotenv::dotenv().ok();

    // Load configuration
    let config = Config::from_env();

    let content = SiteContent::load(Path::new(&config.data_dir)).map_err(|e| {
        std::io::Error::new(e.kind(), format!("Failed to load site content: {}", e))
    })?;
    let content = web::Data::new(content);

    // The master directory client is the one long-lived upstream resource;
    // it is built here and dropped when the server loop exits.
    let directory = MasterClient::new(&config).map_err(|e| {
        std::io::Error::new(
            std::io::ErrorKind::Other,
            format!("Failed to build master directory client: {}", e),
        )
    })?;
    let cache = web::Data::new(ServerListCache::new(Arc::new(directory), &config));

    let server_list_rate_limiter: web::Data<
        RateLimiter<IpAddr, DefaultKeyedStateStore<IpAddr>, DefaultClock>
    > = web::Data::new(RateLimiter::keyed(config.server_list_quota()));

    // Get bind address and port from environment or use defaults
    let bind_address = std::env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("PORT").unwrap_or_else(|_| "8000".to_string());
    let bind = format!("{}:{}", bind_address, port);

    info!("Starting server on {}", bind);
    HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin("http://localhost:3000")
            .allowed_origin("http://127.0.0.1:3000")
            .allowed_methods(vec!["GET"])
            .allow_any_header()
            .supports_credentials();

        App::new()
            .wrap(cors)
            .app_data(content.clone())
            .app_data(cache.clone())
            .app_data(server_list_rate_limiter.clone())
            .route("/", web::get().to(handlers::content::index))
            .route("/api/servers", web::get().to(handlers::servers::get_servers))
            .route("/api/organizations", web::get().to(handlers::content::get_organizations))
            .route("/api/philosophy", web::get().to(handlers::content::get_philosophy))
            .route("/api/goals", web::get().to(handlers::content::get_goals))
            .route("/api/rules", web::get().to(handlers::content::get_rules))
    })
        .bind(&bind)?
        .run().await
}
