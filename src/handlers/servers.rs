// src/handlers/servers.rs
use actix_web::{web, HttpRequest, HttpResponse};
use governor::state::keyed::DefaultKeyedStateStore;
use governor::{clock::DefaultClock, RateLimiter};
use log::{debug, error};
use std::net::IpAddr;

use crate::storage::cache::ServerListCache;
use crate::utils::{extract_peer_ip, RequestError};

pub async fn get_servers(
    cache: web::Data<ServerListCache>,
    rate_limiter: web::Data<RateLimiter<IpAddr, DefaultKeyedStateStore<IpAddr>, DefaultClock>>,
    req: HttpRequest,
) -> Result<HttpResponse, RequestError> {
    let peer_ip = extract_peer_ip(&req)?;

    if rate_limiter.check_key(&peer_ip).is_err() {
        error!("Rate limit exceeded for server list for ip: {}", peer_ip);
        return Err(RequestError::RateLimitExceeded);
    }

    let servers = cache.get_servers().await;
    debug!("Returning server list with {} servers", servers.len());

    Ok(HttpResponse::Ok().json(servers))
}
