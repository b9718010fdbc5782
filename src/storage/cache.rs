// src/storage/cache.rs
use std::cmp::Reverse;
use std::sync::Arc;
use std::time::Duration;

use log::{debug, info, warn};
use parking_lot::RwLock;
use tokio::sync::Mutex;
use tokio::time::Instant;

use crate::config::Config;
use crate::master::MasterDirectory;
use crate::models::master::MasterResponse;
use crate::models::server::ServerRecord;

struct Snapshot {
    records: Vec<ServerRecord>,
    // None until the first successful refresh.
    fetched_at: Option<Instant>,
}

/// TTL cache in front of the master directory. Serves the freshest
/// available list and never fails: a failed refresh degrades to the
/// previous snapshot (or an empty list before the first success).
pub struct ServerListCache {
    directory: Arc<dyn MasterDirectory>,
    snapshot: RwLock<Arc<Snapshot>>,
    refresh: Mutex<()>,
    ttl: Duration,
    name_tag: String,
    default_max_players: u32,
}

impl ServerListCache {
    pub fn new(directory: Arc<dyn MasterDirectory>, config: &Config) -> Self {
        Self {
            directory,
            snapshot: RwLock::new(Arc::new(Snapshot {
                records: Vec::new(),
                fetched_at: None,
            })),
            refresh: Mutex::new(()),
            ttl: Duration::from_secs(config.cache_ttl_secs),
            name_tag: config.server_name_tag.clone(),
            default_max_players: config.default_max_players,
        }
    }

    pub async fn get_servers(&self) -> Vec<ServerRecord> {
        if let Some(records) = self.fresh_records() {
            debug!("Serving cached server list");
            return records;
        }

        // One refresh in flight at a time. Callers that queued behind it
        // find a fresh snapshot on the re-check and return it; after a
        // failed refresh the snapshot is still stale, so they retry in
        // turn instead of caching the failure.
        let _guard = self.refresh.lock().await;
        if let Some(records) = self.fresh_records() {
            return records;
        }

        info!("Refreshing server list from master directory");
        match self.directory.fetch_servers().await {
            Ok(response) => {
                let records =
                    build_server_list(&response, &self.name_tag, self.default_max_players);
                info!("Server list refreshed, {} matching servers", records.len());
                *self.snapshot.write() = Arc::new(Snapshot {
                    records: records.clone(),
                    fetched_at: Some(Instant::now()),
                });
                records
            }
            Err(e) => {
                warn!("Server list refresh failed, serving stale data: {}", e);
                self.snapshot.read().records.clone()
            }
        }
    }

    fn fresh_records(&self) -> Option<Vec<ServerRecord>> {
        let snapshot = self.snapshot.read();
        match snapshot.fetched_at {
            Some(fetched_at) if fetched_at.elapsed() < self.ttl => {
                Some(snapshot.records.clone())
            }
            _ => None,
        }
    }
}

/// Filter, shape and sort one directory document. Pure so it is testable
/// without any network fake.
pub fn build_server_list(
    response: &MasterResponse,
    name_tag: &str,
    default_max_players: u32,
) -> Vec<ServerRecord> {
    let mut records: Vec<ServerRecord> = response
        .servers
        .iter()
        .filter(|entry| entry.info.name.contains(name_tag))
        .map(|entry| {
            let info = &entry.info;
            let game_type = info
                .game_type
                .clone()
                .unwrap_or_else(|| "unknown".to_string());

            ServerRecord {
                name: info.name.clone(),
                avatar_url: format!("/static/img/servers/{}.png", game_type.to_lowercase()),
                num_players: info.clients.len() as u32,
                max_players: info.max_players.unwrap_or(default_max_players),
                map_name: info
                    .map
                    .as_ref()
                    .and_then(|m| m.name.clone())
                    .unwrap_or_else(|| "unknown".to_string()),
                ip_port: entry.udp_address().unwrap_or("unknown").to_string(),
                game_type,
            }
        })
        .collect();

    // Stable, so servers with equal player counts keep the upstream order.
    records.sort_by_key(|record| Reverse(record.num_players));
    records
}
