use std::env;
use std::time::Duration;
use std::num::NonZeroU32;
use governor::Quota;

#[derive(Clone)]
pub struct Config {
    // Upstream master directory
    pub master_url: String,
    pub server_name_tag: String,
    pub fetch_timeout_secs: u64,

    // Server list cache
    pub cache_ttl_secs: u64,
    pub default_max_players: u32,

    // Static site content
    pub data_dir: String,

    // Rate limiting
    pub server_list_period_secs: u64,
    pub server_list_burst_limit: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            master_url: "https://master2.ddnet.org/ddnet/15/servers.json".to_string(),
            server_name_tag: "Mid·Night".to_string(),
            fetch_timeout_secs: 8,
            cache_ttl_secs: 15,
            default_max_players: 16,
            data_dir: "data".to_string(),
            server_list_period_secs: 5,
            server_list_burst_limit: 120,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            master_url: env::var("MASTER_SERVER_URL")
                .unwrap_or_else(|_| "https://master2.ddnet.org/ddnet/15/servers.json".to_string()),

            server_name_tag: env::var("SERVER_NAME_TAG")
                .unwrap_or_else(|_| "Mid·Night".to_string()),

            fetch_timeout_secs: env::var("FETCH_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8),

            cache_ttl_secs: env::var("CACHE_TTL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(15),

            default_max_players: env::var("DEFAULT_MAX_PLAYERS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(16),

            data_dir: env::var("DATA_DIR")
                .unwrap_or_else(|_| "data".to_string()),

            server_list_period_secs: env::var("SERVER_LIST_PERIOD_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5),

            server_list_burst_limit: env::var("SERVER_LIST_BURST_LIMIT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(120),
        }
    }

    pub fn server_list_quota(&self) -> Quota {
        Quota::with_period(Duration::from_secs(self.server_list_period_secs))
            .unwrap()
            .allow_burst(NonZeroU32::new(self.server_list_burst_limit).unwrap())
    }
}
