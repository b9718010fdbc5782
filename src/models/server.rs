// src/models/server.rs
use serde::{Deserialize, Serialize};

/// One community server as shown on the status page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerRecord {
    pub name: String,
    pub game_type: String,
    pub num_players: u32,
    pub max_players: u32,
    pub map_name: String,
    pub ip_port: String,
    pub avatar_url: String,
}
