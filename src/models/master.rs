// src/models/master.rs
use serde::Deserialize;

// Game-traffic addresses in the directory look like "tw-0.6+udp://host:port".
const UDP_SCHEME_PREFIX: &str = "tw-";

#[derive(Debug, Default, Deserialize)]
pub struct MasterResponse {
    #[serde(default)]
    pub servers: Vec<MasterEntry>,
}

#[derive(Debug, Default, Deserialize)]
pub struct MasterEntry {
    #[serde(default)]
    pub addresses: Vec<String>,
    #[serde(default)]
    pub info: EntryInfo,
}

#[derive(Debug, Default, Deserialize)]
pub struct EntryInfo {
    #[serde(default)]
    pub name: String,
    pub game_type: Option<String>,
    #[serde(default)]
    pub clients: Vec<serde_json::Value>,
    pub max_players: Option<u32>,
    pub map: Option<MapInfo>,
}

#[derive(Debug, Default, Deserialize)]
pub struct MapInfo {
    pub name: Option<String>,
}

impl MasterEntry {
    /// First announced game address with the UDP scheme stripped.
    pub fn udp_address(&self) -> Option<&str> {
        self.addresses
            .iter()
            .filter(|addr| addr.starts_with(UDP_SCHEME_PREFIX))
            .find_map(|addr| addr.split_once("://").map(|(_, rest)| rest))
    }
}
