// src/content.rs
use std::fs;
use std::io;
use std::path::Path;

use log::info;
use serde_json::Value;

/// Static site content, read once at startup. The JSON documents are
/// passed through to the frontend untouched; the rules stay raw markdown
/// because rendering happens on the presentation side.
pub struct SiteContent {
    pub organizations: Value,
    pub philosophy: Value,
    pub goals: Value,
    pub rules: String,
}

impl SiteContent {
    pub fn load(data_dir: &Path) -> io::Result<Self> {
        let content = Self {
            organizations: load_json(&data_dir.join("organizations.json"))?,
            philosophy: load_json(&data_dir.join("philosophy.json"))?,
            goals: load_json(&data_dir.join("goals.json"))?,
            rules: fs::read_to_string(data_dir.join("rules.md"))?,
        };
        info!("Loaded site content from {}", data_dir.display());
        Ok(content)
    }
}

fn load_json(path: &Path) -> io::Result<Value> {
    let raw = fs::read_to_string(path)?;
    serde_json::from_str(&raw).map_err(|e| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("{}: {}", path.display(), e),
        )
    })
}
