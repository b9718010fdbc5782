// src/master.rs
use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use log::debug;

use crate::config::Config;
use crate::models::master::MasterResponse;

#[derive(Debug)]
pub enum FetchError {
    Unavailable(String),
    Timeout,
    Malformed(String),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable(reason) => write!(f, "Master directory unavailable: {}", reason),
            Self::Timeout => write!(f, "Master directory request timed out"),
            Self::Malformed(reason) => write!(f, "Malformed master directory response: {}", reason),
        }
    }
}

/// The upstream server directory, behind a trait so the cache can be
/// exercised against an instrumented fake.
#[async_trait]
pub trait MasterDirectory: Send + Sync {
    async fn fetch_servers(&self) -> Result<MasterResponse, FetchError>;
}

pub struct MasterClient {
    http: reqwest::Client,
    url: String,
}

impl MasterClient {
    /// Builds the shared HTTP client once; it lives for the whole process
    /// and is released on drop at shutdown.
    pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.fetch_timeout_secs))
            .build()?;

        Ok(Self {
            http,
            url: config.master_url.clone(),
        })
    }
}

#[async_trait]
impl MasterDirectory for MasterClient {
    async fn fetch_servers(&self) -> Result<MasterResponse, FetchError> {
        debug!("Fetching server list from {}", self.url);

        let response = self
            .http
            .get(&self.url)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    FetchError::Timeout
                } else {
                    FetchError::Unavailable(e.to_string())
                }
            })?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(FetchError::Unavailable(format!("HTTP {}", status)));
        }

        response.json::<MasterResponse>().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout
            } else if e.is_decode() {
                FetchError::Malformed(e.to_string())
            } else {
                FetchError::Unavailable(e.to_string())
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config(mock: &MockServer) -> Config {
        Config {
            master_url: format!("{}/servers.json", mock.uri()),
            fetch_timeout_secs: 1,
            ..Config::default()
        }
    }

    #[tokio::test]
    async fn parses_a_directory_document() {
        let mock = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/servers.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "servers": [{
                    "addresses": ["tw-0.6+udp://192.0.2.1:8303"],
                    "info": {"name": "some server", "clients": [{}, {}]}
                }]
            })))
            .mount(&mock)
            .await;

        let client = MasterClient::new(&test_config(&mock)).unwrap();
        let response = client.fetch_servers().await.unwrap();

        assert_eq!(response.servers.len(), 1);
        assert_eq!(response.servers[0].info.clients.len(), 2);
    }

    #[tokio::test]
    async fn non_200_status_is_unavailable() {
        let mock = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/servers.json"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&mock)
            .await;

        let client = MasterClient::new(&test_config(&mock)).unwrap();
        match client.fetch_servers().await {
            Err(FetchError::Unavailable(reason)) => assert!(reason.contains("503")),
            other => panic!("expected Unavailable, got {:?}", other.map(|r| r.servers.len())),
        }
    }

    #[tokio::test]
    async fn invalid_json_is_malformed() {
        let mock = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/servers.json"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&mock)
            .await;

        let client = MasterClient::new(&test_config(&mock)).unwrap();
        assert!(matches!(
            client.fetch_servers().await,
            Err(FetchError::Malformed(_))
        ));
    }

    #[tokio::test]
    async fn slow_upstream_is_a_timeout() {
        let mock = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/servers.json"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"servers": []}))
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&mock)
            .await;

        let client = MasterClient::new(&test_config(&mock)).unwrap();
        assert!(matches!(client.fetch_servers().await, Err(FetchError::Timeout)));
    }
}
