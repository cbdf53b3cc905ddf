//! # Web Test Infrastructure
//!
//! Starts the real axum application on an ephemeral port with its snapshot file in a
//! temporary directory, and drives it with `reqwest`.

use reqwest::{redirect::Policy, Client};
use serde_json::Value;
use std::path::PathBuf;
use std::time::Duration;
use tempfile::TempDir;

use robot_telemetry::bootstrap::{TelemetryServer, TelemetryServerHandle};
use robot_telemetry::config::{CorsConfig, TelemetryConfig};

/// Running server plus the snapshot file it reads
pub struct TestServer {
    pub handle: TelemetryServerHandle,
    pub data_file: PathBuf,
    client: Client,
    // Keeps the snapshot directory alive for the server's lifetime
    _data_dir: TempDir,
}

impl TestServer {
    /// Start a test server with no snapshot on disk
    pub async fn start() -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        Self::start_with_cors(CorsConfig::default()).await
    }

    /// Start a test server serving `record`
    pub async fn start_with_record(
        record: &Value,
    ) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let server = Self::start().await?;
        server.write_record(record)?;
        Ok(server)
    }

    /// Start a test server with a specific CORS policy
    pub async fn start_with_cors(
        cors: CorsConfig,
    ) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let data_dir = tempfile::tempdir()?;
        let data_file = data_dir.path().join("robot_status.json");

        let mut config = TelemetryConfig::default();
        config.web.bind_address = "127.0.0.1:0".to_string();
        config.web.cors = cors;
        config.store.data_file = data_file.clone();

        let handle = TelemetryServer::bind(&config).await?.spawn();

        // Redirects are asserted on, never followed
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .redirect(Policy::none())
            .build()?;

        Ok(Self {
            handle,
            data_file,
            client,
            _data_dir: data_dir,
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.handle.base_url(), path)
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub async fn get(&self, path: &str) -> Result<reqwest::Response, reqwest::Error> {
        self.client.get(self.url(path)).send().await
    }

    /// GET and decode the JSON body alongside the status code
    pub async fn get_json(
        &self,
        path: &str,
    ) -> Result<(reqwest::StatusCode, Value), reqwest::Error> {
        let response = self.get(path).await?;
        let status = response.status();
        let body = response.json::<Value>().await?;
        Ok((status, body))
    }

    pub fn write_record(&self, record: &Value) -> std::io::Result<()> {
        std::fs::write(&self.data_file, serde_json::to_vec(record)?)
    }

    pub fn write_raw(&self, contents: &str) -> std::io::Result<()> {
        std::fs::write(&self.data_file, contents)
    }

    pub fn remove_record(&self) -> std::io::Result<()> {
        std::fs::remove_file(&self.data_file)
    }

    /// Shutdown the test server
    pub async fn shutdown(self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        tokio::time::timeout(Duration::from_secs(5), self.handle.stop()).await??;
        Ok(())
    }
}
