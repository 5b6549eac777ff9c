#![allow(dead_code)]

use std::process::{Child, Command, Stdio};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::StatusCode;

pub const API_KEY: &str = "integration-secret";

/// A server process on its own port with a fresh in-memory store.
///
/// The process is killed when the handle is dropped.
pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    child: Child,
}

impl TestServer {
    pub async fn start() -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let child = server_command()
            .env("API_KEY", API_KEY)
            .env("TRAVEL_LOG_STORE", "memory")
            .env("TRAVEL_LOG_HOST", "127.0.0.1")
            .env("TRAVEL_LOG_PORT", port.to_string())
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()
            .context("failed to spawn server binary")?;

        let server = Self { port, base_url, child };
        server.wait_ready(Duration::from_secs(10)).await?;
        Ok(server)
    }

    pub fn logs_url(&self) -> String {
        format!("{}/api/logs", self.base_url)
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            let url = format!("{}/health", self.base_url);
            if let Ok(resp) = client.get(&url).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(150)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

/// The server binary, run outside any `.env` so only explicit variables apply
pub fn server_command() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_travel-log-api"));
    cmd.current_dir(std::env::temp_dir())
        .env_remove("API_KEY")
        .env_remove("DATABASE_URL")
        .env_remove("APP_ENV")
        .env_remove("PORT");
    cmd
}

pub fn kyoto(api_key: &str) -> serde_json::Value {
    serde_json::json!({
        "apiKey": api_key,
        "title": "Kyoto",
        "description": "Temples and tea",
        "image": "https://example.com/kyoto.jpg",
        "rating": 9,
        "latitude": 35.0116,
        "longitude": 135.7681,
        "visitDate": "2024-04-02"
    })
}
