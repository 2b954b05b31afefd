#![allow(dead_code)]

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde_json::{json, Value};

use tvtracker_api::config::AppConfig;

pub struct TestServer {
    pub base_url: String,
    pub client: Client,
}

impl TestServer {
    /// Serve the app on a free port against a fresh in-memory database.
    pub async fn start() -> Result<Self> {
        Self::start_with(AppConfig::development()).await
    }

    pub async fn start_with(mut config: AppConfig) -> Result<Self> {
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        config.server.host = "127.0.0.1".to_string();
        config.server.port = port;
        config.database.url = "sqlite::memory:".to_string();

        let state = tvtracker_api::bootstrap(&config).await?;
        let app = tvtracker_api::app(state, &config);
        let listener = tokio::net::TcpListener::bind(config.bind_addr())
            .await
            .context("failed to bind test listener")?;

        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        let server = Self {
            base_url: format!("http://127.0.0.1:{}", port),
            client: Client::new(),
        };
        server.wait_ready(Duration::from_secs(10)).await?;
        Ok(server)
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;
        while Instant::now() < deadline {
            if let Ok(resp) = self.client.get(self.url("/health")).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<String> {
        let res = self
            .client
            .post(self.url("/auth/login"))
            .json(&json!({ "username": username, "password": password }))
            .send()
            .await?;
        anyhow::ensure!(res.status() == StatusCode::OK, "login failed: {}", res.status());
        let body: Value = res.json().await?;
        body["access_token"]
            .as_str()
            .map(str::to_string)
            .context("login response missing access_token")
    }

    /// A client session logged in as `ray`.
    pub async fn session(&self) -> Result<Session<'_>> {
        let token = self.login("ray", "password123").await?;
        Ok(Session { server: self, token })
    }
}

pub struct Session<'a> {
    pub server: &'a TestServer,
    pub token: String,
}

impl Session<'_> {
    pub fn get(&self, path: &str) -> RequestBuilder {
        self.server.client.get(self.server.url(path)).bearer_auth(&self.token)
    }

    pub fn post(&self, path: &str) -> RequestBuilder {
        self.server.client.post(self.server.url(path)).bearer_auth(&self.token)
    }

    pub fn patch(&self, path: &str) -> RequestBuilder {
        self.server.client.patch(self.server.url(path)).bearer_auth(&self.token)
    }

    pub fn delete(&self, path: &str) -> RequestBuilder {
        self.server.client.delete(self.server.url(path)).bearer_auth(&self.token)
    }

    pub async fn create_show(&self, title: &str) -> Result<Value> {
        let res = self.post("/shows").json(&json!({ "title": title })).send().await?;
        anyhow::ensure!(res.status() == StatusCode::CREATED, "create failed: {}", res.status());
        Ok(res.json().await?)
    }

    pub async fn list_shows(&self, query: &str) -> Result<Vec<Value>> {
        let res = self.get(&format!("/shows{}", query)).send().await?;
        anyhow::ensure!(res.status() == StatusCode::OK, "list failed: {}", res.status());
        Ok(res.json().await?)
    }
}
