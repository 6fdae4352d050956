#![allow(dead_code)]

use legalease_service::config::LegaleaseConfig;
use legalease_service::services::providers::mock::MockTextProvider;
use legalease_service::services::providers::TextProvider;
use legalease_service::startup::{AppState, Application};
use service_core::config::Config;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub client: reqwest::Client,
    pub state: AppState,
}

impl TestApp {
    /// Spawn the application backed by a fresh mock provider.
    pub async fn spawn() -> (Self, Arc<MockTextProvider>) {
        let provider = Arc::new(MockTextProvider::new());
        let app = Self::spawn_with(Some(provider.clone()), &[]).await;
        (app, provider)
    }

    /// Spawn with `provider` (or none) and extra environment-style settings.
    pub async fn spawn_with(
        provider: Option<Arc<dyn TextProvider>>,
        vars: &[(&str, &str)],
    ) -> Self {
        let mut env: HashMap<String, String> = HashMap::from([
            ("SECRET_KEY".to_string(), "integration-test-secret".to_string()),
            ("GENAI_MAX_RETRIES".to_string(), "1".to_string()),
        ]);
        for (key, value) in vars {
            env.insert(key.to_string(), value.to_string());
        }

        let config = LegaleaseConfig::from_lookup(
            Config {
                port: 0, // Random port
                log_level: "info".to_string(),
            },
            |key| env.get(key).cloned(),
        )
        .expect("Failed to build test config");

        let app = Application::build_with_provider(config, provider)
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);
        let state = app.state();

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        let client = reqwest::Client::builder()
            .cookie_store(true)
            .build()
            .expect("Failed to build HTTP client");

        // Wait for the server to be ready by polling the health endpoint
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }

        Self {
            address,
            port,
            client,
            state,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client
            .get(self.url(path))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_json(&self, path: &str, body: serde_json::Value) -> reqwest::Response {
        self.client
            .post(self.url(path))
            .json(&body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn chat(&self, message: &str) -> reqwest::Response {
        self.post_json(
            "/api/chat",
            serde_json::json!({ "message": message, "is_document": false }),
        )
        .await
    }
}
