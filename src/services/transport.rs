//! Outbound JSON transport.
//!
//! All third-party calls (scoring model, CRM providers, payment
//! processor) go through this port so tests can swap in fakes. The real
//! implementation drives the blocking `ureq` agent from a worker thread
//! and carries a bounded global timeout.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::warn;
use ureq::Agent;

use crate::errors::{LuxmeetError, Result};

#[async_trait]
pub trait JsonTransport: Send + Sync {
    /// POST a JSON body, optionally with a bearer token, and parse the
    /// JSON response.
    async fn post_json(&self, url: &str, bearer: Option<&str>, body: Value) -> Result<Value>;
}

pub struct HttpJsonTransport {
    agent: Agent,
}

impl HttpJsonTransport {
    pub fn new(timeout: Duration) -> Self {
        let agent: Agent = Agent::config_builder()
            .timeout_global(Some(timeout))
            .build()
            .into();
        Self { agent }
    }

    fn post_sync(agent: &Agent, url: &str, bearer: Option<&str>, body: Value) -> Result<Value> {
        let mut request = agent.post(url);
        if let Some(token) = bearer {
            request = request.header("Authorization", &format!("Bearer {}", token));
        }

        let response = request
            .send_json(&body)
            .map_err(|e| LuxmeetError::upstream(format!("POST {} failed: {}", url, e)))?;

        response
            .into_body()
            .read_json()
            .map_err(|e| LuxmeetError::upstream(format!("Response from {} parse failed: {}", url, e)))
    }
}

#[async_trait]
impl JsonTransport for HttpJsonTransport {
    async fn post_json(&self, url: &str, bearer: Option<&str>, body: Value) -> Result<Value> {
        let agent = self.agent.clone();
        let url = url.to_string();
        let bearer = bearer.map(String::from);

        tokio::task::spawn_blocking(move || {
            Self::post_sync(&agent, &url, bearer.as_deref(), body)
        })
        .await
        .unwrap_or_else(|e| {
            warn!("Outbound request worker failed: {}", e);
            Err(LuxmeetError::upstream(format!(
                "Outbound request worker failed: {}",
                e
            )))
        })
    }
}
