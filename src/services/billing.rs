//! Subscription/billing facade.
//!
//! Thin wrapper around the payment processor's session endpoints. Both
//! calls are fire-and-forget redirects: the caller sends the user to
//! the returned URL and the processor drives everything from there.
//! Failures surface as a single upstream error, no retry.

use std::sync::Arc;

use serde::Serialize;
use serde_json::json;
use tracing::info;

use crate::config::BillingConfig;
use crate::errors::{LuxmeetError, Result};

use super::transport::JsonTransport;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSession {
    pub session_id: String,
    pub url: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortalSession {
    pub url: String,
}

pub struct BillingService {
    transport: Arc<dyn JsonTransport>,
    base_url: String,
    api_key: String,
}

impl BillingService {
    pub fn new(config: &BillingConfig, transport: Arc<dyn JsonTransport>) -> Self {
        Self {
            transport,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        }
    }

    fn bearer(&self) -> Option<&str> {
        if self.api_key.is_empty() {
            None
        } else {
            Some(&self.api_key)
        }
    }

    /// Open a processor-hosted checkout for a price/team pair.
    pub async fn create_checkout_session(
        &self,
        price_id: &str,
        team_id: &str,
    ) -> Result<CheckoutSession> {
        if price_id.trim().is_empty() {
            return Err(LuxmeetError::validation("priceId is required"));
        }

        let url = format!("{}/checkout/session", self.base_url);
        let reply = self
            .transport
            .post_json(
                &url,
                self.bearer(),
                json!({ "priceId": price_id, "teamId": team_id }),
            )
            .await?;

        let session_id = reply["sessionId"]
            .as_str()
            .ok_or_else(|| LuxmeetError::upstream("Checkout reply carried no sessionId"))?
            .to_string();
        let redirect = reply["url"]
            .as_str()
            .ok_or_else(|| LuxmeetError::upstream("Checkout reply carried no url"))?
            .to_string();

        info!(
            "BillingService: checkout session '{}' created for team '{}'",
            session_id, team_id
        );
        Ok(CheckoutSession {
            session_id,
            url: redirect,
        })
    }

    /// Open the processor-hosted management portal for a team.
    pub async fn create_portal_session(&self, team_id: &str) -> Result<PortalSession> {
        let url = format!("{}/portal/session", self.base_url);
        let reply = self
            .transport
            .post_json(&url, self.bearer(), json!({ "teamId": team_id }))
            .await?;

        let redirect = reply["url"]
            .as_str()
            .ok_or_else(|| LuxmeetError::upstream("Portal reply carried no url"))?
            .to_string();

        info!("BillingService: portal session created for team '{}'", team_id);
        Ok(PortalSession { url: redirect })
    }
}
