//! CRM contact sync.
//!
//! Fans one contact out to every configured provider. Attempts run
//! concurrently and settle independently: a provider that is
//! misconfigured or unreachable reports its own failure without
//! touching the others. No retries, no ordering guarantee.

use std::sync::Arc;

use futures_util::future::join_all;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use strum::AsRefStr;
use tracing::{info, warn};

use crate::config::CrmConfig;
use crate::errors::Result;

use super::transport::JsonTransport;

pub mod hubspot;
pub mod salesforce;
pub mod zapier;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum CrmProvider {
    Hubspot,
    Salesforce,
    Zapier,
}

impl std::fmt::Display for CrmProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}

/// The provider-independent contact shape built from a lead/card pair.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrmContact {
    pub id: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub company: Option<String>,
    pub phone: Option<String>,
    pub title: Option<String>,
    pub source: Option<String>,
    pub lead_score: Option<u8>,
    #[serde(default)]
    pub custom_fields: Map<String, Value>,
}

/// Per-provider connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrmIntegrationConfig {
    pub provider: CrmProvider,
    pub api_key: Option<String>,
    /// Zapier only.
    pub webhook_url: Option<String>,
    /// Overrides the service-wide endpoint when set.
    pub endpoint: Option<String>,
}

/// What happened for one provider during a sync.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CrmSyncOutcome {
    pub provider: CrmProvider,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub struct CrmClient {
    transport: Arc<dyn JsonTransport>,
    hubspot_url: String,
    salesforce_url: String,
}

impl CrmClient {
    pub fn new(config: &CrmConfig, transport: Arc<dyn JsonTransport>) -> Self {
        Self {
            transport,
            hubspot_url: config.hubspot_url.clone(),
            salesforce_url: config.salesforce_url.clone(),
        }
    }

    /// Sync one contact to every configured provider, settle-all.
    ///
    /// Always returns exactly one outcome per config entry.
    pub async fn sync_contact(
        &self,
        contact: &CrmContact,
        configs: &[CrmIntegrationConfig],
    ) -> Vec<CrmSyncOutcome> {
        let attempts = configs.iter().map(|config| async move {
            let result = self.dispatch(contact, config).await;
            match &result {
                Ok(_) => info!("CrmClient: synced '{}' to {}", contact.email, config.provider),
                Err(e) => warn!(
                    "CrmClient: sync of '{}' to {} failed: {}",
                    contact.email, config.provider, e
                ),
            }
            CrmSyncOutcome {
                provider: config.provider,
                success: result.is_ok(),
                error: result.err().map(|e| e.message()),
            }
        });

        join_all(attempts).await
    }

    async fn dispatch(
        &self,
        contact: &CrmContact,
        config: &CrmIntegrationConfig,
    ) -> Result<Value> {
        let transport = self.transport.as_ref();
        match config.provider {
            CrmProvider::Hubspot => {
                hubspot::sync_contact(transport, contact, config, &self.hubspot_url).await
            }
            CrmProvider::Salesforce => {
                salesforce::sync_contact(transport, contact, config, &self.salesforce_url).await
            }
            CrmProvider::Zapier => zapier::send_contact(transport, contact, config).await,
        }
    }
}

fn endpoint<'a>(config: &'a CrmIntegrationConfig, default_url: &'a str) -> &'a str {
    config.endpoint.as_deref().unwrap_or(default_url)
}
