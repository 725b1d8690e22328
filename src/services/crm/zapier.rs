//! Zapier webhook delivery.

use chrono::Utc;
use serde_json::{Value, json};

use crate::errors::{LuxmeetError, Result};

use super::super::transport::JsonTransport;
use super::{CrmContact, CrmIntegrationConfig};

/// Build the webhook body for a contact.
pub fn webhook_payload(contact: &CrmContact) -> Value {
    json!({
        "contact": contact,
        "timestamp": Utc::now().to_rfc3339(),
        "source": "luxmeet",
    })
}

pub async fn send_contact(
    transport: &dyn JsonTransport,
    contact: &CrmContact,
    config: &CrmIntegrationConfig,
) -> Result<Value> {
    let webhook_url = config
        .webhook_url
        .as_deref()
        .filter(|u| !u.is_empty())
        .ok_or_else(|| LuxmeetError::crm_sync("Zapier webhook URL is required"))?;

    transport
        .post_json(webhook_url, None, webhook_payload(contact))
        .await
        .map_err(|e| {
            LuxmeetError::crm_sync(format!("Failed to send contact to Zapier: {}", e.message()))
        })
}
