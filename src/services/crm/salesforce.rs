//! Salesforce lead sync.

use serde_json::{Value, json};

use crate::errors::{LuxmeetError, Result};

use super::super::transport::JsonTransport;
use super::{CrmContact, CrmIntegrationConfig, endpoint};

/// Build the Salesforce lead payload for a contact.
pub fn lead_payload(contact: &CrmContact) -> Value {
    let mut payload = json!({
        "Email": contact.email,
        "FirstName": contact.first_name,
        "LastName": contact.last_name,
        "Company": contact.company,
        "Phone": contact.phone,
        "Title": contact.title,
        "LeadSource": contact.source,
        "Status": "Open - Not Contacted",
        "Rating": contact.lead_score.map(|s| s.to_string()),
    });

    if let Some(map) = payload.as_object_mut() {
        for (key, value) in &contact.custom_fields {
            map.insert(key.clone(), value.clone());
        }
    }

    payload
}

pub async fn sync_contact(
    transport: &dyn JsonTransport,
    contact: &CrmContact,
    config: &CrmIntegrationConfig,
    default_url: &str,
) -> Result<Value> {
    let api_key = config
        .api_key
        .as_deref()
        .filter(|k| !k.is_empty())
        .ok_or_else(|| LuxmeetError::crm_sync("Salesforce API key is required"))?;

    transport
        .post_json(endpoint(config, default_url), Some(api_key), lead_payload(contact))
        .await
        .map_err(|e| {
            LuxmeetError::crm_sync(format!("Failed to sync contact to Salesforce: {}", e.message()))
        })
}
