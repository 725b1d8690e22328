//! HubSpot contact sync.

use serde_json::{Value, json};

use crate::errors::{LuxmeetError, Result};

use super::super::transport::JsonTransport;
use super::{CrmContact, CrmIntegrationConfig, endpoint};

/// Build the HubSpot `properties` payload for a contact.
pub fn contact_payload(contact: &CrmContact) -> Value {
    let mut properties = json!({
        "email": contact.email,
        "firstname": contact.first_name,
        "lastname": contact.last_name,
        "company": contact.company,
        "phone": contact.phone,
        "jobtitle": contact.title,
        "lead_source": contact.source,
        "hs_lead_status": "NEW",
        "luxmeet_lead_score": contact.lead_score.map(|s| s.to_string()),
    });

    if let Some(map) = properties.as_object_mut() {
        for (key, value) in &contact.custom_fields {
            map.insert(key.clone(), value.clone());
        }
    }

    json!({ "properties": properties })
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
        .ok_or_else(|| LuxmeetError::crm_sync("HubSpot API key is required"))?;

    transport
        .post_json(endpoint(config, default_url), Some(api_key), contact_payload(contact))
        .await
        .map_err(|e| LuxmeetError::crm_sync(format!("Failed to sync contact to HubSpot: {}", e.message())))
}
