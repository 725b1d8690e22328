//! CRM sync handler.

use actix_web::{Responder, web};
use serde::Deserialize;
use tracing::info;

use crate::api::ok_json;
use crate::services::crm::{CrmClient, CrmContact, CrmIntegrationConfig};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncContactBody {
    pub contact: CrmContact,
    pub providers: Vec<CrmIntegrationConfig>,
}

pub struct CrmHandlers;

impl CrmHandlers {
    /// POST /api/crm/sync
    ///
    /// Never fails as a whole: the response always carries one outcome
    /// per configured provider.
    pub async fn sync_contact(
        client: web::Data<CrmClient>,
        body: web::Json<SyncContactBody>,
    ) -> impl Responder {
        let body = body.into_inner();
        let outcomes = client.sync_contact(&body.contact, &body.providers).await;

        let failures = outcomes.iter().filter(|o| !o.success).count();
        info!(
            "CRM API: synced '{}' to {} providers, {} failed",
            body.contact.email,
            outcomes.len(),
            failures
        );

        ok_json(outcomes)
    }
}
