//! Billing session handlers.

use actix_web::{Responder, web};
use serde::Deserialize;

use crate::api::{error_response, ok_json};
use crate::services::BillingService;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCheckoutBody {
    pub price_id: String,
    pub team_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePortalBody {
    pub team_id: String,
}

pub struct BillingHandlers;

impl BillingHandlers {
    /// POST /api/billing/checkout
    pub async fn create_checkout(
        service: web::Data<BillingService>,
        body: web::Json<CreateCheckoutBody>,
    ) -> impl Responder {
        match service
            .create_checkout_session(&body.price_id, &body.team_id)
            .await
        {
            Ok(session) => ok_json(session),
            Err(e) => error_response(&e),
        }
    }

    /// POST /api/billing/portal
    pub async fn create_portal(
        service: web::Data<BillingService>,
        body: web::Json<CreatePortalBody>,
    ) -> impl Responder {
        match service.create_portal_session(&body.team_id).await {
            Ok(session) => ok_json(session),
            Err(e) => error_response(&e),
        }
    }
}
