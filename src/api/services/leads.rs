//! Lead capture and scoring handlers.

use actix_web::{Responder, web};
use serde::Deserialize;

use crate::api::{error_response, ok_json};
use crate::models::LeadInteraction;
use crate::services::lead_service::{CaptureLeadRequest, LeadService};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreLeadBody {
    #[serde(default)]
    pub interactions: Vec<LeadInteraction>,
}

pub struct LeadHandlers;

impl LeadHandlers {
    /// POST /api/leads
    pub async fn capture_lead(
        service: web::Data<LeadService>,
        body: web::Json<CaptureLeadRequest>,
    ) -> impl Responder {
        match service.capture_lead(body.into_inner()).await {
            Ok(lead) => ok_json(lead),
            Err(e) => error_response(&e),
        }
    }

    /// GET /api/cards/{id}/leads
    pub async fn list_leads_by_card(
        service: web::Data<LeadService>,
        path: web::Path<String>,
    ) -> impl Responder {
        match service.list_leads_by_card(&path.into_inner()).await {
            Ok(leads) => ok_json(leads),
            Err(e) => error_response(&e),
        }
    }

    /// POST /api/leads/{id}/score
    pub async fn score_lead(
        service: web::Data<LeadService>,
        path: web::Path<String>,
        body: web::Json<ScoreLeadBody>,
    ) -> impl Responder {
        let lead_id = path.into_inner();
        match service
            .score_lead(&lead_id, body.into_inner().interactions)
            .await
        {
            Ok(score) => ok_json(serde_json::json!({ "leadId": lead_id, "score": score })),
            Err(e) => error_response(&e),
        }
    }
}
