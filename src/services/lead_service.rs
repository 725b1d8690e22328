//! Lead capture and scoring orchestration.

use std::sync::Arc;

use chrono::Utc;
use serde::Deserialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::{LuxmeetError, Result};
use crate::models::{InteractionKind, Lead, LeadInteraction, LeadSource};
use crate::storage::{CardStore, LeadStore};
use crate::utils::validators::is_valid_email;

use super::scoring::{
    FALLBACK_SCORE, LeadContext, ScoringClient, build_scoring_prompt, clamp_score,
    parse_leading_int,
};

/// Request to capture a new lead from a card view.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptureLeadRequest {
    pub name: String,
    pub email: String,
    pub source: LeadSource,
    pub business_card_id: String,
    pub notes: Option<String>,
}

pub struct LeadService {
    leads: Arc<dyn LeadStore>,
    cards: Arc<dyn CardStore>,
    scorer: Arc<dyn ScoringClient>,
}

impl LeadService {
    pub fn new(
        leads: Arc<dyn LeadStore>,
        cards: Arc<dyn CardStore>,
        scorer: Arc<dyn ScoringClient>,
    ) -> Self {
        Self {
            leads,
            cards,
            scorer,
        }
    }

    /// Capture a contact against a card. The score starts unset and is
    /// filled in asynchronously by `score_lead`.
    pub async fn capture_lead(&self, req: CaptureLeadRequest) -> Result<Lead> {
        if req.name.trim().is_empty() {
            return Err(LuxmeetError::validation("Lead name is required"));
        }
        if !is_valid_email(&req.email) {
            return Err(LuxmeetError::validation(format!(
                "Invalid lead email: '{}'",
                req.email
            )));
        }

        if self.cards.get(&req.business_card_id).await?.is_none() {
            return Err(LuxmeetError::not_found(format!(
                "Card '{}' not found",
                req.business_card_id
            )));
        }

        let lead = Lead {
            id: Uuid::new_v4().to_string(),
            business_card_id: req.business_card_id,
            name: req.name,
            email: req.email,
            source: req.source,
            score: None,
            notes: req.notes,
            created_at: Utc::now(),
        };

        let lead = self.leads.create(lead).await?;
        info!(
            "LeadService: captured lead '{}' for card '{}' via {}",
            lead.id, lead.business_card_id, lead.source
        );
        Ok(lead)
    }

    pub async fn get_lead(&self, id: &str) -> Result<Option<Lead>> {
        self.leads.get(id).await
    }

    pub async fn list_leads_by_card(&self, card_id: &str) -> Result<Vec<Lead>> {
        self.leads.list_by_card(card_id).await
    }

    /// Score a lead from its interaction history and persist the result.
    ///
    /// Fails soft: when the model cannot be reached or replies with
    /// something non-numeric, the lead gets the fixed fallback score
    /// instead of an error.
    pub async fn score_lead(
        &self,
        lead_id: &str,
        interactions: Vec<LeadInteraction>,
    ) -> Result<u8> {
        let lead = self
            .leads
            .get(lead_id)
            .await?
            .ok_or_else(|| LuxmeetError::not_found(format!("Lead '{}' not found", lead_id)))?;

        let context = LeadContext {
            source: lead.source,
            email_domain: lead.email_domain().to_string(),
            total_interactions: interactions.len(),
            time_to_respond: response_time_minutes(&interactions),
            interactions,
        };

        let prompt = build_scoring_prompt(&context);

        let score = match self.scorer.request_score(&prompt).await {
            Ok(reply) => match parse_leading_int(&reply) {
                Some(raw) => clamp_score(raw),
                None => {
                    warn!(
                        "LeadService: non-numeric reply from scorer '{}' for lead '{}', using fallback",
                        self.scorer.name(),
                        lead.id
                    );
                    FALLBACK_SCORE
                }
            },
            Err(e) => {
                warn!(
                    "LeadService: scoring failed for lead '{}': {}, using fallback",
                    lead.id, e
                );
                FALLBACK_SCORE
            }
        };

        self.leads.set_score(&lead.id, score).await?;
        info!("LeadService: scored lead '{}' at {}", lead.id, score);
        Ok(score)
    }
}

/// Whole minutes between the first interaction and the first click or
/// share. `None` when there are fewer than two interactions or nothing
/// to respond to.
fn response_time_minutes(interactions: &[LeadInteraction]) -> Option<i64> {
    if interactions.len() < 2 {
        return None;
    }

    let first = interactions.first()?;
    let response = interactions
        .iter()
        .find(|i| matches!(i.kind, InteractionKind::Click | InteractionKind::Share))?;

    Some((response.timestamp - first.timestamp).num_minutes())
}

#[cfg(test)]
mod response_time_tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn interaction(kind: InteractionKind, offset_minutes: i64) -> LeadInteraction {
        LeadInteraction {
            kind,
            timestamp: Utc::now() + Duration::minutes(offset_minutes),
            details: None,
        }
    }

    #[test]
    fn test_no_interactions() {
        assert_eq!(response_time_minutes(&[]), None);
    }

    #[test]
    fn test_single_interaction() {
        assert_eq!(
            response_time_minutes(&[interaction(InteractionKind::Click, 0)]),
            None
        );
    }

    #[test]
    fn test_no_click_or_share() {
        let interactions = vec![
            interaction(InteractionKind::View, 0),
            interaction(InteractionKind::Download, 10),
        ];
        assert_eq!(response_time_minutes(&interactions), None);
    }

    #[test]
    fn test_minutes_until_first_click() {
        let interactions = vec![
            interaction(InteractionKind::View, 0),
            interaction(InteractionKind::View, 5),
            interaction(InteractionKind::Click, 12),
            interaction(InteractionKind::Share, 40),
        ];
        assert_eq!(response_time_minutes(&interactions), Some(12));
    }
}
