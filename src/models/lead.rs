//! Captured leads and their interaction history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::AsRefStr;

/// Where a lead came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LeadSource {
    Nfc,
    Qr,
    Share,
    Direct,
}

impl std::fmt::Display for LeadSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}

impl std::str::FromStr for LeadSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "nfc" => Ok(Self::Nfc),
            "qr" => Ok(Self::Qr),
            "share" => Ok(Self::Share),
            "direct" => Ok(Self::Direct),
            _ => Err(format!(
                "Invalid lead source: '{}'. Valid: nfc, qr, share, direct",
                s
            )),
        }
    }
}

/// What a lead did with the card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum InteractionKind {
    View,
    Click,
    Download,
    Share,
}

/// One engagement event, input to scoring only; not persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadInteraction {
    #[serde(rename = "type")]
    pub kind: InteractionKind,
    pub timestamp: DateTime<Utc>,
    pub details: Option<String>,
}

/// A captured contact, always attached to exactly one card.
///
/// `score` stays `None` until the scorer has run; when present it is
/// within [0, 100].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    pub id: String,
    pub business_card_id: String,
    pub name: String,
    pub email: String,
    pub source: LeadSource,
    pub score: Option<u8>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Lead {
    /// Substring after `@`, empty when the address has none.
    pub fn email_domain(&self) -> &str {
        self.email.split_once('@').map(|(_, d)| d).unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lead_source_round_trip() {
        for source in [
            LeadSource::Nfc,
            LeadSource::Qr,
            LeadSource::Share,
            LeadSource::Direct,
        ] {
            let parsed: LeadSource = source.to_string().parse().unwrap();
            assert_eq!(parsed, source);
        }
        assert!("carrier-pigeon".parse::<LeadSource>().is_err());
    }

    #[test]
    fn test_email_domain() {
        let lead = Lead {
            id: "l1".into(),
            business_card_id: "c1".into(),
            name: "Jo".into(),
            email: "jo@acme.io".into(),
            source: LeadSource::Qr,
            score: None,
            notes: None,
            created_at: Utc::now(),
        };
        assert_eq!(lead.email_domain(), "acme.io");
    }

    #[test]
    fn test_interaction_serde_uses_type_key() {
        let json = r#"{"type":"click","timestamp":"2026-01-01T00:00:00Z","details":null}"#;
        let interaction: LeadInteraction = serde_json::from_str(json).unwrap();
        assert_eq!(interaction.kind, InteractionKind::Click);
    }
}
