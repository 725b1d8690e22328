//! Business card entity and editor input types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_PRIMARY_COLOR: &str = "#0ea5e9";
pub const DEFAULT_SECONDARY_COLOR: &str = "#e0f2fe";
pub const DEFAULT_FONT_FAMILY: &str = "Inter";

/// Fonts the card renderer ships with; anything else is rejected.
pub const ALLOWED_FONT_FAMILIES: &[&str] = &[
    "Inter",
    "Roboto",
    "Playfair Display",
    "Montserrat",
    "Open Sans",
    "Lato",
];

/// Card layout variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CardLayout {
    #[default]
    Modern,
    Classic,
    Minimal,
}

impl std::fmt::Display for CardLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Modern => write!(f, "modern"),
            Self::Classic => write!(f, "classic"),
            Self::Minimal => write!(f, "minimal"),
        }
    }
}

impl std::str::FromStr for CardLayout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "modern" => Ok(Self::Modern),
            "classic" => Ok(Self::Classic),
            "minimal" => Ok(Self::Minimal),
            _ => Err(format!(
                "Invalid layout: '{}'. Valid: modern, classic, minimal",
                s
            )),
        }
    }
}

/// A fully populated theme. Partial themes never persist; missing fields
/// are filled with defaults during validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardTheme {
    pub primary_color: String,
    pub secondary_color: String,
    pub font_family: String,
    pub layout: CardLayout,
}

impl Default for CardTheme {
    fn default() -> Self {
        Self {
            primary_color: DEFAULT_PRIMARY_COLOR.to_string(),
            secondary_color: DEFAULT_SECONDARY_COLOR.to_string(),
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            layout: CardLayout::Modern,
        }
    }
}

/// Editor-supplied theme fields; every field optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardThemeInput {
    pub primary_color: Option<String>,
    pub secondary_color: Option<String>,
    pub font_family: Option<String>,
    pub layout: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardPrivacy {
    pub show_email: bool,
    pub show_phone: bool,
    pub allow_indexing: bool,
}

impl Default for CardPrivacy {
    fn default() -> Self {
        Self {
            show_email: true,
            show_phone: true,
            allow_indexing: true,
        }
    }
}

/// A digital business card.
///
/// `version` is the optimistic-concurrency token: bumped on every stored
/// update, checked when the caller supplies one.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessCard {
    pub id: String,
    pub user_id: String,
    pub team_id: Option<String>,
    pub name: String,
    pub title: String,
    pub company: Option<String>,
    pub email: String,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub bio: Option<String>,
    pub profile_image: Option<String>,
    #[serde(default)]
    pub social_links: Vec<String>,
    pub theme: CardTheme,
    #[serde(default)]
    pub badges: Vec<String>,
    pub privacy: CardPrivacy,
    pub version: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Raw editor form input. Identity fields (`id`, `version`) are present
/// only when saving an existing card.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardInput {
    pub id: Option<String>,
    pub version: Option<u64>,
    pub user_id: String,
    pub team_id: Option<String>,
    pub name: String,
    pub title: String,
    pub company: Option<String>,
    pub email: String,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub bio: Option<String>,
    pub profile_image: Option<String>,
    #[serde(default)]
    pub social_links: Vec<String>,
    pub theme: Option<CardThemeInput>,
    #[serde(default)]
    pub badges: Vec<String>,
    pub privacy: Option<CardPrivacy>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_theme_matches_editor_defaults() {
        let theme = CardTheme::default();
        assert_eq!(theme.primary_color, "#0ea5e9");
        assert_eq!(theme.secondary_color, "#e0f2fe");
        assert_eq!(theme.font_family, "Inter");
        assert_eq!(theme.layout, CardLayout::Modern);
    }

    #[test]
    fn test_layout_round_trip() {
        for layout in [CardLayout::Modern, CardLayout::Classic, CardLayout::Minimal] {
            let parsed: CardLayout = layout.to_string().parse().unwrap();
            assert_eq!(parsed, layout);
        }
        assert!("brutalist".parse::<CardLayout>().is_err());
    }

    #[test]
    fn test_layout_serde_is_lowercase() {
        let json = serde_json::to_string(&CardLayout::Classic).unwrap();
        assert_eq!(json, "\"classic\"");
    }
}
