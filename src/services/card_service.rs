//! Card validation and persistence.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::errors::{FieldErrors, LuxmeetError, Result};
use crate::models::card::{ALLOWED_FONT_FAMILIES, BusinessCard, CardTheme};
use crate::models::{CardInput, CardLayout, CardThemeInput};
use crate::storage::CardStore;
use crate::utils::url_validator::validate_url;
use crate::utils::validators::{is_valid_email, is_valid_hex_color};

pub struct CardService {
    cards: Arc<dyn CardStore>,
}

impl CardService {
    pub fn new(cards: Arc<dyn CardStore>) -> Self {
        Self { cards }
    }

    /// Validate editor input and build the card that would be stored.
    ///
    /// Collects every failing field instead of stopping at the first.
    /// Missing theme fields take the documented defaults; a fully
    /// populated theme always comes out.
    pub fn validate(input: &CardInput) -> std::result::Result<BusinessCard, FieldErrors> {
        let mut errors = FieldErrors::new();

        if input.name.trim().chars().count() < 2 {
            errors.push("name", "must be at least 2 characters");
        }
        if input.title.trim().chars().count() < 2 {
            errors.push("title", "must be at least 2 characters");
        }
        if !is_valid_email(&input.email) {
            errors.push("email", "must be a valid email address");
        }
        if input.user_id.trim().is_empty() {
            errors.push("userId", "is required");
        }
        if let Some(website) = input.website.as_deref()
            && !website.trim().is_empty()
            && let Err(e) = validate_url(website)
        {
            errors.push("website", e.to_string());
        }

        let theme = resolve_theme(input.theme.as_ref(), &mut errors);

        if !errors.is_empty() {
            return Err(errors);
        }

        let now = Utc::now();
        Ok(BusinessCard {
            id: input
                .id
                .clone()
                .unwrap_or_else(|| Uuid::new_v4().to_string()),
            user_id: input.user_id.clone(),
            team_id: input.team_id.clone(),
            name: input.name.trim().to_string(),
            title: input.title.trim().to_string(),
            company: none_if_blank(input.company.as_deref()),
            email: input.email.trim().to_string(),
            phone: none_if_blank(input.phone.as_deref()),
            website: none_if_blank(input.website.as_deref()),
            bio: input.bio.clone(),
            profile_image: input.profile_image.clone(),
            social_links: input.social_links.clone(),
            theme,
            badges: input.badges.clone(),
            privacy: input.privacy.unwrap_or_default(),
            version: input.version.unwrap_or(1),
            created_at: now,
            updated_at: now,
        })
    }

    /// Save editor input: create on first save, update after.
    ///
    /// Updates carry the caller's `version` when supplied; a stale one
    /// is rejected with a conflict error. Without a version the current
    /// stored version is used (last write wins).
    pub async fn save(&self, input: CardInput) -> Result<BusinessCard> {
        let card = Self::validate(&input).map_err(LuxmeetError::invalid_fields)?;

        let Some(existing) = self.cards.get(&card.id).await? else {
            let created = self.cards.create(card).await?;
            info!("CardService: created card '{}'", created.id);
            return Ok(created);
        };

        let mut update = card;
        update.created_at = existing.created_at;
        if input.version.is_none() {
            update.version = existing.version;
        }

        let updated = self.cards.update(update).await?;
        info!(
            "CardService: updated card '{}' to version {}",
            updated.id, updated.version
        );
        Ok(updated)
    }

    pub async fn get(&self, id: &str) -> Result<Option<BusinessCard>> {
        self.cards.get(id).await
    }

    pub async fn list_by_user(&self, user_id: &str) -> Result<Vec<BusinessCard>> {
        self.cards.list_by_user(user_id).await
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        self.cards.remove(id).await?;
        info!("CardService: deleted card '{}'", id);
        Ok(())
    }
}

fn none_if_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

/// Fill a possibly partial theme, validating whatever was supplied.
fn resolve_theme(input: Option<&CardThemeInput>, errors: &mut FieldErrors) -> CardTheme {
    let mut theme = CardTheme::default();
    let Some(input) = input else {
        return theme;
    };

    if let Some(primary) = input.primary_color.as_deref().filter(|s| !s.is_empty()) {
        if is_valid_hex_color(primary) {
            theme.primary_color = primary.to_string();
        } else {
            errors.push("theme.primaryColor", "must be a hex color like #0ea5e9");
        }
    }

    if let Some(secondary) = input.secondary_color.as_deref().filter(|s| !s.is_empty()) {
        if is_valid_hex_color(secondary) {
            theme.secondary_color = secondary.to_string();
        } else {
            errors.push("theme.secondaryColor", "must be a hex color like #e0f2fe");
        }
    }

    if let Some(font) = input.font_family.as_deref().filter(|s| !s.is_empty()) {
        if ALLOWED_FONT_FAMILIES.contains(&font) {
            theme.font_family = font.to_string();
        } else {
            errors.push(
                "theme.fontFamily",
                format!("unknown font; allowed: {}", ALLOWED_FONT_FAMILIES.join(", ")),
            );
        }
    }

    if let Some(layout) = input.layout.as_deref().filter(|s| !s.is_empty()) {
        match layout.parse::<CardLayout>() {
            Ok(parsed) => theme.layout = parsed,
            Err(e) => errors.push("theme.layout", e),
        }
    }

    theme
}
