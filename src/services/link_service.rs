//! Link registry service.
//!
//! Creates shortened links with custom or generated slugs and records
//! clicks. Expiry is stored here but enforced by the redirect handler.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{error, info};
use uuid::Uuid;

use crate::errors::{LuxmeetError, Result};
use crate::models::ShortLink;
use crate::storage::LinkStore;
use crate::utils::generate_slug;
use crate::utils::password::{process_new_password, verify_password};
use crate::utils::url_validator::validate_url;

/// Request to create a new short link.
#[derive(Debug, Clone)]
pub struct CreateLinkRequest {
    pub original_url: String,
    pub title: String,
    pub owner_id: String,
    /// Used verbatim as the slug when present.
    pub custom_slug: Option<String>,
    pub password: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
}

pub struct LinkService {
    links: Arc<dyn LinkStore>,
    slug_length: usize,
    max_slug_attempts: usize,
}

impl LinkService {
    pub fn new(links: Arc<dyn LinkStore>, slug_length: usize, max_slug_attempts: usize) -> Self {
        Self {
            links,
            slug_length,
            max_slug_attempts,
        }
    }

    /// Create a short link.
    ///
    /// A custom slug that is already taken fails with a slug-taken
    /// error so the caller can prompt for another. Generated slugs are
    /// retried on collision up to the configured attempt limit.
    pub async fn create_link(&self, req: CreateLinkRequest) -> Result<ShortLink> {
        validate_url(&req.original_url)
            .map_err(|e| LuxmeetError::validation(e.to_string()))?;

        if req.title.trim().is_empty() {
            return Err(LuxmeetError::validation("Title is required"));
        }

        let password = process_new_password(req.password.as_deref()).map_err(|e| {
            error!("Failed to hash link password: {}", e);
            LuxmeetError::validation(format!("Could not process password: {}", e))
        })?;

        let build_link = |slug: String| ShortLink {
            id: Uuid::new_v4().to_string(),
            slug,
            original_url: req.original_url.clone(),
            title: req.title.trim().to_string(),
            owner_id: req.owner_id.clone(),
            clicks: 0,
            created_at: Utc::now(),
            expires_at: req.expires_at,
            password: password.clone(),
        };

        if let Some(slug) = req.custom_slug.as_deref().filter(|s| !s.is_empty()) {
            let link = self.links.insert(build_link(slug.to_string())).await?;
            info!(
                "LinkService: created link '{}' -> '{}'",
                link.slug, link.original_url
            );
            return Ok(link);
        }

        // Generated slug: regenerate on collision.
        for attempt in 0..self.max_slug_attempts {
            let candidate = generate_slug(self.slug_length);
            match self.links.insert(build_link(candidate.clone())).await {
                Ok(link) => {
                    info!(
                        "LinkService: created link '{}' -> '{}' (generated)",
                        link.slug, link.original_url
                    );
                    return Ok(link);
                }
                Err(LuxmeetError::SlugTaken(_)) => {
                    info!(
                        "LinkService: slug collision on '{}' (attempt {}), regenerating",
                        candidate,
                        attempt + 1
                    );
                }
                Err(e) => return Err(e),
            }
        }

        Err(LuxmeetError::persistence(format!(
            "Could not allocate a unique slug after {} attempts",
            self.max_slug_attempts
        )))
    }

    pub async fn get_link(&self, slug: &str) -> Result<Option<ShortLink>> {
        self.links.get(slug).await
    }

    pub async fn list_links(&self, owner_id: &str) -> Result<Vec<ShortLink>> {
        self.links.list_by_owner(owner_id).await
    }

    /// Record one click against a link. Returns the new count.
    pub async fn record_click(&self, slug: &str) -> Result<u64> {
        self.links.increment_click(slug).await
    }

    /// Check a plaintext password against a protected link.
    ///
    /// Unprotected links accept anything.
    pub fn password_matches(link: &ShortLink, supplied: Option<&str>) -> bool {
        match (&link.password, supplied) {
            (None, _) => true,
            (Some(hash), Some(plain)) => verify_password(plain, hash).unwrap_or(false),
            (Some(_), None) => false,
        }
    }
}
