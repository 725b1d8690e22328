//! LinkService tests: slug allocation, collisions, clicks, passwords.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{Duration, Utc};

use luxmeet::errors::{LuxmeetError, Result};
use luxmeet::models::ShortLink;
use luxmeet::services::link_service::{CreateLinkRequest, LinkService};
use luxmeet::storage::LinkStore;
use luxmeet::storage::memory::MemoryLinkStore;

fn service() -> LinkService {
    LinkService::new(Arc::new(MemoryLinkStore::new()), 8, 5)
}

fn request(slug: Option<&str>) -> CreateLinkRequest {
    CreateLinkRequest {
        original_url: "https://example.com".to_string(),
        title: "Example".to_string(),
        owner_id: "u1".to_string(),
        custom_slug: slug.map(String::from),
        password: None,
        expires_at: None,
    }
}

// =============================================================================
// Creation
// =============================================================================

#[tokio::test]
async fn test_create_with_custom_slug() {
    let service = service();
    let link = service.create_link(request(Some("ex1"))).await.unwrap();

    assert_eq!(link.slug, "ex1");
    assert_eq!(link.clicks, 0);
    assert!(link.password.is_none());
    assert!(link.expires_at.is_none());
}

#[tokio::test]
async fn test_duplicate_custom_slug_fails() {
    let service = service();
    service.create_link(request(Some("ex1"))).await.unwrap();

    let err = service.create_link(request(Some("ex1"))).await.unwrap_err();
    assert!(matches!(err, LuxmeetError::SlugTaken(_)));
}

#[tokio::test]
async fn test_generated_slug_has_fixed_length() {
    let service = service();
    let link = service.create_link(request(None)).await.unwrap();

    assert_eq!(link.slug.len(), 8);
    assert!(link.slug.chars().all(|c| c.is_ascii_alphanumeric()));
}

#[tokio::test]
async fn test_invalid_url_is_rejected() {
    let service = service();

    let mut req = request(None);
    req.original_url = "javascript:alert(1)".to_string();
    assert!(matches!(
        service.create_link(req).await.unwrap_err(),
        LuxmeetError::Validation(_)
    ));

    let mut req = request(None);
    req.original_url = "example.com".to_string();
    assert!(service.create_link(req).await.is_err());
}

#[tokio::test]
async fn test_empty_title_is_rejected() {
    let service = service();
    let mut req = request(None);
    req.title = "   ".to_string();

    assert!(matches!(
        service.create_link(req).await.unwrap_err(),
        LuxmeetError::Validation(_)
    ));
}

#[tokio::test]
async fn test_password_is_stored_hashed() {
    let service = service();
    let mut req = request(Some("locked"));
    req.password = Some("hunter2".to_string());

    let link = service.create_link(req).await.unwrap();
    let hash = link.password.as_deref().expect("password should be set");
    assert!(hash.starts_with("$argon2"));
    assert_ne!(hash, "hunter2");

    assert!(LinkService::password_matches(&link, Some("hunter2")));
    assert!(!LinkService::password_matches(&link, Some("wrong")));
    assert!(!LinkService::password_matches(&link, None));
}

#[tokio::test]
async fn test_unprotected_link_accepts_any_password() {
    let service = service();
    let link = service.create_link(request(Some("open"))).await.unwrap();

    assert!(LinkService::password_matches(&link, None));
    assert!(LinkService::password_matches(&link, Some("anything")));
}

// =============================================================================
// Collision regeneration
// =============================================================================

/// Store that reports a slug collision for the first N inserts.
struct CollidingLinkStore {
    inner: MemoryLinkStore,
    remaining_collisions: AtomicUsize,
    attempts: AtomicUsize,
}

impl CollidingLinkStore {
    fn new(collisions: usize) -> Self {
        Self {
            inner: MemoryLinkStore::new(),
            remaining_collisions: AtomicUsize::new(collisions),
            attempts: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl LinkStore for CollidingLinkStore {
    async fn insert(&self, link: ShortLink) -> Result<ShortLink> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        let remaining = self.remaining_collisions.load(Ordering::SeqCst);
        if remaining > 0 {
            self.remaining_collisions.store(remaining - 1, Ordering::SeqCst);
            return Err(LuxmeetError::slug_taken(format!(
                "Slug '{}' is already taken",
                link.slug
            )));
        }
        self.inner.insert(link).await
    }

    async fn get(&self, slug: &str) -> Result<Option<ShortLink>> {
        self.inner.get(slug).await
    }

    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<ShortLink>> {
        self.inner.list_by_owner(owner_id).await
    }

    async fn increment_click(&self, slug: &str) -> Result<u64> {
        self.inner.increment_click(slug).await
    }
}

#[tokio::test]
async fn test_generated_slug_regenerates_on_collision() {
    let store = Arc::new(CollidingLinkStore::new(2));
    let service = LinkService::new(store.clone(), 8, 5);

    let link = service.create_link(request(None)).await.unwrap();
    assert_eq!(link.slug.len(), 8);
    assert_eq!(store.attempts.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_slug_allocation_gives_up_after_budget() {
    let store = Arc::new(CollidingLinkStore::new(usize::MAX));
    let service = LinkService::new(store.clone(), 8, 5);

    let err = service.create_link(request(None)).await.unwrap_err();
    assert!(matches!(err, LuxmeetError::Persistence(_)));
    assert_eq!(store.attempts.load(Ordering::SeqCst), 5);
}

#[tokio::test]
async fn test_custom_slug_collision_is_not_retried() {
    let store = Arc::new(CollidingLinkStore::new(usize::MAX));
    let service = LinkService::new(store.clone(), 8, 5);

    let err = service.create_link(request(Some("ex1"))).await.unwrap_err();
    assert!(matches!(err, LuxmeetError::SlugTaken(_)));
    assert_eq!(store.attempts.load(Ordering::SeqCst), 1);
}

// =============================================================================
// Clicks
// =============================================================================

#[tokio::test]
async fn test_clicks_start_at_zero_and_only_grow() {
    let service = service();
    let link = service.create_link(request(Some("clicky"))).await.unwrap();
    assert_eq!(link.clicks, 0);

    let mut previous = 0;
    for _ in 0..10 {
        let clicks = service.record_click("clicky").await.unwrap();
        assert!(clicks > previous, "clicks must be strictly increasing here");
        previous = clicks;
    }

    let stored = service.get_link("clicky").await.unwrap().unwrap();
    assert_eq!(stored.clicks, 10);
}

#[tokio::test]
async fn test_record_click_on_unknown_slug_fails() {
    let service = service();
    assert!(matches!(
        service.record_click("ghost").await.unwrap_err(),
        LuxmeetError::NotFound(_)
    ));
}

// =============================================================================
// Listing
// =============================================================================

#[tokio::test]
async fn test_list_links_by_owner() {
    let service = service();
    service.create_link(request(Some("a"))).await.unwrap();
    service.create_link(request(Some("b"))).await.unwrap();

    let mut other = request(Some("c"));
    other.owner_id = "u2".to_string();
    service.create_link(other).await.unwrap();

    let links = service.list_links("u1").await.unwrap();
    assert_eq!(links.len(), 2);
    assert!(links.iter().all(|l| l.owner_id == "u1"));
}

#[tokio::test]
async fn test_expiry_is_stored_not_enforced_at_creation() {
    let service = service();
    let mut req = request(Some("expired"));
    req.expires_at = Some(Utc::now() - Duration::hours(1));

    // Creation succeeds even with a past expiry; the redirect layer is
    // what refuses to serve it.
    let link = service.create_link(req).await.unwrap();
    assert!(link.is_expired(Utc::now()));
}
