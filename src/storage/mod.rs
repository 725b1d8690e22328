//! Store traits and backends.
//!
//! Each registry gets its own narrow trait so services depend only on
//! the operations they use. The in-memory backend is the reference
//! implementation; a remote persistence API can slot in behind the same
//! traits.

use std::sync::Arc;

use async_trait::async_trait;

use crate::errors::Result;
use crate::models::{BusinessCard, Lead, ShortLink, Subscription, Team, User};

pub mod memory;

#[async_trait]
pub trait CardStore: Send + Sync {
    async fn create(&self, card: BusinessCard) -> Result<BusinessCard>;
    async fn get(&self, id: &str) -> Result<Option<BusinessCard>>;
    async fn list_by_user(&self, user_id: &str) -> Result<Vec<BusinessCard>>;
    /// Rejects a stale `version` with a conflict error; bumps the
    /// version and `updated_at` on success.
    async fn update(&self, card: BusinessCard) -> Result<BusinessCard>;
    async fn remove(&self, id: &str) -> Result<()>;
}

#[async_trait]
pub trait LinkStore: Send + Sync {
    /// Fails with a slug-taken error when the slug already exists.
    async fn insert(&self, link: ShortLink) -> Result<ShortLink>;
    async fn get(&self, slug: &str) -> Result<Option<ShortLink>>;
    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<ShortLink>>;
    /// Saturating increment; returns the new count.
    async fn increment_click(&self, slug: &str) -> Result<u64>;
}

#[async_trait]
pub trait LeadStore: Send + Sync {
    async fn create(&self, lead: Lead) -> Result<Lead>;
    async fn get(&self, id: &str) -> Result<Option<Lead>>;
    async fn list_by_card(&self, card_id: &str) -> Result<Vec<Lead>>;
    async fn set_score(&self, id: &str, score: u8) -> Result<()>;
}

#[async_trait]
pub trait SubscriptionStore: Send + Sync {
    /// Replaces any existing row for the same team.
    async fn upsert(&self, subscription: Subscription) -> Result<Subscription>;
    async fn get_by_team(&self, team_id: &str) -> Result<Option<Subscription>>;
}

#[async_trait]
pub trait TeamStore: Send + Sync {
    async fn create(&self, team: Team) -> Result<Team>;
    async fn get(&self, id: &str) -> Result<Option<Team>>;
    async fn update(&self, team: Team) -> Result<Team>;
    async fn remove(&self, id: &str) -> Result<()>;
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn create(&self, user: User) -> Result<User>;
    async fn get(&self, id: &str) -> Result<Option<User>>;
    async fn update(&self, user: User) -> Result<User>;
    async fn remove(&self, id: &str) -> Result<()>;
}

/// The full set of stores, built once at startup and passed by
/// reference to whatever owns the session. No global state.
#[derive(Clone)]
pub struct AppStores {
    pub cards: Arc<dyn CardStore>,
    pub links: Arc<dyn LinkStore>,
    pub leads: Arc<dyn LeadStore>,
    pub subscriptions: Arc<dyn SubscriptionStore>,
    pub teams: Arc<dyn TeamStore>,
    pub users: Arc<dyn UserStore>,
}

pub struct StoreFactory;

impl StoreFactory {
    pub fn in_memory() -> AppStores {
        AppStores {
            cards: Arc::new(memory::MemoryCardStore::new()),
            links: Arc::new(memory::MemoryLinkStore::new()),
            leads: Arc::new(memory::MemoryLeadStore::new()),
            subscriptions: Arc::new(memory::MemorySubscriptionStore::new()),
            teams: Arc::new(memory::MemoryTeamStore::new()),
            users: Arc::new(memory::MemoryUserStore::new()),
        }
    }
}
