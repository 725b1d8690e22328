//! In-memory store backends, keyed with `DashMap` for lock-free reads.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use crate::errors::{LuxmeetError, Result};
use crate::models::{BusinessCard, Lead, ShortLink, Subscription, Team, User};

use super::{CardStore, LeadStore, LinkStore, SubscriptionStore, TeamStore, UserStore};

#[derive(Default)]
pub struct MemoryCardStore {
    cards: DashMap<String, BusinessCard>,
}

impl MemoryCardStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CardStore for MemoryCardStore {
    async fn create(&self, card: BusinessCard) -> Result<BusinessCard> {
        match self.cards.entry(card.id.clone()) {
            Entry::Occupied(_) => Err(LuxmeetError::persistence(format!(
                "Card '{}' already exists",
                card.id
            ))),
            Entry::Vacant(slot) => {
                slot.insert(card.clone());
                Ok(card)
            }
        }
    }

    async fn get(&self, id: &str) -> Result<Option<BusinessCard>> {
        Ok(self.cards.get(id).map(|entry| entry.value().clone()))
    }

    async fn list_by_user(&self, user_id: &str) -> Result<Vec<BusinessCard>> {
        let mut cards: Vec<BusinessCard> = self
            .cards
            .iter()
            .filter(|entry| entry.user_id == user_id)
            .map(|entry| entry.value().clone())
            .collect();
        cards.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(cards)
    }

    async fn update(&self, card: BusinessCard) -> Result<BusinessCard> {
        let mut entry = self
            .cards
            .get_mut(&card.id)
            .ok_or_else(|| LuxmeetError::not_found(format!("Card '{}' not found", card.id)))?;

        if entry.version != card.version {
            return Err(LuxmeetError::version_conflict(format!(
                "Card '{}' was modified: stored version {}, got {}",
                card.id, entry.version, card.version
            )));
        }

        let mut updated = card;
        updated.version += 1;
        updated.updated_at = Utc::now();
        *entry = updated.clone();
        Ok(updated)
    }

    async fn remove(&self, id: &str) -> Result<()> {
        self.cards.remove(id);
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryLinkStore {
    links: DashMap<String, ShortLink>,
}

impl MemoryLinkStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LinkStore for MemoryLinkStore {
    async fn insert(&self, link: ShortLink) -> Result<ShortLink> {
        match self.links.entry(link.slug.clone()) {
            Entry::Occupied(_) => Err(LuxmeetError::slug_taken(format!(
                "Slug '{}' is already taken",
                link.slug
            ))),
            Entry::Vacant(slot) => {
                slot.insert(link.clone());
                Ok(link)
            }
        }
    }

    async fn get(&self, slug: &str) -> Result<Option<ShortLink>> {
        Ok(self.links.get(slug).map(|entry| entry.value().clone()))
    }

    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<ShortLink>> {
        let mut links: Vec<ShortLink> = self
            .links
            .iter()
            .filter(|entry| entry.owner_id == owner_id)
            .map(|entry| entry.value().clone())
            .collect();
        links.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(links)
    }

    async fn increment_click(&self, slug: &str) -> Result<u64> {
        let mut entry = self
            .links
            .get_mut(slug)
            .ok_or_else(|| LuxmeetError::not_found(format!("Link '{}' not found", slug)))?;
        entry.clicks = entry.clicks.saturating_add(1);
        Ok(entry.clicks)
    }
}

#[derive(Default)]
pub struct MemoryLeadStore {
    leads: DashMap<String, Lead>,
}

impl MemoryLeadStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LeadStore for MemoryLeadStore {
    async fn create(&self, lead: Lead) -> Result<Lead> {
        self.leads.insert(lead.id.clone(), lead.clone());
        Ok(lead)
    }

    async fn get(&self, id: &str) -> Result<Option<Lead>> {
        Ok(self.leads.get(id).map(|entry| entry.value().clone()))
    }

    async fn list_by_card(&self, card_id: &str) -> Result<Vec<Lead>> {
        let mut leads: Vec<Lead> = self
            .leads
            .iter()
            .filter(|entry| entry.business_card_id == card_id)
            .map(|entry| entry.value().clone())
            .collect();
        leads.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(leads)
    }

    async fn set_score(&self, id: &str, score: u8) -> Result<()> {
        let mut entry = self
            .leads
            .get_mut(id)
            .ok_or_else(|| LuxmeetError::not_found(format!("Lead '{}' not found", id)))?;
        entry.score = Some(score.min(100));
        Ok(())
    }
}

/// Keyed by team id, so the one-subscription-per-team invariant holds
/// by construction.
#[derive(Default)]
pub struct MemorySubscriptionStore {
    by_team: DashMap<String, Subscription>,
}

impl MemorySubscriptionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SubscriptionStore for MemorySubscriptionStore {
    async fn upsert(&self, subscription: Subscription) -> Result<Subscription> {
        self.by_team
            .insert(subscription.team_id.clone(), subscription.clone());
        Ok(subscription)
    }

    async fn get_by_team(&self, team_id: &str) -> Result<Option<Subscription>> {
        Ok(self.by_team.get(team_id).map(|entry| entry.value().clone()))
    }
}

#[derive(Default)]
pub struct MemoryTeamStore {
    teams: DashMap<String, Team>,
}

impl MemoryTeamStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TeamStore for MemoryTeamStore {
    async fn create(&self, team: Team) -> Result<Team> {
        self.teams.insert(team.id.clone(), team.clone());
        Ok(team)
    }

    async fn get(&self, id: &str) -> Result<Option<Team>> {
        Ok(self.teams.get(id).map(|entry| entry.value().clone()))
    }

    async fn update(&self, team: Team) -> Result<Team> {
        let mut entry = self
            .teams
            .get_mut(&team.id)
            .ok_or_else(|| LuxmeetError::not_found(format!("Team '{}' not found", team.id)))?;
        let mut updated = team;
        updated.updated_at = Utc::now();
        *entry = updated.clone();
        Ok(updated)
    }

    async fn remove(&self, id: &str) -> Result<()> {
        self.teams.remove(id);
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryUserStore {
    users: DashMap<String, User>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn create(&self, user: User) -> Result<User> {
        self.users.insert(user.id.clone(), user.clone());
        Ok(user)
    }

    async fn get(&self, id: &str) -> Result<Option<User>> {
        Ok(self.users.get(id).map(|entry| entry.value().clone()))
    }

    async fn update(&self, user: User) -> Result<User> {
        let mut entry = self
            .users
            .get_mut(&user.id)
            .ok_or_else(|| LuxmeetError::not_found(format!("User '{}' not found", user.id)))?;
        let mut updated = user;
        updated.updated_at = Utc::now();
        *entry = updated.clone();
        Ok(updated)
    }

    async fn remove(&self, id: &str) -> Result<()> {
        self.users.remove(id);
        Ok(())
    }
}
