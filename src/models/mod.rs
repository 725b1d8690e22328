pub mod account;
pub mod card;
pub mod lead;
pub mod link;

pub use account::{Plan, Subscription, SubscriptionStatus, Team, TeamSettings, User, UserRole};
pub use card::{BusinessCard, CardInput, CardLayout, CardPrivacy, CardTheme, CardThemeInput};
pub use lead::{InteractionKind, Lead, LeadInteraction, LeadSource};
pub use link::ShortLink;
