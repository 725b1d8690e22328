pub mod accounts;
pub mod billing;
pub mod cards;
pub mod crm;
pub mod health;
pub mod leads;
pub mod links;

pub use accounts::AccountHandlers;
pub use billing::BillingHandlers;
pub use cards::CardHandlers;
pub use crm::CrmHandlers;
pub use health::{AppStartTime, HealthHandlers};
pub use leads::LeadHandlers;
pub use links::{LinkHandlers, RedirectHandlers};
