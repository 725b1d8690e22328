pub mod billing;
pub mod card_service;
pub mod crm;
pub mod lead_service;
pub mod link_service;
pub mod scoring;
pub mod transport;

pub use billing::{BillingService, CheckoutSession, PortalSession};
pub use card_service::CardService;
pub use crm::{CrmClient, CrmContact, CrmIntegrationConfig, CrmProvider, CrmSyncOutcome};
pub use lead_service::{CaptureLeadRequest, LeadService};
pub use link_service::{CreateLinkRequest, LinkService};
pub use scoring::{FALLBACK_SCORE, HttpScoringClient, LeadContext, ScoringClient};
pub use transport::{HttpJsonTransport, JsonTransport};
