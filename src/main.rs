use std::sync::Arc;
use std::time::Duration;

use actix_cors::Cors;
use actix_web::middleware::from_fn;
use actix_web::{App, HttpServer, web};
use tracing::info;

use luxmeet::api::middleware::AuthMiddleware;
use luxmeet::api::services::{
    AccountHandlers, AppStartTime, BillingHandlers, CardHandlers, CrmHandlers, HealthHandlers,
    LeadHandlers, LinkHandlers, RedirectHandlers,
};
use luxmeet::config::AppConfig;
use luxmeet::services::{
    BillingService, CardService, CrmClient, HttpJsonTransport, HttpScoringClient, LeadService,
    LinkService, ScoringClient,
};
use luxmeet::storage::StoreFactory;
use luxmeet::system::init_logging;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let app_start_time = AppStartTime {
        start_datetime: chrono::Utc::now(),
    };

    dotenvy::dotenv().ok();

    let config = AppConfig::load();
    let _log_guard = init_logging(&config);

    let stores = StoreFactory::in_memory();

    let scorer: Arc<dyn ScoringClient> = Arc::new(HttpScoringClient::new(
        &config.scoring,
        Arc::new(HttpJsonTransport::new(Duration::from_secs(
            config.scoring.timeout_secs,
        ))),
    ));

    let card_service = web::Data::new(CardService::new(stores.cards.clone()));
    let link_service = web::Data::new(LinkService::new(
        stores.links.clone(),
        config.features.slug_length,
        config.features.max_slug_attempts,
    ));
    let lead_service = web::Data::new(LeadService::new(
        stores.leads.clone(),
        stores.cards.clone(),
        scorer,
    ));
    let billing_service = web::Data::new(BillingService::new(
        &config.billing,
        Arc::new(HttpJsonTransport::new(Duration::from_secs(
            config.billing.timeout_secs,
        ))),
    ));
    let crm_client = web::Data::new(CrmClient::new(
        &config.crm,
        Arc::new(HttpJsonTransport::new(Duration::from_secs(
            config.crm.timeout_secs,
        ))),
    ));
    let stores_data = web::Data::new(stores);
    let app_start = web::Data::new(app_start_time);

    if std::env::var("ADMIN_TOKEN").unwrap_or_default().is_empty() {
        info!("Management API is disabled (ADMIN_TOKEN not set)");
    } else {
        info!("Management API available at: /api");
    }

    let bind_address = format!("{}:{}", config.server.host, config.server.port);
    info!("Starting server at http://{}", bind_address);

    let workers = config.server.cpu_count.max(1);

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .app_data(card_service.clone())
            .app_data(link_service.clone())
            .app_data(lead_service.clone())
            .app_data(billing_service.clone())
            .app_data(crm_client.clone())
            .app_data(stores_data.clone())
            .app_data(app_start.clone())
            .service(
                web::scope("/api")
                    .wrap(from_fn(AuthMiddleware::admin_auth))
                    .route("/cards", web::post().to(CardHandlers::create_card))
                    .route("/cards", web::get().to(CardHandlers::list_cards))
                    .route("/cards/{id}", web::get().to(CardHandlers::get_card))
                    .route("/cards/{id}", web::put().to(CardHandlers::update_card))
                    .route("/cards/{id}", web::delete().to(CardHandlers::delete_card))
                    .route(
                        "/cards/{id}/leads",
                        web::get().to(LeadHandlers::list_leads_by_card),
                    )
                    .route("/links", web::post().to(LinkHandlers::create_link))
                    .route("/links", web::get().to(LinkHandlers::list_links))
                    .route("/links/{slug}", web::get().to(LinkHandlers::get_link))
                    .route("/leads", web::post().to(LeadHandlers::capture_lead))
                    .route("/leads/{id}/score", web::post().to(LeadHandlers::score_lead))
                    .route(
                        "/billing/checkout",
                        web::post().to(BillingHandlers::create_checkout),
                    )
                    .route(
                        "/billing/portal",
                        web::post().to(BillingHandlers::create_portal),
                    )
                    .route("/crm/sync", web::post().to(CrmHandlers::sync_contact))
                    .route("/teams", web::post().to(AccountHandlers::create_team))
                    .route("/teams/{id}", web::get().to(AccountHandlers::get_team))
                    .route("/teams/{id}", web::put().to(AccountHandlers::update_team))
                    .route("/teams/{id}", web::delete().to(AccountHandlers::delete_team))
                    .route(
                        "/teams/{id}/subscription",
                        web::get().to(AccountHandlers::get_subscription),
                    )
                    .route(
                        "/teams/{id}/subscription",
                        web::put().to(AccountHandlers::upsert_subscription),
                    )
                    .route("/users", web::post().to(AccountHandlers::create_user))
                    .route("/users/{id}", web::get().to(AccountHandlers::get_user))
                    .route("/users/{id}", web::put().to(AccountHandlers::update_user))
                    .route("/users/{id}", web::delete().to(AccountHandlers::delete_user)),
            )
            .service(
                web::scope("/health")
                    .route("", web::get().to(HealthHandlers::health_check))
                    .route("/ready", web::get().to(HealthHandlers::readiness_check))
                    .route("/live", web::get().to(HealthHandlers::liveness_check)),
            )
            .route("/r/{slug}", web::get().to(RedirectHandlers::handle_redirect))
    })
    .workers(workers)
    .bind(bind_address)?
    .run()
    .await?;

    Ok(())
}
