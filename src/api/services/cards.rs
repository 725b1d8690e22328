//! Card CRUD handlers.

use actix_web::{Responder, web};
use serde::Deserialize;
use tracing::info;

use crate::api::{error_response, ok_json};
use crate::errors::LuxmeetError;
use crate::models::CardInput;
use crate::services::CardService;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListCardsQuery {
    pub user_id: String,
}

pub struct CardHandlers;

impl CardHandlers {
    /// POST /api/cards
    pub async fn create_card(
        service: web::Data<CardService>,
        input: web::Json<CardInput>,
    ) -> impl Responder {
        let mut input = input.into_inner();
        // Creation never carries identity; the service assigns it.
        input.id = None;
        input.version = None;

        match service.save(input).await {
            Ok(card) => ok_json(card),
            Err(e) => error_response(&e),
        }
    }

    /// GET /api/cards?userId=...
    pub async fn list_cards(
        service: web::Data<CardService>,
        query: web::Query<ListCardsQuery>,
    ) -> impl Responder {
        match service.list_by_user(&query.user_id).await {
            Ok(cards) => {
                info!("Card API: listed {} cards for '{}'", cards.len(), query.user_id);
                ok_json(cards)
            }
            Err(e) => error_response(&e),
        }
    }

    /// GET /api/cards/{id}
    pub async fn get_card(
        service: web::Data<CardService>,
        path: web::Path<String>,
    ) -> impl Responder {
        let id = path.into_inner();
        match service.get(&id).await {
            Ok(Some(card)) => ok_json(card),
            Ok(None) => error_response(&LuxmeetError::not_found(format!(
                "Card '{}' not found",
                id
            ))),
            Err(e) => error_response(&e),
        }
    }

    /// PUT /api/cards/{id}
    pub async fn update_card(
        service: web::Data<CardService>,
        path: web::Path<String>,
        input: web::Json<CardInput>,
    ) -> impl Responder {
        let mut input = input.into_inner();
        input.id = Some(path.into_inner());

        match service.save(input).await {
            Ok(card) => ok_json(card),
            Err(e) => error_response(&e),
        }
    }

    /// DELETE /api/cards/{id}
    pub async fn delete_card(
        service: web::Data<CardService>,
        path: web::Path<String>,
    ) -> impl Responder {
        match service.delete(&path.into_inner()).await {
            Ok(()) => ok_json(serde_json::json!({ "deleted": true })),
            Err(e) => error_response(&e),
        }
    }
}
