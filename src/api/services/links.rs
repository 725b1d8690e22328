//! Link registry handlers and the public redirect endpoint.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, Responder, web};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::debug;

use crate::api::{error_response, ok_json};
use crate::errors::LuxmeetError;
use crate::services::link_service::{CreateLinkRequest, LinkService};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostNewLink {
    pub original_url: String,
    pub title: String,
    pub owner_id: String,
    pub custom_slug: Option<String>,
    pub password: Option<String>,
    /// RFC3339.
    pub expires_at: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListLinksQuery {
    pub owner_id: String,
}

#[derive(Debug, Deserialize)]
pub struct RedirectQuery {
    pub password: Option<String>,
}

pub struct LinkHandlers;

impl LinkHandlers {
    /// POST /api/links
    pub async fn create_link(
        service: web::Data<LinkService>,
        body: web::Json<PostNewLink>,
    ) -> impl Responder {
        let body = body.into_inner();

        let expires_at = match body.expires_at.as_deref().filter(|s| !s.is_empty()) {
            Some(raw) => match DateTime::parse_from_rfc3339(raw) {
                Ok(dt) => Some(dt.with_timezone(&Utc)),
                Err(e) => return error_response(&LuxmeetError::date_parse(e.to_string())),
            },
            None => None,
        };

        let request = CreateLinkRequest {
            original_url: body.original_url,
            title: body.title,
            owner_id: body.owner_id,
            custom_slug: body.custom_slug,
            password: body.password,
            expires_at,
        };

        match service.create_link(request).await {
            Ok(link) => ok_json(link),
            Err(e) => error_response(&e),
        }
    }

    /// GET /api/links?ownerId=...
    pub async fn list_links(
        service: web::Data<LinkService>,
        query: web::Query<ListLinksQuery>,
    ) -> impl Responder {
        match service.list_links(&query.owner_id).await {
            Ok(links) => ok_json(links),
            Err(e) => error_response(&e),
        }
    }

    /// GET /api/links/{slug}
    pub async fn get_link(
        service: web::Data<LinkService>,
        path: web::Path<String>,
    ) -> impl Responder {
        let slug = path.into_inner();
        match service.get_link(&slug).await {
            Ok(Some(link)) => ok_json(link),
            Ok(None) => error_response(&LuxmeetError::not_found(format!(
                "Link '{}' not found",
                slug
            ))),
            Err(e) => error_response(&e),
        }
    }
}

pub struct RedirectHandlers;

impl RedirectHandlers {
    /// GET /r/{slug}
    ///
    /// 307 to the original URL. Unknown and expired slugs 404 without
    /// touching the click counter; protected links require the correct
    /// `?password=`.
    pub async fn handle_redirect(
        service: web::Data<LinkService>,
        path: web::Path<String>,
        query: web::Query<RedirectQuery>,
    ) -> impl Responder {
        let slug = path.into_inner();

        let link = match service.get_link(&slug).await {
            Ok(Some(link)) => link,
            Ok(None) => {
                debug!("Redirect: link not found: {}", slug);
                return Self::not_found();
            }
            Err(e) => return error_response(&e),
        };

        if link.is_expired(Utc::now()) {
            debug!("Redirect: link expired: {}", slug);
            return Self::not_found();
        }

        if !LinkService::password_matches(&link, query.password.as_deref()) {
            return HttpResponse::Unauthorized()
                .append_header(("Content-Type", "text/html; charset=utf-8"))
                .body("Password required");
        }

        if let Err(e) = service.record_click(&slug).await {
            // The redirect still proceeds; losing a click is preferable
            // to losing the visitor.
            debug!("Redirect: click increment failed for '{}': {}", slug, e);
        }

        HttpResponse::build(StatusCode::TEMPORARY_REDIRECT)
            .insert_header(("Location", link.original_url))
            .finish()
    }

    fn not_found() -> HttpResponse {
        HttpResponse::build(StatusCode::NOT_FOUND)
            .insert_header(("Content-Type", "text/html; charset=utf-8"))
            .insert_header(("Cache-Control", "public, max-age=60"))
            .body("Not Found")
    }
}
