//! Bearer-token authentication for the management API.

use actix_web::middleware::Next;
use actix_web::{
    Error, HttpResponse,
    body::BoxBody,
    dev::{ServiceRequest, ServiceResponse},
};
use std::env;
use std::sync::OnceLock;
use subtle::ConstantTimeEq;
use tracing::{debug, info};

pub struct AuthMiddleware;

static ADMIN_TOKEN: OnceLock<String> = OnceLock::new();

impl AuthMiddleware {
    /// Management API authentication.
    ///
    /// The token comes from `ADMIN_TOKEN`; an empty token disables the
    /// API entirely (requests see 404, not 401). Comparison is
    /// constant-time.
    pub async fn admin_auth(
        req: ServiceRequest,
        next: Next<BoxBody>,
    ) -> Result<ServiceResponse<BoxBody>, Error> {
        if req.method() == actix_web::http::Method::OPTIONS {
            return Ok(req.into_response(HttpResponse::NoContent().finish()));
        }

        let admin_token = ADMIN_TOKEN.get_or_init(|| env::var("ADMIN_TOKEN").unwrap_or_default());

        if admin_token.is_empty() {
            return Ok(req.into_response(
                HttpResponse::NotFound()
                    .insert_header(("Content-Type", "text/html; charset=utf-8"))
                    .body("Not Found"),
            ));
        }

        if let Some(auth_header) = req.headers().get("Authorization")
            && let Some(auth_bytes) = auth_header.as_bytes().strip_prefix(b"Bearer ")
            && bool::from(auth_bytes.ct_eq(admin_token.as_bytes()))
        {
            debug!("Management API authentication succeeded");
            return next.call(req).await;
        }

        info!("Management API authentication failed: token mismatch or missing header");
        Ok(req.into_response(
            HttpResponse::Unauthorized()
                .append_header(("Content-Type", "application/json; charset=utf-8"))
                .json(serde_json::json!({
                    "code": 401,
                    "error": { "message": "Unauthorized: Invalid or missing token" }
                })),
        ))
    }
}
