//! Health endpoints.

use actix_web::{Responder, web};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::api::ok_json;

/// Recorded once at startup for uptime reporting.
#[derive(Clone, Debug)]
pub struct AppStartTime {
    pub start_datetime: DateTime<Utc>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HealthStatus {
    status: &'static str,
    uptime_secs: i64,
    version: &'static str,
}

pub struct HealthHandlers;

impl HealthHandlers {
    /// GET /health
    pub async fn health_check(start: web::Data<AppStartTime>) -> impl Responder {
        ok_json(HealthStatus {
            status: "ok",
            uptime_secs: (Utc::now() - start.start_datetime).num_seconds(),
            version: env!("CARGO_PKG_VERSION"),
        })
    }

    /// GET /health/ready
    pub async fn readiness_check() -> impl Responder {
        ok_json(serde_json::json!({ "ready": true }))
    }

    /// GET /health/live
    pub async fn liveness_check() -> impl Responder {
        ok_json(serde_json::json!({ "alive": true }))
    }
}
