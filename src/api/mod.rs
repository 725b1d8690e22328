//! HTTP surface: JSON envelope, error mapping, middleware and handlers.

use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use serde::Serialize;

use crate::errors::LuxmeetError;

pub mod middleware;
pub mod services;

/// Success envelope: `{ "code": 0, "data": ... }`.
#[derive(Serialize, Clone, Debug)]
pub struct ApiResponse<T> {
    pub code: i32,
    pub data: T,
}

pub fn ok_json<T: Serialize>(data: T) -> HttpResponse {
    HttpResponse::Ok()
        .append_header(("Content-Type", "application/json; charset=utf-8"))
        .json(ApiResponse { code: 0, data })
}

fn status_for(err: &LuxmeetError) -> StatusCode {
    match err {
        LuxmeetError::Validation(_)
        | LuxmeetError::Serialization(_)
        | LuxmeetError::DateParse(_) => StatusCode::BAD_REQUEST,
        LuxmeetError::InvalidFields(_) => StatusCode::UNPROCESSABLE_ENTITY,
        LuxmeetError::SlugTaken(_) | LuxmeetError::VersionConflict(_) => StatusCode::CONFLICT,
        LuxmeetError::NotFound(_) => StatusCode::NOT_FOUND,
        LuxmeetError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
        LuxmeetError::Upstream(_) | LuxmeetError::Scoring(_) | LuxmeetError::CrmSync(_) => {
            StatusCode::BAD_GATEWAY
        }
    }
}

/// Error envelope: `{ "code": "E###", "error": { type, message, fields? } }`.
pub fn error_response(err: &LuxmeetError) -> HttpResponse {
    let mut error = serde_json::json!({
        "type": err.error_type(),
        "message": err.message(),
    });
    if let Some(fields) = err.field_errors() {
        error["fields"] = serde_json::to_value(fields).unwrap_or_default();
    }

    HttpResponse::build(status_for(err))
        .append_header(("Content-Type", "application/json; charset=utf-8"))
        .json(serde_json::json!({
            "code": err.code(),
            "error": error,
        }))
}
