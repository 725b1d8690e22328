//! Team, user and subscription handlers.
//!
//! Subscriptions are mirrored from payment-processor events; the PUT
//! endpoint is the webhook surrogate that applies an upsert.

use actix_web::{Responder, web};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::api::{error_response, ok_json};
use crate::errors::LuxmeetError;
use crate::models::{Plan, Subscription, SubscriptionStatus, Team, TeamSettings, User, UserRole};
use crate::storage::AppStores;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTeamBody {
    pub name: String,
    pub owner_id: String,
    pub settings: Option<TeamSettings>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTeamBody {
    pub name: Option<String>,
    pub settings: Option<TeamSettings>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserBody {
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub role: UserRole,
    pub team_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserBody {
    pub name: Option<String>,
    pub role: Option<UserRole>,
    pub team_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpsertSubscriptionBody {
    pub id: String,
    pub plan: Plan,
    pub status: SubscriptionStatus,
    pub current_period_end: DateTime<Utc>,
    #[serde(default)]
    pub cancel_at_period_end: bool,
}

pub struct AccountHandlers;

impl AccountHandlers {
    /// POST /api/teams
    pub async fn create_team(
        stores: web::Data<AppStores>,
        body: web::Json<CreateTeamBody>,
    ) -> impl Responder {
        let body = body.into_inner();
        if body.name.trim().is_empty() {
            return error_response(&LuxmeetError::validation("Team name is required"));
        }

        let now = Utc::now();
        let team = Team {
            id: Uuid::new_v4().to_string(),
            name: body.name.trim().to_string(),
            owner_id: body.owner_id,
            settings: body.settings.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        };

        match stores.teams.create(team).await {
            Ok(team) => ok_json(team),
            Err(e) => error_response(&e),
        }
    }

    /// GET /api/teams/{id}
    pub async fn get_team(
        stores: web::Data<AppStores>,
        path: web::Path<String>,
    ) -> impl Responder {
        let id = path.into_inner();
        match stores.teams.get(&id).await {
            Ok(Some(team)) => ok_json(team),
            Ok(None) => {
                error_response(&LuxmeetError::not_found(format!("Team '{}' not found", id)))
            }
            Err(e) => error_response(&e),
        }
    }

    /// PUT /api/teams/{id}
    pub async fn update_team(
        stores: web::Data<AppStores>,
        path: web::Path<String>,
        body: web::Json<UpdateTeamBody>,
    ) -> impl Responder {
        let id = path.into_inner();
        let body = body.into_inner();

        let mut team = match stores.teams.get(&id).await {
            Ok(Some(team)) => team,
            Ok(None) => {
                return error_response(&LuxmeetError::not_found(format!(
                    "Team '{}' not found",
                    id
                )));
            }
            Err(e) => return error_response(&e),
        };

        if let Some(name) = body.name.filter(|n| !n.trim().is_empty()) {
            team.name = name.trim().to_string();
        }
        if let Some(settings) = body.settings {
            team.settings = settings;
        }

        match stores.teams.update(team).await {
            Ok(team) => ok_json(team),
            Err(e) => error_response(&e),
        }
    }

    /// DELETE /api/teams/{id}
    pub async fn delete_team(
        stores: web::Data<AppStores>,
        path: web::Path<String>,
    ) -> impl Responder {
        match stores.teams.remove(&path.into_inner()).await {
            Ok(()) => ok_json(serde_json::json!({ "deleted": true })),
            Err(e) => error_response(&e),
        }
    }

    /// GET /api/teams/{id}/subscription
    pub async fn get_subscription(
        stores: web::Data<AppStores>,
        path: web::Path<String>,
    ) -> impl Responder {
        let team_id = path.into_inner();
        match stores.subscriptions.get_by_team(&team_id).await {
            Ok(Some(sub)) => ok_json(sub),
            Ok(None) => error_response(&LuxmeetError::not_found(format!(
                "No subscription for team '{}'",
                team_id
            ))),
            Err(e) => error_response(&e),
        }
    }

    /// PUT /api/teams/{id}/subscription
    pub async fn upsert_subscription(
        stores: web::Data<AppStores>,
        path: web::Path<String>,
        body: web::Json<UpsertSubscriptionBody>,
    ) -> impl Responder {
        let body = body.into_inner();
        let subscription = Subscription {
            id: body.id,
            team_id: path.into_inner(),
            plan: body.plan,
            status: body.status,
            current_period_end: body.current_period_end,
            cancel_at_period_end: body.cancel_at_period_end,
        };

        match stores.subscriptions.upsert(subscription).await {
            Ok(sub) => ok_json(sub),
            Err(e) => error_response(&e),
        }
    }

    /// POST /api/users
    pub async fn create_user(
        stores: web::Data<AppStores>,
        body: web::Json<CreateUserBody>,
    ) -> impl Responder {
        let body = body.into_inner();
        if !crate::utils::validators::is_valid_email(&body.email) {
            return error_response(&LuxmeetError::validation(format!(
                "Invalid email: '{}'",
                body.email
            )));
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4().to_string(),
            email: body.email.trim().to_string(),
            name: body.name,
            role: body.role,
            team_id: body.team_id,
            created_at: now,
            updated_at: now,
        };

        match stores.users.create(user).await {
            Ok(user) => ok_json(user),
            Err(e) => error_response(&e),
        }
    }

    /// GET /api/users/{id}
    pub async fn get_user(
        stores: web::Data<AppStores>,
        path: web::Path<String>,
    ) -> impl Responder {
        let id = path.into_inner();
        match stores.users.get(&id).await {
            Ok(Some(user)) => ok_json(user),
            Ok(None) => {
                error_response(&LuxmeetError::not_found(format!("User '{}' not found", id)))
            }
            Err(e) => error_response(&e),
        }
    }

    /// PUT /api/users/{id}
    pub async fn update_user(
        stores: web::Data<AppStores>,
        path: web::Path<String>,
        body: web::Json<UpdateUserBody>,
    ) -> impl Responder {
        let id = path.into_inner();
        let body = body.into_inner();

        let mut user = match stores.users.get(&id).await {
            Ok(Some(user)) => user,
            Ok(None) => {
                return error_response(&LuxmeetError::not_found(format!(
                    "User '{}' not found",
                    id
                )));
            }
            Err(e) => return error_response(&e),
        };

        if let Some(name) = body.name.filter(|n| !n.trim().is_empty()) {
            user.name = name.trim().to_string();
        }
        if let Some(role) = body.role {
            user.role = role;
        }
        if body.team_id.is_some() {
            user.team_id = body.team_id;
        }

        match stores.users.update(user).await {
            Ok(user) => ok_json(user),
            Err(e) => error_response(&e),
        }
    }

    /// DELETE /api/users/{id}
    pub async fn delete_user(
        stores: web::Data<AppStores>,
        path: web::Path<String>,
    ) -> impl Responder {
        match stores.users.remove(&path.into_inner()).await {
            Ok(()) => ok_json(serde_json::json!({ "deleted": true })),
            Err(e) => error_response(&e),
        }
    }
}
