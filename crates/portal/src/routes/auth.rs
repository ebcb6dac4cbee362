//! Auth route handlers: register and login.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Deserialize;
use serde_json::json;

use crate::db::VisitorRepository;
use crate::error::AppError;
use crate::models::VisitorProfile;
use crate::services::AuthService;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterPayload {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginPayload {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterPayload>,
) -> Result<impl IntoResponse, AppError> {
    let service = AuthService::new(VisitorRepository::new(state.pool()));
    let visitor = service
        .register(&payload.full_name, &payload.email, &payload.password)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "visitor": VisitorProfile::from(visitor),
        })),
    ))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> Result<impl IntoResponse, AppError> {
    let service = AuthService::new(VisitorRepository::new(state.pool()));
    let visitor = service.login(&payload.email, &payload.password).await?;

    Ok(Json(json!({
        "success": true,
        "visitor": VisitorProfile::from(visitor),
    })))
}
