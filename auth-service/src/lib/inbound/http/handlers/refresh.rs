use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use super::INVALID_TOKEN;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::router::AppState;

pub async fn refresh(
    State(state): State<AppState>,
    Json(body): Json<RefreshRequestBody>,
) -> Result<ApiSuccess<RefreshResponseData>, ApiError> {
    let tokens = state
        .user_service
        .refresh(&body.refresh_token)
        .await
        .map_err(|e| {
            // A vanished user is an unusable token, not a lookup failure.
            if e.is_invalid_token() || e.is_credential_failure() {
                tracing::info!(reason = %e, "Refresh rejected");
                ApiError::Unauthorized(INVALID_TOKEN.to_string())
            } else {
                ApiError::from(e)
            }
        })?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        RefreshResponseData {
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
            expires_in: tokens.expires_at,
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RefreshRequestBody {
    refresh_token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RefreshResponseData {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: i64,
}
