use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use super::INVALID_CREDENTIALS;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::router::AppState;

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequestBody>,
) -> Result<ApiSuccess<LoginResponseData>, ApiError> {
    let session = state
        .user_service
        .authenticate(&body.email, &body.password)
        .await
        .map_err(|e| {
            if e.is_credential_failure() {
                // Logged apart, answered alike.
                tracing::info!(reason = %e, "Login rejected");
                ApiError::Unauthorized(INVALID_CREDENTIALS.to_string())
            } else {
                ApiError::from(e)
            }
        })?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        LoginResponseData {
            access_token: session.tokens.access_token,
            refresh_token: session.tokens.refresh_token,
            expires_in: session.tokens.expires_at,
            user_id: session.user.id.0,
            role: session.user.role.as_str().to_string(),
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequestBody {
    email: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    pub access_token: String,
    pub refresh_token: String,
    /// Absolute access token expiry, Unix seconds
    pub expires_in: i64,
    pub user_id: i64,
    pub role: String,
}
