use auth::TokenKind;
use axum::extract::Request;
use axum::extract::State;
use axum::http::StatusCode;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde_json::json;

use super::handlers::INVALID_TOKEN;
use crate::domain::user::models::UserId;
use crate::inbound::http::router::AppState;

pub const BEARER_PREFIX: &str = "Bearer ";

/// Extension type to store the authenticated identity in request extensions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub email: String,
    pub role: String,
}

/// Middleware that validates access tokens and adds the caller's identity to
/// request extensions.
///
/// Stateless: every call is decided from the header alone.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = extract_token_from_header(&req)?;

    let identity = state
        .authenticator
        .validate_token(token, TokenKind::Access)
        .map_err(|e| {
            tracing::warn!(error = %e, "Access token rejected");
            unauthorized(INVALID_TOKEN)
        })?;

    req.extensions_mut().insert(AuthenticatedUser {
        user_id: UserId(identity.id),
        email: identity.email,
        role: identity.role,
    });

    Ok(next.run(req).await)
}

fn unauthorized(message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({
            "error": message
        })),
    )
        .into_response()
}

fn extract_token_from_header(req: &Request) -> Result<&str, Response> {
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .ok_or_else(|| {
            tracing::debug!("Request without Authorization header");
            unauthorized("Missing Authorization header")
        })?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| unauthorized("Invalid Authorization header"))?;

    auth_str
        .strip_prefix(BEARER_PREFIX)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| {
            unauthorized("Invalid Authorization header format. Expected: Bearer <token>")
        })
}
