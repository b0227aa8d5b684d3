use std::sync::Arc;

use tonic::Request;
use tonic::Status;

use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::middleware::BEARER_PREFIX;
use crate::proto::TokenRequest;
use crate::proto::UserResponse;

pub const AUTHORIZATION_METADATA: &str = "authorization";

pub async fn check_token(
    service: Arc<dyn UserServicePort>,
    request: Request<TokenRequest>,
) -> Result<UserResponse, Status> {
    let token = token_from_metadata(&request)?;

    let identity = service.check_token(token).await.map_err(|e| {
        if e.is_invalid_token() {
            tracing::info!(reason = %e, "Introspection rejected token");
            Status::unauthenticated("invalid token")
        } else {
            tracing::error!(error = %e, "Introspection failed");
            Status::internal("internal error")
        }
    })?;

    Ok(identity.into())
}

fn token_from_metadata(request: &Request<TokenRequest>) -> Result<&str, Status> {
    let value = request
        .metadata()
        .get(AUTHORIZATION_METADATA)
        .ok_or_else(|| Status::unauthenticated("missing authorization metadata"))?
        .to_str()
        .map_err(|_| Status::unauthenticated("invalid token"))?;

    let token = value.strip_prefix(BEARER_PREFIX).unwrap_or(value).trim();
    if token.is_empty() {
        return Err(Status::unauthenticated("invalid token"));
    }

    Ok(token)
}
