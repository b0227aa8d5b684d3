//! Client side of token introspection, for services that trust this one.

use std::time::Duration;

use auth::Identity;
use thiserror::Error;
use tonic::metadata::Ascii;
use tonic::metadata::MetadataValue;
use tonic::transport::Channel;
use tonic::Code;

use crate::inbound::grpc::handlers::check_token::AUTHORIZATION_METADATA;
use crate::inbound::http::middleware::BEARER_PREFIX;
use crate::proto::user_service_client::UserServiceClient;
use crate::proto::TokenRequest;

pub const INTROSPECTION_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Error)]
pub enum IntrospectionError {
    #[error("Failed to connect to auth service: {0}")]
    Connect(#[from] tonic::transport::Error),

    #[error("Token rejected")]
    InvalidToken,

    #[error("Token cannot be sent as metadata")]
    UnsendableToken,

    #[error("Auth service call failed: {0}")]
    Call(tonic::Status),
}

/// Verifies tokens by asking the auth service over gRPC.
#[derive(Clone)]
pub struct IntrospectionClient {
    client: UserServiceClient<Channel>,
}

impl IntrospectionClient {
    pub async fn connect(url: &str) -> Result<Self, IntrospectionError> {
        let client = UserServiceClient::connect(url.to_string()).await?;
        Ok(Self { client })
    }

    pub fn from_channel(channel: Channel) -> Self {
        Self {
            client: UserServiceClient::new(channel),
        }
    }

    pub async fn check_token(&self, token: &str) -> Result<Identity, IntrospectionError> {
        let value: MetadataValue<Ascii> = format!("{}{}", BEARER_PREFIX, token)
            .parse()
            .map_err(|_| IntrospectionError::UnsendableToken)?;

        let mut request = tonic::Request::new(TokenRequest {});
        request.metadata_mut().insert(AUTHORIZATION_METADATA, value);
        request.set_timeout(INTROSPECTION_TIMEOUT);

        let mut client = self.client.clone();
        let user = client
            .check_token(request)
            .await
            .map_err(|status| match status.code() {
                Code::Unauthenticated => IntrospectionError::InvalidToken,
                _ => IntrospectionError::Call(status),
            })?
            .into_inner();

        Ok(Identity::new(user.id, user.email, user.role))
    }
}
