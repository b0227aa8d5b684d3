use std::sync::Arc;

use tonic::Request;
use tonic::Response;
use tonic::Status;

use super::handlers::check_token;
use super::handlers::get_user;
use crate::domain::user::ports::UserServicePort;
use crate::proto::user_service_server::UserService as UserServiceProto;
use crate::proto::IdRequest;
use crate::proto::TokenRequest;
use crate::proto::UserResponse;

/// Machine-to-machine face of the service.
///
/// Shares the verification path of the HTTP gate through [`UserServicePort`].
pub struct AuthGrpcService {
    service: Arc<dyn UserServicePort>,
}

impl AuthGrpcService {
    pub fn new(service: Arc<dyn UserServicePort>) -> Self {
        Self { service }
    }
}

#[tonic::async_trait]
impl UserServiceProto for AuthGrpcService {
    async fn check_token(
        &self,
        request: Request<TokenRequest>,
    ) -> Result<Response<UserResponse>, Status> {
        let response = check_token::check_token(self.service.clone(), request).await?;
        Ok(Response::new(response))
    }

    async fn get_user_by_id(
        &self,
        request: Request<IdRequest>,
    ) -> Result<Response<UserResponse>, Status> {
        let response = get_user::get_user_by_id(self.service.clone(), request.into_inner()).await?;
        Ok(Response::new(response))
    }
}
