use std::sync::Arc;

use tonic::Status;

use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserServicePort;
use crate::proto::IdRequest;
use crate::proto::UserResponse;
use crate::user::errors::UserError;

pub async fn get_user_by_id(
    service: Arc<dyn UserServicePort>,
    request: IdRequest,
) -> Result<UserResponse, Status> {
    match service.get_user(&UserId(request.id)).await {
        Ok(user) => Ok(user.into()),
        Err(UserError::NotFound(id)) => Err(Status::not_found(format!("user {} not found", id))),
        Err(e) => {
            tracing::error!(error = %e, user_id = request.id, "gRPC user lookup failed");
            Err(Status::internal("internal error"))
        }
    }
}
