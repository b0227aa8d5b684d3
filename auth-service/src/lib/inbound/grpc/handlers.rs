use auth::Identity;

use crate::domain::user::models::User;
use crate::proto::UserResponse;

pub mod check_token;
pub mod get_user;

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.0,
            email: user.email.as_str().to_string(),
            role: user.role.as_str().to_string(),
            name: user.name,
        }
    }
}

impl From<Identity> for UserResponse {
    fn from(identity: Identity) -> Self {
        Self {
            id: identity.id,
            email: identity.email,
            role: identity.role,
            name: String::new(),
        }
    }
}
