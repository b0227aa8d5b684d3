use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::user::models::NewUser;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::UserError;

/// Process-local user store.
///
/// Backs tests and database-less local runs. Ids are assigned sequentially
/// from 1 and never reused.
#[derive(Default)]
pub struct InMemoryUserRepository {
    state: RwLock<State>,
}

#[derive(Default)]
struct State {
    users: BTreeMap<i64, User>,
    last_id: i64,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, user: NewUser) -> Result<User, UserError> {
        let mut state = self.state.write().await;

        if state.users.values().any(|u| u.email == user.email) {
            return Err(UserError::EmailAlreadyExists(user.email.to_string()));
        }

        state.last_id += 1;
        let user = user.with_id(UserId(state.last_id));
        state.users.insert(user.id.0, user.clone());

        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        Ok(self.state.read().await.users.get(&id.0).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        Ok(self
            .state
            .read()
            .await
            .users
            .values()
            .find(|u| u.email.as_str() == email)
            .cloned())
    }

    async fn list_all(&self) -> Result<Vec<User>, UserError> {
        Ok(self.state.read().await.users.values().cloned().collect())
    }

    async fn update_password(&self, id: &UserId, password_hash: &str) -> Result<(), UserError> {
        let mut state = self.state.write().await;

        let user = state
            .users
            .get_mut(&id.0)
            .ok_or_else(|| UserError::NotFound(id.to_string()))?;
        user.password_hash = password_hash.to_string();

        Ok(())
    }

    async fn delete(&self, id: &UserId) -> Result<(), UserError> {
        self.state
            .write()
            .await
            .users
            .remove(&id.0)
            .map(|_| ())
            .ok_or_else(|| UserError::NotFound(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::user::models::EmailAddress;
    use crate::domain::user::models::Role;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            name: "Alice".to_string(),
            email: EmailAddress::new(email.to_string()).unwrap(),
            password_hash: "$argon2id$hash".to_string(),
            role: Role::default(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_insert_assigns_sequential_ids() {
        let repository = InMemoryUserRepository::new();

        let first = repository.insert(new_user("a@b.com")).await.unwrap();
        let second = repository.insert(new_user("c@d.com")).await.unwrap();

        assert_eq!(first.id, UserId(1));
        assert_eq!(second.id, UserId(2));
        assert_eq!(repository.list_all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_insert_duplicate_email() {
        let repository = InMemoryUserRepository::new();

        repository.insert(new_user("a@b.com")).await.unwrap();
        let result = repository.insert(new_user("a@b.com")).await;

        assert!(matches!(result, Err(UserError::EmailAlreadyExists(_))));
    }

    #[tokio::test]
    async fn test_find_update_delete() {
        let repository = InMemoryUserRepository::new();
        let user = repository.insert(new_user("a@b.com")).await.unwrap();

        let found = repository.find_by_email("a@b.com").await.unwrap().unwrap();
        assert_eq!(found.id, user.id);
        assert!(repository.find_by_email("x@y.com").await.unwrap().is_none());

        repository
            .update_password(&user.id, "$argon2id$other")
            .await
            .unwrap();
        let found = repository.find_by_id(&user.id).await.unwrap().unwrap();
        assert_eq!(found.password_hash, "$argon2id$other");

        repository.delete(&user.id).await.unwrap();
        assert!(repository.find_by_id(&user.id).await.unwrap().is_none());
        assert!(matches!(
            repository.delete(&user.id).await,
            Err(UserError::NotFound(_))
        ));
        assert!(matches!(
            repository.update_password(&user.id, "x").await,
            Err(UserError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_ids_not_reused_after_delete() {
        let repository = InMemoryUserRepository::new();

        let first = repository.insert(new_user("a@b.com")).await.unwrap();
        repository.delete(&first.id).await.unwrap();
        let second = repository.insert(new_user("a@b.com")).await.unwrap();

        assert_eq!(second.id, UserId(2));
    }
}
