use std::sync::Arc;
use tracing::info;
use uuid::Uuid;
use covoit_shared::{NewUser, User, UserPatch};

use crate::repository::UserRepository;
use crate::{CoreError, CoreResult};

#[derive(Clone)]
pub struct UserService {
    repo: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }

    pub async fn list(&self) -> CoreResult<Vec<User>> {
        Ok(self.repo.list_users().await?)
    }

    pub async fn find_by_id(&self, user_id: Uuid) -> CoreResult<User> {
        self.repo
            .find_user_by_id(user_id)
            .await?
            .ok_or_else(|| not_found(user_id.to_string()))
    }

    pub async fn find_by_email(&self, email: &str) -> CoreResult<User> {
        let email = email.trim();
        self.repo
            .find_user_by_email(email)
            .await?
            .ok_or_else(|| not_found(email.to_string()))
    }

    pub async fn create(&self, mut new_user: NewUser) -> CoreResult<User> {
        new_user.email = normalize_email(&new_user.email)?;

        let user = self.repo.create_user(&new_user).await?;
        info!("User created: {}", user.user_id);
        Ok(user)
    }

    pub async fn update(&self, user_id: Uuid, mut patch: UserPatch) -> CoreResult<User> {
        if let Some(email) = patch.email.take() {
            patch.email = Some(normalize_email(&email)?);
        }

        let user = self
            .repo
            .update_user(user_id, &patch)
            .await?
            .ok_or_else(|| not_found(user_id.to_string()))?;
        info!("User updated: {}", user_id);
        Ok(user)
    }

    pub async fn delete(&self, user_id: Uuid) -> CoreResult<()> {
        if !self.repo.delete_user(user_id).await? {
            return Err(not_found(user_id.to_string()));
        }
        info!("User deleted: {}", user_id);
        Ok(())
    }
}

fn not_found(key: String) -> CoreError {
    CoreError::NotFound { entity: "user", key }
}

/// Emails are stored and looked up without surrounding whitespace.
fn normalize_email(email: &str) -> CoreResult<String> {
    let email = email.trim();
    if email.is_empty() || !email.contains('@') {
        return Err(CoreError::ValidationError(format!("invalid email address '{}'", email)));
    }
    Ok(email.to_string())
}
