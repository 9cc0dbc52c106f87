//! User service - Cache-aside access to user records.
//!
//! Reads populate the cache on a miss; successful updates invalidate it.
//! Creation never touches the cache.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use common::{AppError, AppResult};
use domain::{PasswordPolicy, User, UserDraft, UserId};

use crate::cache::UserCache;
use crate::repository::UserRepository;

/// Result of a create request that passed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateOutcome {
    Created(UserId),
    /// Another record already holds the login
    LoginTaken,
}

/// Result of an update request that passed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    Updated,
    LoginTaken,
}

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Validate and persist a new user
    async fn create_user(&self, draft: UserDraft) -> AppResult<CreateOutcome>;

    /// Get a user with the credential masked
    async fn get_user(&self, id: UserId) -> AppResult<Option<User>>;

    /// Validate and replace every field of an existing user
    async fn update_user(&self, id: UserId, draft: UserDraft) -> AppResult<UpdateOutcome>;
}

/// Concrete implementation of UserService over a store and a cache.
pub struct UserManager {
    repo: Arc<dyn UserRepository>,
    cache: Arc<dyn UserCache>,
    policy: PasswordPolicy,
}

impl UserManager {
    /// Create new user service instance
    pub fn new(
        repo: Arc<dyn UserRepository>,
        cache: Arc<dyn UserCache>,
        policy: PasswordPolicy,
    ) -> Self {
        Self {
            repo,
            cache,
            policy,
        }
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn create_user(&self, draft: UserDraft) -> AppResult<CreateOutcome> {
        let data = draft.validate(&self.policy)?;

        match self.repo.insert(data).await {
            Ok(id) => Ok(CreateOutcome::Created(id)),
            Err(AppError::DuplicateLogin) => Ok(CreateOutcome::LoginTaken),
            Err(e) => Err(e),
        }
    }

    async fn get_user(&self, id: UserId) -> AppResult<Option<User>> {
        // A failing first lookup is a hard error
        if let Some(user) = self.cache.get(id).await? {
            return Ok(Some(user));
        }

        let Some(user) = self.repo.find_by_id(id).await? else {
            return Ok(None);
        };

        let user = user.masked();
        if let Err(e) = self.cache.put(&user).await {
            warn!(user_id = id, error = %e, "Failed to populate cache");
        }

        Ok(Some(user))
    }

    async fn update_user(&self, id: UserId, draft: UserDraft) -> AppResult<UpdateOutcome> {
        let data = draft.validate(&self.policy)?;

        let rows = match self.repo.update_by_id(id, data).await {
            Ok(rows) => rows,
            Err(AppError::DuplicateLogin) => return Ok(UpdateOutcome::LoginTaken),
            Err(e) => return Err(e),
        };

        if rows == 0 {
            debug!(user_id = id, "Update matched no rows");
        }

        if let Err(e) = self.cache.delete(id).await {
            warn!(user_id = id, error = %e, "Failed to invalidate cache");
        }

        Ok(UpdateOutcome::Updated)
    }
}
