//! User repository backed by the relational store.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use sea_orm::{
    ActiveValue::NotSet, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, Set, SqlErr, Statement,
};

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use common::{AppError, AppResult};
use domain::{User, UserData, UserId};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
///
/// Uniqueness of the login is enforced by the store itself; a write that
/// would break it fails with [`AppError::DuplicateLogin`].
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a new user and return the store-assigned id
    async fn insert(&self, data: UserData) -> AppResult<UserId>;

    /// Fetch a user by id. The returned credential is the stored hash.
    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>>;

    /// Overwrite every field of the user, returning the number of rows touched
    async fn update_by_id(&self, id: UserId, data: UserData) -> AppResult<u64>;

    /// Connectivity check for the health endpoint
    async fn ping(&self) -> AppResult<()>;
}

/// Concrete implementation of UserRepository over SeaORM.
pub struct UserStore {
    db: DatabaseConnection,
    timeout: Duration,
}

impl UserStore {
    /// Create new repository instance with a per-call deadline
    pub fn new(db: DatabaseConnection, timeout: Duration) -> Self {
        Self { db, timeout }
    }

    /// Run a store call under the configured deadline.
    async fn bounded<T, F>(&self, op: &'static str, fut: F) -> AppResult<T>
    where
        F: Future<Output = Result<T, DbErr>> + Send,
    {
        match tokio::time::timeout(self.timeout, fut).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(err)) => Err(classify(err)),
            Err(_) => Err(AppError::store_unavailable(format!(
                "{} timed out after {:?}",
                op, self.timeout
            ))),
        }
    }
}

/// Map a store error onto the application taxonomy.
fn classify(err: DbErr) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => AppError::DuplicateLogin,
        _ => AppError::from(err),
    }
}

fn to_active_model(data: UserData) -> ActiveModel {
    ActiveModel {
        id: NotSet,
        first_name: Set(data.first_name),
        last_name: Set(data.last_name),
        birthday: Set(data.birthday),
        login: Set(data.login),
        password: Set(data.password.into_string()),
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn insert(&self, data: UserData) -> AppResult<UserId> {
        let active = to_active_model(data);
        let result = self
            .bounded("insert", UserEntity::insert(active).exec(&self.db))
            .await?;

        tracing::debug!(id = result.last_insert_id, "Inserted user");
        UserId::try_from(result.last_insert_id)
            .map_err(|_| AppError::internal("Store returned a negative user id"))
    }

    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>> {
        // Ids beyond the BIGSERIAL range can never have been assigned
        let Ok(key) = i64::try_from(id) else {
            return Ok(None);
        };

        let model = self
            .bounded("find_by_id", UserEntity::find_by_id(key).one(&self.db))
            .await?;

        Ok(model.map(User::from))
    }

    async fn update_by_id(&self, id: UserId, data: UserData) -> AppResult<u64> {
        let Ok(key) = i64::try_from(id) else {
            return Ok(0);
        };

        let result = self
            .bounded(
                "update_by_id",
                UserEntity::update_many()
                    .set(to_active_model(data))
                    .filter(user::Column::Id.eq(key))
                    .exec(&self.db),
            )
            .await?;

        Ok(result.rows_affected)
    }

    async fn ping(&self) -> AppResult<()> {
        let backend = self.db.get_database_backend();
        self.bounded(
            "ping",
            self.db
                .execute(Statement::from_string(backend, "SELECT 1".to_string())),
        )
        .await?;
        Ok(())
    }
}
