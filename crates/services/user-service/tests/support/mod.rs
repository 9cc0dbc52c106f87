//! In-memory backends shared by the integration tests.
//!
//! The store enforces login uniqueness the way the database constraint
//! does, and both fakes count calls so tests can tell where a read was
//! served from.

#![allow(dead_code)]

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;

use common::{AppError, AppResult};
use domain::{PasswordPolicy, User, UserData, UserId};
use user_service_lib::cache::UserCache;
use user_service_lib::repository::UserRepository;
use user_service_lib::routes::create_router;
use user_service_lib::service::UserManager;
use user_service_lib::state::AppState;

// =============================================================================
// Record Store
// =============================================================================

#[derive(Default)]
struct Rows {
    next_id: UserId,
    users: BTreeMap<UserId, User>,
}

/// Store fake with a unique login constraint.
#[derive(Default)]
pub struct InMemoryStore {
    rows: Mutex<Rows>,
    pub inserts: AtomicUsize,
    pub finds: AtomicUsize,
    pub updates: AtomicUsize,
}

impl InMemoryStore {
    pub fn find_count(&self) -> usize {
        self.finds.load(Ordering::SeqCst)
    }

    pub fn insert_count(&self) -> usize {
        self.inserts.load(Ordering::SeqCst)
    }

    /// Stored credential for a user, bypassing the service.
    pub fn stored_password(&self, id: UserId) -> Option<String> {
        let rows = self.rows.lock().unwrap();
        rows.users.get(&id).map(|u| u.password.clone())
    }

    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().users.len()
    }
}

fn to_user(id: UserId, data: UserData) -> User {
    User {
        id,
        first_name: data.first_name,
        last_name: data.last_name,
        birthday: data.birthday,
        login: data.login,
        password: data.password.into_string(),
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn insert(&self, data: UserData) -> AppResult<UserId> {
        self.inserts.fetch_add(1, Ordering::SeqCst);
        let mut rows = self.rows.lock().unwrap();

        if rows.users.values().any(|u| u.login == data.login) {
            return Err(AppError::DuplicateLogin);
        }

        rows.next_id += 1;
        let id = rows.next_id;
        rows.users.insert(id, to_user(id, data));
        Ok(id)
    }

    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>> {
        self.finds.fetch_add(1, Ordering::SeqCst);
        let rows = self.rows.lock().unwrap();
        Ok(rows.users.get(&id).cloned())
    }

    async fn update_by_id(&self, id: UserId, data: UserData) -> AppResult<u64> {
        self.updates.fetch_add(1, Ordering::SeqCst);
        let mut rows = self.rows.lock().unwrap();

        if rows
            .users
            .values()
            .any(|u| u.id != id && u.login == data.login)
        {
            return Err(AppError::DuplicateLogin);
        }

        if !rows.users.contains_key(&id) {
            return Ok(0);
        }
        rows.users.insert(id, to_user(id, data));
        Ok(1)
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}

// =============================================================================
// Cache
// =============================================================================

/// Cache fake that can be switched into a failing state.
#[derive(Default)]
pub struct InMemoryCache {
    entries: Mutex<HashMap<UserId, User>>,
    failing: AtomicBool,
}

impl InMemoryCache {
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn contains(&self, id: UserId) -> bool {
        self.entries.lock().unwrap().contains_key(&id)
    }

    pub fn snapshot(&self, id: UserId) -> Option<User> {
        self.entries.lock().unwrap().get(&id).cloned()
    }

    fn check(&self) -> AppResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(AppError::cache_unavailable("connection refused"));
        }
        Ok(())
    }
}

#[async_trait]
impl UserCache for InMemoryCache {
    async fn put(&self, user: &User) -> AppResult<()> {
        self.check()?;
        self.entries.lock().unwrap().insert(user.id, user.clone());
        Ok(())
    }

    async fn get(&self, id: UserId) -> AppResult<Option<User>> {
        self.check()?;
        Ok(self.entries.lock().unwrap().get(&id).cloned())
    }

    async fn delete(&self, id: UserId) -> AppResult<()> {
        self.check()?;
        self.entries.lock().unwrap().remove(&id);
        Ok(())
    }

    async fn ping(&self) -> AppResult<()> {
        self.check()
    }
}

// =============================================================================
// Wiring
// =============================================================================

pub struct TestApp {
    pub store: Arc<InMemoryStore>,
    pub cache: Arc<InMemoryCache>,
    pub service: Arc<UserManager>,
}

impl TestApp {
    pub fn new() -> Self {
        let store = Arc::new(InMemoryStore::default());
        let cache = Arc::new(InMemoryCache::default());
        let service = Arc::new(UserManager::new(
            store.clone(),
            cache.clone(),
            PasswordPolicy::default(),
        ));
        Self {
            store,
            cache,
            service,
        }
    }

    pub fn router(&self) -> Router {
        let state = AppState::new(self.service.clone(), self.store.clone(), self.cache.clone());
        create_router(state)
    }
}
