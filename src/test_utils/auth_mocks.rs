//! In-memory mock implementations for the auth repository traits.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{
    app_error::{AppError, AppResult},
    application::use_cases::{
        credentials::{PasswordVerifier, UserRepo},
        renewal::RenewalTokenRepo,
    },
    domain::entities::{renewal_record::RenewalRecord, user::UserRecord},
};

// ============================================================================
// InMemoryUserRepo
// ============================================================================

/// In-memory implementation of UserRepo for testing.
#[derive(Default)]
pub struct InMemoryUserRepo {
    pub users: Mutex<HashMap<Uuid, UserRecord>>,
}

impl InMemoryUserRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_users(users: Vec<UserRecord>) -> Self {
        let map: HashMap<Uuid, UserRecord> = users.into_iter().map(|u| (u.id, u)).collect();
        Self {
            users: Mutex::new(map),
        }
    }

    pub fn set_roles(&self, id: Uuid, roles: Vec<String>) {
        if let Some(user) = self.users.lock().unwrap().get_mut(&id) {
            user.roles = roles;
        }
    }

    pub fn remove(&self, id: Uuid) {
        self.users.lock().unwrap().remove(&id);
    }
}

#[async_trait]
impl UserRepo for InMemoryUserRepo {
    async fn find_by_username(&self, username: &str) -> AppResult<Option<UserRecord>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<UserRecord>> {
        Ok(self.users.lock().unwrap().get(&id).cloned())
    }
}

/// User store that is always down.
pub struct FailingUserRepo;

#[async_trait]
impl UserRepo for FailingUserRepo {
    async fn find_by_username(&self, _username: &str) -> AppResult<Option<UserRecord>> {
        Err(AppError::StoreUnavailable("user store offline".into()))
    }

    async fn find_by_id(&self, _id: Uuid) -> AppResult<Option<UserRecord>> {
        Err(AppError::StoreUnavailable("user store offline".into()))
    }
}

// ============================================================================
// InMemoryRenewalTokenRepo
// ============================================================================

struct StoredRenewal {
    record: RenewalRecord,
    invalidated: bool,
}

/// In-memory implementation of RenewalTokenRepo for testing.
///
/// A single mutex guards lookup and invalidation, so `take_live` is atomic.
#[derive(Default)]
pub struct InMemoryRenewalTokenRepo {
    records: Mutex<HashMap<String, StoredRenewal>>,
}

impl InMemoryRenewalTokenRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records ever stored, live or not.
    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    pub fn live_count(&self, user_id: Uuid, now: OffsetDateTime) -> usize {
        self.records
            .lock()
            .unwrap()
            .values()
            .filter(|s| s.record.user_id == user_id && !s.invalidated && s.record.is_live_at(now))
            .count()
    }
}

#[async_trait]
impl RenewalTokenRepo for InMemoryRenewalTokenRepo {
    async fn insert(&self, record: &RenewalRecord) -> AppResult<()> {
        let mut records = self.records.lock().unwrap();
        for stored in records
            .values_mut()
            .filter(|s| s.record.user_id == record.user_id)
        {
            stored.invalidated = true;
        }
        records.insert(
            record.token_hash.clone(),
            StoredRenewal {
                record: record.clone(),
                invalidated: false,
            },
        );
        Ok(())
    }

    async fn take_live(&self, token_hash: &str, now: OffsetDateTime) -> AppResult<Option<Uuid>> {
        let mut records = self.records.lock().unwrap();
        match records.get_mut(token_hash) {
            Some(stored) if !stored.invalidated && stored.record.is_live_at(now) => {
                stored.invalidated = true;
                Ok(Some(stored.record.user_id))
            }
            _ => Ok(None),
        }
    }
}

/// Renewal store that accepts lookups but cannot persist.
pub struct FailingRenewalTokenRepo;

#[async_trait]
impl RenewalTokenRepo for FailingRenewalTokenRepo {
    async fn insert(&self, _record: &RenewalRecord) -> AppResult<()> {
        Err(AppError::StoreUnavailable("renewal store offline".into()))
    }

    async fn take_live(&self, _token_hash: &str, _now: OffsetDateTime) -> AppResult<Option<Uuid>> {
        Ok(None)
    }
}

// ============================================================================
// PlainPasswordVerifier
// ============================================================================

/// Fast stand-in for Argon2: hashes are `plain:<password>`.
#[derive(Default)]
pub struct PlainPasswordVerifier {
    calls: AtomicUsize,
}

impl PlainPasswordVerifier {
    pub fn hash(password: &str) -> String {
        format!("plain:{password}")
    }

    /// Number of comparisons performed, including dummy ones.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PasswordVerifier for PlainPasswordVerifier {
    async fn verify(&self, password: &str, password_hash: Option<&str>) -> AppResult<bool> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(match password_hash {
            Some(hash) => hash == Self::hash(password),
            None => false,
        })
    }
}
