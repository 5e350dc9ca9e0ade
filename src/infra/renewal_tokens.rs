use async_trait::async_trait;
use redis::{Script, aio::ConnectionManager};
use time::OffsetDateTime;
use uuid::Uuid;

use super::InfraError;
use crate::{
    app_error::{AppError, AppResult},
    domain::entities::renewal_record::RenewalRecord,
    use_cases::renewal::RenewalTokenRepo,
};

const TOKEN_KEY_PREFIX: &str = "renewal:";
const USER_KEY_PREFIX: &str = "renewal:user:";

/// Stores the record and points the user at it, dropping whatever token the
/// user pointed at before.
/// KEYS: token key, user key. ARGV: user id, ttl secs, token key prefix, token hash.
const INSERT_SCRIPT: &str = r#"
local previous = redis.call('GET', KEYS[2])
if previous then
    redis.call('DEL', ARGV[3] .. previous)
end
redis.call('SET', KEYS[1], ARGV[1], 'EX', ARGV[2])
redis.call('SET', KEYS[2], ARGV[4], 'EX', ARGV[2])
return 1
"#;

/// Reads and deletes the token key in one step; clears the user pointer if it
/// still names this token. Returns the owner or nil.
/// KEYS: token key. ARGV: user key prefix, token hash.
const TAKE_SCRIPT: &str = r#"
local owner = redis.call('GET', KEYS[1])
if not owner then
    return false
end
redis.call('DEL', KEYS[1])
local user_key = ARGV[1] .. owner
if redis.call('GET', user_key) == ARGV[2] then
    redis.call('DEL', user_key)
end
return owner
"#;

/// Redis-backed renewal token store. Expiry is enforced by key TTLs.
#[derive(Clone)]
pub struct RedisRenewalTokenStore {
    manager: ConnectionManager,
    insert: Script,
    take: Script,
}

impl RedisRenewalTokenStore {
    pub async fn new(redis_url: &str) -> Result<Self, InfraError> {
        let client = redis::Client::open(redis_url).map_err(InfraError::RedisConnection)?;
        let manager = ConnectionManager::new(client)
            .await
            .map_err(InfraError::RedisConnection)?;
        Ok(Self {
            manager,
            insert: Script::new(INSERT_SCRIPT),
            take: Script::new(TAKE_SCRIPT),
        })
    }

    fn token_key(token_hash: &str) -> String {
        format!("{TOKEN_KEY_PREFIX}{token_hash}")
    }

    fn user_key(user_id: Uuid) -> String {
        format!("{USER_KEY_PREFIX}{user_id}")
    }
}

#[async_trait]
impl RenewalTokenRepo for RedisRenewalTokenStore {
    async fn insert(&self, record: &RenewalRecord) -> AppResult<()> {
        let ttl = ttl_secs(record, OffsetDateTime::now_utc())?;

        let mut conn = self.manager.clone();
        let _: i64 = self
            .insert
            .key(Self::token_key(&record.token_hash))
            .key(Self::user_key(record.user_id))
            .arg(record.user_id.to_string())
            .arg(ttl)
            .arg(TOKEN_KEY_PREFIX)
            .arg(&record.token_hash)
            .invoke_async(&mut conn)
            .await?;

        Ok(())
    }

    async fn take_live(&self, token_hash: &str, _now: OffsetDateTime) -> AppResult<Option<Uuid>> {
        let mut conn = self.manager.clone();
        let owner: Option<String> = self
            .take
            .key(Self::token_key(token_hash))
            .arg(USER_KEY_PREFIX)
            .arg(token_hash)
            .invoke_async(&mut conn)
            .await?;

        owner
            .map(|value| Uuid::parse_str(&value).map_err(|e| AppError::Internal(e.to_string())))
            .transpose()
    }
}

/// Seconds the record has left. An already expired record is refused so it
/// is never reported as stored.
fn ttl_secs(record: &RenewalRecord, now: OffsetDateTime) -> AppResult<i64> {
    let ttl = (record.expires_at - now).whole_seconds();
    if ttl <= 0 {
        return Err(AppError::Internal(
            "renewal record expired before it was stored".into(),
        ));
    }
    Ok(ttl)
}

impl From<redis::RedisError> for AppError {
    fn from(err: redis::RedisError) -> Self {
        tracing::error!(error = %err, "Redis error");
        AppError::StoreUnavailable("Renewal store operation failed".into())
    }
}
