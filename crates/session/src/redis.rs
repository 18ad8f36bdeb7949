use async_trait::async_trait;
use redis::{
    AsyncCommands, Client,
    aio::{ConnectionManager, ConnectionManagerConfig},
};

use crate::Result;
use crate::context::SessionRecord;
use crate::store::{SessionId, SessionStore};

/// Prefix for session keys so they share a Redis database politely.
pub const KEY_PREFIX: &str = "storefront:session:";

/// Sessions idle longer than this are dropped by Redis itself.
pub const DEFAULT_TTL_SECS: u64 = 7 * 24 * 60 * 60;

/// Redis-backed session store.
///
/// Records are stored as JSON strings under [`KEY_PREFIX`] with a TTL that
/// refreshes on every save, so active shoppers never expire mid-visit while
/// abandoned sessions age out on their own.
#[derive(Clone)]
pub struct RedisSessionStore {
    conn: ConnectionManager,
    ttl_secs: u64,
}

impl RedisSessionStore {
    /// Connects to Redis at `url` (e.g. `redis://127.0.0.1:6379`).
    pub async fn connect(url: &str) -> Result<Self> {
        let client = Client::open(url)?;
        let config = ConnectionManagerConfig::new().set_number_of_retries(1);
        let conn = client.get_connection_manager_with_config(config).await?;
        Ok(Self {
            conn,
            ttl_secs: DEFAULT_TTL_SECS,
        })
    }

    /// Overrides the record TTL.
    pub fn with_ttl(mut self, ttl_secs: u64) -> Self {
        self.ttl_secs = ttl_secs;
        self
    }

    fn key(id: &SessionId) -> String {
        format!("{KEY_PREFIX}{id}")
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn load(&self, id: &SessionId) -> Result<Option<SessionRecord>> {
        let raw: Option<String> = self.conn.clone().get(Self::key(id)).await?;
        Ok(raw.as_deref().map(serde_json::from_str).transpose()?)
    }

    async fn save(&self, id: &SessionId, record: &SessionRecord) -> Result<()> {
        let json = serde_json::to_string(record)?;
        let _: () = self
            .conn
            .clone()
            .set_ex(Self::key(id), json, self.ttl_secs)
            .await?;
        Ok(())
    }

    async fn clear(&self, id: &SessionId) -> Result<()> {
        let _: () = self.conn.clone().del(Self::key(id)).await?;
        Ok(())
    }
}
