use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::Result;
use crate::context::SessionRecord;

/// Opaque key a session record is stored under. One per browser/device.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generates a fresh random session id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for SessionId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for SessionId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Where session records live between visits.
///
/// A record holds the signed-in session (if any) and the cart, so a shopper
/// keeps both across page loads. Implementations must treat a missing record
/// as a normal outcome, not an error.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Loads the record stored under `id`, or `None` if there is none.
    async fn load(&self, id: &SessionId) -> Result<Option<SessionRecord>>;

    /// Saves the record under `id`, replacing any previous record.
    async fn save(&self, id: &SessionId, record: &SessionRecord) -> Result<()>;

    /// Removes the record stored under `id`, if any.
    async fn clear(&self, id: &SessionId) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_unique() {
        assert_ne!(SessionId::generate(), SessionId::generate());
    }

    #[test]
    fn session_id_serializes_as_plain_string() {
        let id = SessionId::new("abc-123");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"abc-123\"");
        assert_eq!(id.to_string(), "abc-123");
    }
}
