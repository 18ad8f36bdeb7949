use cart::{Cart, CartSession};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Result;
use crate::identity::AuthUser;
use crate::store::{SessionId, SessionStore};

/// A signed-in session: the bearer token and the account it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: AuthUser,
}

/// What gets persisted between visits: the signed-in session, if any, and
/// the cart. Signing out drops the auth half but the cart stays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub auth: Option<Session>,
    pub cart: Cart,
    pub saved_at: DateTime<Utc>,
}

impl SessionRecord {
    pub fn new(auth: Option<Session>, cart: Cart) -> Self {
        Self {
            auth,
            cart,
            saved_at: Utc::now(),
        }
    }
}

/// The live state a storefront surface works against: who is signed in and
/// what is in the cart, plus the cart's transient animation state.
///
/// Only the durable half (auth and cart lines) round-trips through a
/// [`SessionStore`]; flights and the badge timer start fresh each visit.
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    pub auth: Option<Session>,
    pub cart: CartSession,
}

impl SessionContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a context from a persisted record.
    pub fn from_record(record: SessionRecord) -> Self {
        Self {
            auth: record.auth,
            cart: CartSession {
                cart: record.cart,
                ..CartSession::default()
            },
        }
    }

    /// Loads the context stored under `id`. A missing record yields a fresh
    /// signed-out context with an empty cart.
    pub async fn hydrate<S: SessionStore>(store: &S, id: &SessionId) -> Result<Self> {
        Ok(store
            .load(id)
            .await?
            .map(Self::from_record)
            .unwrap_or_default())
    }

    /// Saves the durable half of this context under `id`.
    pub async fn persist<S: SessionStore>(&self, store: &S, id: &SessionId) -> Result<()> {
        let record = SessionRecord::new(self.auth.clone(), self.cart.cart.clone());
        store.save(id, &record).await
    }

    /// Replaces the signed-in session. The cart is untouched, so whatever
    /// the shopper gathered before signing in is still there after.
    pub fn sign_in(&mut self, session: Session) {
        self.auth = Some(session);
    }

    /// Drops the signed-in session. The cart survives.
    pub fn sign_out(&mut self) {
        self.auth = None;
    }

    pub fn current_user(&self) -> Option<&AuthUser> {
        self.auth.as_ref().map(|s| &s.user)
    }

    pub fn is_authenticated(&self) -> bool {
        self.auth.is_some()
    }
}
