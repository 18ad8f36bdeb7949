//! Shopper identity and session persistence.
//!
//! A [`SessionContext`] is the live state a storefront surface works
//! against: the signed-in [`Session`] (token plus [`AuthUser`]) and the
//! [`cart::CartSession`]. The durable half round-trips through a
//! [`SessionStore`] keyed by [`SessionId`], with an in-memory store for
//! tests and a Redis store for deployments. Signing out drops only the auth
//! half; the cart keeps its lines.

pub mod context;
pub mod error;
pub mod identity;
pub mod memory;
pub mod redis;
pub mod store;

pub use context::{Session, SessionContext, SessionRecord};
pub use error::{Result, SessionStoreError};
pub use identity::{Address, AuthUser, UserRole};
pub use memory::InMemorySessionStore;
pub use store::{SessionId, SessionStore};

pub use crate::redis::RedisSessionStore;
