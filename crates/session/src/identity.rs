//! Who the shopper is, as reported by the backend.

use common::UserId;
use serde::{Deserialize, Serialize};

/// Account role. Sellers and admins browse the same storefront but unlock
/// their own dashboards elsewhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Seller,
    Customer,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::Seller => "seller",
            UserRole::Customer => "customer",
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A postal address. Every field is optional because accounts start with no
/// address at all and fill it in piecemeal from the account page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub line1: Option<String>,
    pub line2: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
}

impl Address {
    /// An address can take a delivery once it has a non-empty first line and
    /// a non-empty city. The remaining fields are nice to have.
    pub fn is_deliverable(&self) -> bool {
        self.line1.as_deref().is_some_and(|l| !l.is_empty())
            && self.city.as_deref().is_some_and(|c| !c.is_empty())
    }
}

/// The signed-in account as the backend describes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub store_name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<Address>,
}

impl AuthUser {
    /// Whether checkout can ship to this account without a detour through
    /// the account page.
    pub fn has_delivery_address(&self) -> bool {
        self.address.as_ref().is_some_and(Address::is_deliverable)
    }
}
