//! Application routes the core needs to name.

use serde::{Deserialize, Serialize};

/// The storefront routes that checkout and session logic redirect to.
///
/// The core never navigates itself; it hands one of these back to the
/// embedder, which owns routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Route {
    /// The shopping cart page.
    Cart,

    /// The sign-in page.
    SignIn,

    /// The account/profile page (delivery address lives here).
    Account,

    /// The customer's order history.
    Orders,

    /// The product listing page.
    Products,
}

impl Route {
    /// Returns the route's URL path.
    pub fn as_path(&self) -> &'static str {
        match self {
            Route::Cart => "/cart",
            Route::SignIn => "/login",
            Route::Account => "/account",
            Route::Orders => "/orders",
            Route::Products => "/products",
        }
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_path())
    }
}
