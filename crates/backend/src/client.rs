//! HTTP client for the storefront backend.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use catalog::{ProductFilter, ProductSnapshot};
use checkout::{
    CheckoutError, CheckoutSession, Order, OrderItemRequest, OrdersGateway, VerifyPaymentRequest,
};
use common::ProductId;
use serde::Serialize;
use serde::de::DeserializeOwned;
use session::{AuthUser, Session};

use crate::config::BackendConfig;
use crate::error::{BackendError, Result};
use crate::wire::{
    AuthResponse, CheckoutResponse, CreateCheckoutRequest, ErrorBody, LoginRequest, MeResponse,
    OrderDto, OrderItemDto, OrderResponse, OrdersResponse, ProductDto, ProductResponse,
    ProductsResponse, VerifyRequest,
};

/// Client for the storefront's JSON API.
///
/// Holds the bearer token behind a lock so clones share one sign-in:
/// the checkout flow and the page-level callers all talk through the
/// same authenticated client.
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
    token: Arc<RwLock<Option<String>>>,
}

impl BackendClient {
    /// Create a client from the given configuration.
    pub fn new(config: BackendConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: Arc::new(RwLock::new(config.token)),
        }
    }

    /// Store a bearer token for subsequent requests.
    pub fn set_token(&self, token: impl Into<String>) {
        *self.token.write().unwrap() = Some(token.into());
    }

    /// Drop the stored bearer token.
    pub fn clear_token(&self) {
        *self.token.write().unwrap() = None;
    }

    pub(crate) fn bearer(&self) -> Option<String> {
        self.token.read().unwrap().clone()
    }

    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let mut request = self.http.get(self.endpoint(path));
        if let Some(token) = self.bearer() {
            request = request.bearer_auth(token);
        }
        Self::read_response(request.send().await?).await
    }

    async fn get_json_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let mut request = self.http.get(self.endpoint(path)).query(query);
        if let Some(token) = self.bearer() {
            request = request.bearer_auth(token);
        }
        Self::read_response(request.send().await?).await
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let mut request = self.http.post(self.endpoint(path)).json(body);
        if let Some(token) = self.bearer() {
            request = request.bearer_auth(token);
        }
        Self::read_response(request.send().await?).await
    }

    /// Non-2xx responses carry an optional `message` field; fall back to a
    /// generic line when the body is empty or not JSON.
    async fn read_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }

        let message = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.message)
            .unwrap_or_else(|| "Request failed".to_string());
        tracing::warn!(status = status.as_u16(), %message, "backend rejected request");

        Err(BackendError::Rejected {
            status: status.as_u16(),
            message,
        })
    }

    /// Sign in and keep the returned token on this client.
    #[tracing::instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<Session> {
        let response: AuthResponse = self
            .post_json("/auth/login", &LoginRequest { email, password })
            .await?;
        self.set_token(response.token.clone());
        Ok(Session {
            token: response.token,
            user: response.user.into_user(),
        })
    }

    /// Fetch the profile for the stored token.
    pub async fn me(&self) -> Result<AuthUser> {
        let response: MeResponse = self.get_json("/auth/me").await?;
        Ok(response.user.into_user())
    }

    /// List products matching the filter.
    pub async fn products(&self, filter: &ProductFilter) -> Result<Vec<ProductSnapshot>> {
        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(search) = &filter.search {
            query.push(("search", search.clone()));
        }
        if let Some(category) = filter.category {
            query.push(("category", category.as_str().to_string()));
        }
        if let Some(sub_category) = &filter.sub_category {
            query.push(("subCategory", sub_category.clone()));
        }
        if let Some(seller) = &filter.seller {
            query.push(("seller", seller.to_string()));
        }

        let response: ProductsResponse = self.get_json_with_query("/products", &query).await?;
        Ok(response
            .products
            .into_iter()
            .map(ProductDto::into_snapshot)
            .collect())
    }

    /// Fetch a single product.
    pub async fn product(&self, id: &ProductId) -> Result<ProductSnapshot> {
        let response: ProductResponse = self.get_json(&format!("/products/{id}")).await?;
        Ok(response.product.into_snapshot())
    }

    /// List the signed-in shopper's orders, newest first per the backend.
    pub async fn my_orders(&self) -> Result<Vec<Order>> {
        let response: OrdersResponse = self.get_json("/orders").await?;
        Ok(response.orders.into_iter().map(OrderDto::into_order).collect())
    }
}

/// The shopper sees the backend's rejection text verbatim; transport
/// failures surface as their own description.
fn rejection_message(err: BackendError) -> String {
    match err {
        BackendError::Rejected { message, .. } => message,
        other => other.to_string(),
    }
}

#[async_trait]
impl OrdersGateway for BackendClient {
    async fn create_checkout(
        &self,
        items: Vec<OrderItemRequest>,
    ) -> checkout::Result<CheckoutSession> {
        let request = CreateCheckoutRequest {
            items: items
                .into_iter()
                .map(|item| OrderItemDto {
                    product_id: item.product_id.to_string(),
                    quantity: item.quantity,
                })
                .collect(),
        };

        let response: CheckoutResponse = self
            .post_json("/payments/razorpay/order", &request)
            .await
            .map_err(|err| CheckoutError::OrderRejected(rejection_message(err)))?;

        Ok(CheckoutSession {
            order: response.order.into_order(),
            widget_order: response.razorpay_order.into_widget_order(),
            key_id: response.key_id,
        })
    }

    async fn verify_payment(&self, request: VerifyPaymentRequest) -> checkout::Result<Order> {
        let body = VerifyRequest {
            order_id: request.order_id.to_string(),
            razorpay_order_id: request.widget_order_id,
            razorpay_payment_id: request.widget_payment_id,
            razorpay_signature: request.widget_signature,
        };

        let response: OrderResponse = self
            .post_json("/payments/razorpay/verify", &body)
            .await
            .map_err(|err| CheckoutError::VerificationRejected(rejection_message(err)))?;

        Ok(response.order.into_order())
    }
}
