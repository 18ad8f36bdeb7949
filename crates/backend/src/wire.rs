//! Wire types for the backend's JSON API.
//!
//! The backend speaks camelCase JSON with rupee amounts as plain numbers;
//! the payment order alone is denominated in paise. This module owns every
//! rename and unit conversion so nothing else in the workspace sees them.

use catalog::{ProductSnapshot, SellerRef};
use checkout::{Order, OrderLine, OrderStatus, ShippingAddress, TrackingEntry, WidgetOrder};
use chrono::{DateTime, Utc};
use common::{Money, OrderId, ProductId, UserId};
use serde::{Deserialize, Serialize};
use session::{Address, AuthUser, UserRole};

/// Rupee amounts arrive as plain numbers, occasionally fractional.
fn rupees(value: f64) -> Money {
    Money::from_paise((value * 100.0).round() as i64)
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SellerDto {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProductDto {
    pub id: String,
    pub name: String,
    pub category: catalog::Category,
    pub sub_category: String,
    pub price: f64,
    pub original_price: Option<f64>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub images: Vec<String>,
    pub seller: SellerDto,
    #[serde(default)]
    pub stock: u32,
    #[serde(default)]
    pub rating: f32,
    #[serde(default)]
    pub review_count: u32,
    #[serde(default)]
    pub is_featured: bool,
}

impl ProductDto {
    pub(crate) fn into_snapshot(self) -> ProductSnapshot {
        ProductSnapshot {
            id: ProductId::new(self.id),
            name: self.name,
            category: self.category,
            sub_category: self.sub_category,
            price: rupees(self.price),
            original_price: self.original_price.map(rupees),
            description: self.description,
            images: self.images,
            seller: SellerRef {
                id: UserId::new(self.seller.id),
                name: self.seller.name,
            },
            stock: self.stock,
            rating: self.rating,
            review_count: self.review_count,
            is_featured: self.is_featured,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AddressDto {
    pub line1: Option<String>,
    pub line2: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
}

impl AddressDto {
    pub(crate) fn into_address(self) -> Address {
        Address {
            line1: self.line1,
            line2: self.line2,
            city: self.city,
            state: self.state,
            postal_code: self.postal_code,
            country: self.country,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UserDto {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub store_name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<AddressDto>,
}

impl UserDto {
    pub(crate) fn into_user(self) -> AuthUser {
        AuthUser {
            id: UserId::new(self.id),
            name: self.name,
            email: self.email,
            role: self.role,
            store_name: self.store_name,
            phone: self.phone,
            address: self.address.map(AddressDto::into_address),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct OrderLineDto {
    pub product: String,
    pub name: String,
    pub price: f64,
    pub quantity: u32,
    pub seller: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TrackingDto {
    pub status: String,
    pub message: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ShippingAddressDto {
    pub name: Option<String>,
    pub phone: Option<String>,
    #[serde(flatten)]
    pub address: AddressDto,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OrderDto {
    pub id: String,
    pub items: Vec<OrderLineDto>,
    pub subtotal: f64,
    pub shipping: f64,
    pub total: f64,
    pub status: OrderStatus,
    #[serde(default)]
    pub tracking: Vec<TrackingDto>,
    pub shipping_address: Option<ShippingAddressDto>,
    pub created_at: DateTime<Utc>,
}

impl OrderDto {
    pub(crate) fn into_order(self) -> Order {
        Order {
            id: OrderId::new(self.id),
            items: self
                .items
                .into_iter()
                .map(|line| OrderLine {
                    product: ProductId::new(line.product),
                    name: line.name,
                    price: rupees(line.price),
                    quantity: line.quantity,
                    seller: line.seller.map(UserId::new),
                })
                .collect(),
            subtotal: rupees(self.subtotal),
            shipping: rupees(self.shipping),
            total: rupees(self.total),
            status: self.status,
            tracking: self
                .tracking
                .into_iter()
                .map(|entry| TrackingEntry {
                    status: entry.status,
                    message: entry.message,
                    created_at: entry.created_at,
                })
                .collect(),
            shipping_address: self.shipping_address.map(|shipping| ShippingAddress {
                name: shipping.name,
                phone: shipping.phone,
                address: shipping.address.into_address(),
            }),
            created_at: self.created_at,
        }
    }
}

/// The payment order rides the wire in paise, unlike everything else.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RazorpayOrderDto {
    pub id: String,
    pub amount: i64,
    pub currency: String,
}

impl RazorpayOrderDto {
    pub(crate) fn into_widget_order(self) -> WidgetOrder {
        WidgetOrder {
            id: self.id,
            amount: Money::from_paise(self.amount),
            currency: self.currency,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AuthResponse {
    pub token: String,
    pub user: UserDto,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MeResponse {
    pub user: UserDto,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProductsResponse {
    pub products: Vec<ProductDto>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProductResponse {
    pub product: ProductDto,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OrdersResponse {
    pub orders: Vec<OrderDto>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OrderResponse {
    pub order: OrderDto,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CheckoutResponse {
    pub order: OrderDto,
    pub razorpay_order: RazorpayOrderDto,
    pub key_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OrderItemDto {
    pub product_id: String,
    pub quantity: u32,
}

#[derive(Debug, Serialize)]
pub(crate) struct CreateCheckoutRequest {
    pub items: Vec<OrderItemDto>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct VerifyRequest {
    pub order_id: String,
    pub razorpay_order_id: String,
    pub razorpay_payment_id: String,
    pub razorpay_signature: String,
}
