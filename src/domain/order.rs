use std::fmt;
use std::str::FromStr;

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::cart::CartItem;
use super::customer::CustomerAddress;
use super::errors::DomainError;

/// Caller-selected shipping method. Recorded on the order, never interpreted.
///
/// `as_str` is the one table of wire names; serde, `FromStr` and the
/// database column all go through it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
#[non_exhaustive]
pub enum ShippingMethod {
    Standard,
    Express,
    CorreiosPac,
    CorreiosSedex,
}

impl ShippingMethod {
    pub const ALL: [ShippingMethod; 4] = [
        ShippingMethod::Standard,
        ShippingMethod::Express,
        ShippingMethod::CorreiosPac,
        ShippingMethod::CorreiosSedex,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ShippingMethod::Standard => "STANDARD",
            ShippingMethod::Express => "EXPRESS",
            ShippingMethod::CorreiosPac => "CORREIOS_PAC",
            ShippingMethod::CorreiosSedex => "CORREIOS_SEDEX",
        }
    }
}

impl fmt::Display for ShippingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShippingMethod {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| DomainError::InvalidInput(format!("unknown shipping method '{}'", s)))
    }
}

impl TryFrom<String> for ShippingMethod {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<ShippingMethod> for &'static str {
    fn from(m: ShippingMethod) -> Self {
        m.as_str()
    }
}

/// Caller-selected payment method. Recorded on the order, never executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
#[non_exhaustive]
pub enum PaymentMethod {
    CreditCard,
    DebitCard,
    Pix,
    Boleto,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 4] = [
        PaymentMethod::CreditCard,
        PaymentMethod::DebitCard,
        PaymentMethod::Pix,
        PaymentMethod::Boleto,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::CreditCard => "CREDIT_CARD",
            PaymentMethod::DebitCard => "DEBIT_CARD",
            PaymentMethod::Pix => "PIX",
            PaymentMethod::Boleto => "BOLETO",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| DomainError::InvalidInput(format!("unknown payment method '{}'", s)))
    }
}

impl TryFrom<String> for PaymentMethod {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<PaymentMethod> for &'static str {
    fn from(m: PaymentMethod) -> Self {
        m.as_str()
    }
}

/// Frozen copy of a cart line. Later catalog edits do not reach it.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderItem {
    pub product_name: String,
    pub quantity: i32,
    pub unit_price: BigDecimal,
}

impl OrderItem {
    pub fn snapshot(item: &CartItem) -> Self {
        Self {
            product_name: item.product.name.clone(),
            quantity: item.quantity,
            unit_price: item.product.price.clone(),
        }
    }

    pub fn subtotal(&self) -> BigDecimal {
        &self.unit_price * &BigDecimal::from(self.quantity)
    }
}

/// Snapshot every cart line, keeping the cart's order.
pub fn snapshot_items(items: &[CartItem]) -> Vec<OrderItem> {
    items.iter().map(OrderItem::snapshot).collect()
}

/// Exact decimal sum of `unit_price * quantity`. Zero for no items.
pub fn order_total(items: &[OrderItem]) -> BigDecimal {
    items
        .iter()
        .fold(BigDecimal::from(0), |acc, item| acc + item.subtotal())
}

/// An order assembled by checkout that the store has not assigned an id to yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub cart_id: Uuid,
    pub customer_id: Uuid,
    pub shipping_address: CustomerAddress,
    pub shipping_method: ShippingMethod,
    pub payment_method: PaymentMethod,
    pub order_date: DateTime<Utc>,
    pub items: Vec<OrderItem>,
    pub total: BigDecimal,
}

impl NewOrder {
    pub fn into_order(self, id: Uuid) -> Order {
        Order {
            id,
            cart_id: self.cart_id,
            customer_id: self.customer_id,
            shipping_address: self.shipping_address,
            shipping_method: self.shipping_method,
            payment_method: self.payment_method,
            order_date: self.order_date,
            items: self.items,
            total: self.total,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: Uuid,
    pub cart_id: Uuid,
    pub customer_id: Uuid,
    pub shipping_address: CustomerAddress,
    pub shipping_method: ShippingMethod,
    pub payment_method: PaymentMethod,
    pub order_date: DateTime<Utc>,
    pub items: Vec<OrderItem>,
    pub total: BigDecimal,
}

/// Order header without its items, as returned by listings.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderSummary {
    pub id: Uuid,
    pub cart_id: Uuid,
    pub customer_id: Uuid,
    pub shipping_method: ShippingMethod,
    pub payment_method: PaymentMethod,
    pub order_date: DateTime<Utc>,
    pub total: BigDecimal,
}

#[derive(Debug, Clone)]
pub struct ListResult {
    pub items: Vec<OrderSummary>,
    pub total: i64,
    /// The page and limit the listing was taken with.
    pub page: i64,
    pub limit: i64,
}
