use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::order_service::OrderService;
use crate::domain::customer::CustomerAddress;
use crate::domain::errors::{DomainError, Resource};
use crate::domain::order::{Order, OrderItem, OrderSummary};
use crate::errors::AppError;
use crate::infrastructure::DieselUnitOfWork;

// ── Response DTOs ────────────────────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AddressResponse {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
}

impl From<CustomerAddress> for AddressResponse {
    fn from(a: CustomerAddress) -> Self {
        Self {
            id: a.id,
            customer_id: a.customer_id,
            street: a.street,
            city: a.city,
            state: a.state,
            zip_code: a.zip_code,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OrderItemResponse {
    pub product_name: String,
    pub quantity: i32,
    /// Decimal price as a string to avoid floating-point issues, e.g. "9.99"
    pub unit_price: String,
}

impl From<OrderItem> for OrderItemResponse {
    fn from(i: OrderItem) -> Self {
        Self {
            product_name: i.product_name,
            quantity: i.quantity,
            unit_price: i.unit_price.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OrderResponse {
    pub id: Uuid,
    pub cart_id: Uuid,
    pub customer_id: Uuid,
    pub shipping_address: AddressResponse,
    pub shipping_method: String,
    pub payment_method: String,
    pub order_date: String,
    pub items: Vec<OrderItemResponse>,
    pub total: String,
}

impl From<Order> for OrderResponse {
    fn from(o: Order) -> Self {
        Self {
            id: o.id,
            cart_id: o.cart_id,
            customer_id: o.customer_id,
            shipping_address: o.shipping_address.into(),
            shipping_method: o.shipping_method.to_string(),
            payment_method: o.payment_method.to_string(),
            order_date: o.order_date.to_rfc3339(),
            items: o.items.into_iter().map(Into::into).collect(),
            total: o.total.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OrderSummaryResponse {
    pub id: Uuid,
    pub cart_id: Uuid,
    pub customer_id: Uuid,
    pub shipping_method: String,
    pub payment_method: String,
    pub order_date: String,
    pub total: String,
}

impl From<OrderSummary> for OrderSummaryResponse {
    fn from(o: OrderSummary) -> Self {
        Self {
            id: o.id,
            cart_id: o.cart_id,
            customer_id: o.customer_id,
            shipping_method: o.shipping_method.to_string(),
            payment_method: o.payment_method.to_string(),
            order_date: o.order_date.to_rfc3339(),
            total: o.total.to_string(),
        }
    }
}

// ── Pagination ───────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
pub struct ListOrdersParams {
    /// Page number (1-based). Defaults to 1.
    #[serde(default = "default_page")]
    pub page: i64,
    /// Number of items per page. Defaults to 20, maximum 100.
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_page() -> i64 {
    1
}

fn default_limit() -> i64 {
    20
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ListOrdersResponse {
    pub items: Vec<OrderSummaryResponse>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// GET /orders/{id}
///
/// Returns the order together with its item snapshots.
#[utoipa::path(
    get,
    path = "/orders/{id}",
    params(
        ("id" = Uuid, Path, description = "Order UUID"),
    ),
    responses(
        (status = 200, description = "Order found", body = OrderResponse),
        (status = 404, description = "Order not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn get_order(
    service: web::Data<OrderService<DieselUnitOfWork>>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let order_id = path.into_inner();

    let result = web::block(move || service.get_order(order_id))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    match result {
        Some(order) => Ok(HttpResponse::Ok().json(OrderResponse::from(order))),
        None => Err(DomainError::NotFound(Resource::Order(order_id)).into()),
    }
}

/// GET /orders
///
/// Returns a paginated list of orders (without their items), newest first.
/// Use `page` (1-based) and `limit` to control pagination.
#[utoipa::path(
    get,
    path = "/orders",
    params(
        ("page" = Option<i64>, Query, description = "Page number (1-based, default 1)"),
        ("limit" = Option<i64>, Query, description = "Items per page (default 20, max 100)"),
    ),
    responses(
        (status = 200, description = "Paginated list of orders", body = ListOrdersResponse),
        (status = 422, description = "Malformed query string"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn list_orders(
    service: web::Data<OrderService<DieselUnitOfWork>>,
    query: web::Query<ListOrdersParams>,
) -> Result<HttpResponse, AppError> {
    let params = query.into_inner();

    let result = web::block(move || service.list_orders(params.page, params.limit))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(ListOrdersResponse {
        items: result.items.into_iter().map(Into::into).collect(),
        total: result.total,
        page: result.page,
        limit: result.limit,
    }))
}
