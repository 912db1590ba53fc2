use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::catalog_service::{CartDetails, CatalogService};
use crate::application::checkout_service::CheckoutService;
use crate::domain::cart::CartItem;
use crate::domain::checkout::CheckoutRequest;
use crate::domain::customer::Customer;
use crate::domain::errors::{DomainError, Resource};
use crate::domain::order::{PaymentMethod, ShippingMethod};
use crate::errors::AppError;
use crate::handlers::orders::{AddressResponse, OrderResponse};
use crate::infrastructure::DieselUnitOfWork;

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CheckoutBody {
    pub address_id: Uuid,
    /// STANDARD, EXPRESS, CORREIOS_PAC or CORREIOS_SEDEX
    #[schema(value_type = String, example = "STANDARD")]
    pub shipping_method: ShippingMethod,
    /// CREDIT_CARD, DEBIT_CARD, PIX or BOLETO
    #[schema(value_type = String, example = "PIX")]
    pub payment_method: PaymentMethod,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CartItemResponse {
    pub product_id: Uuid,
    pub product_name: String,
    /// Current catalog price, not a snapshot.
    pub unit_price: String,
    pub quantity: i32,
}

impl From<CartItem> for CartItemResponse {
    fn from(i: CartItem) -> Self {
        Self {
            product_id: i.product.id,
            product_name: i.product.name,
            unit_price: i.product.price.to_string(),
            quantity: i.quantity,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CustomerResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub addresses: Vec<AddressResponse>,
}

impl From<Customer> for CustomerResponse {
    fn from(c: Customer) -> Self {
        Self {
            id: c.id,
            name: c.name,
            email: c.email,
            addresses: c.addresses.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CartResponse {
    pub id: Uuid,
    pub items: Vec<CartItemResponse>,
    pub customer: CustomerResponse,
    pub checked_out: bool,
}

impl From<CartDetails> for CartResponse {
    fn from(d: CartDetails) -> Self {
        Self {
            id: d.cart.id,
            items: d.cart.items.into_iter().map(Into::into).collect(),
            customer: d.customer.into(),
            checked_out: d.cart.checked_out,
        }
    }
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// POST /carts/{cart_id}/checkout
///
/// Converts the cart into an order. The cart is flipped to checked out and
/// the order is inserted in one transaction; a cart can be checked out once.
#[utoipa::path(
    post,
    path = "/carts/{cart_id}/checkout",
    params(
        ("cart_id" = Uuid, Path, description = "Cart UUID"),
    ),
    request_body = CheckoutBody,
    responses(
        (status = 201, description = "Order placed", body = OrderResponse),
        (status = 404, description = "Cart or address not found"),
        (status = 409, description = "Cart already checked out"),
        (status = 422, description = "Malformed body or unknown method"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "carts"
)]
pub async fn checkout_cart(
    service: web::Data<CheckoutService<DieselUnitOfWork>>,
    path: web::Path<Uuid>,
    body: web::Json<CheckoutBody>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let request = CheckoutRequest {
        cart_id: path.into_inner(),
        address_id: body.address_id,
        shipping_method: body.shipping_method,
        payment_method: body.payment_method,
    };

    let order = web::block(move || service.checkout(request))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Created().json(OrderResponse::from(order)))
}

/// GET /carts/{cart_id}
///
/// Returns the cart with its current items and its owner's addresses.
#[utoipa::path(
    get,
    path = "/carts/{cart_id}",
    params(
        ("cart_id" = Uuid, Path, description = "Cart UUID"),
    ),
    responses(
        (status = 200, description = "Cart found", body = CartResponse),
        (status = 404, description = "Cart not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "carts"
)]
pub async fn get_cart(
    service: web::Data<CatalogService<DieselUnitOfWork>>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let cart_id = path.into_inner();

    let result = web::block(move || service.get_cart(cart_id))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    match result {
        Some(details) => Ok(HttpResponse::Ok().json(CartResponse::from(details))),
        None => Err(DomainError::NotFound(Resource::Cart(cart_id)).into()),
    }
}
