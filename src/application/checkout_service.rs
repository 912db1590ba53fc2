use crate::domain::checkout::{place_order, CheckoutRequest};
use crate::domain::errors::DomainError;
use crate::domain::order::Order;
use crate::domain::ports::UnitOfWork;

/// Runs the checkout workflow in a single transaction, so the cart flip and
/// the order insert commit together or not at all.
///
/// The shipping address is not required to belong to the cart's customer.
/// That gap is known and left to the caller's authorization layer.
pub struct CheckoutService<U> {
    uow: U,
}

impl<U: UnitOfWork> CheckoutService<U> {
    pub fn new(uow: U) -> Self {
        Self { uow }
    }

    pub fn checkout(&self, request: CheckoutRequest) -> Result<Order, DomainError> {
        match self.uow.transaction(|store| place_order(store, request)) {
            Ok(order) => {
                log::info!(
                    "Placed order {} from cart {} ({} items, total {})",
                    order.id,
                    order.cart_id,
                    order.items.len(),
                    order.total
                );
                Ok(order)
            }
            Err(DomainError::Internal(msg)) => {
                log::error!("Checkout of cart {} failed: {}", request.cart_id, msg);
                Err(DomainError::Internal(msg))
            }
            Err(e) => {
                log::warn!(
                    "Checkout of cart {} rejected ({}): {}",
                    request.cart_id,
                    e.kind(),
                    e
                );
                Err(e)
            }
        }
    }
}
