use thiserror::Error;
use uuid::Uuid;

/// The record a lookup failed to find.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Resource {
    #[error("Cart {0}")]
    Cart(Uuid),
    #[error("Address {0}")]
    Address(Uuid),
    #[error("Order {0}")]
    Order(Uuid),
}

/// Why a cart cannot be checked out in its current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StateViolation {
    /// The cart's checked-out flag was already set when it was loaded.
    #[error("Cart {0} is already checked out")]
    AlreadyCheckedOut(Uuid),
    /// Another checkout of the same cart committed first.
    #[error("Cart {0} was checked out by a concurrent request")]
    ConcurrentCheckout(Uuid),
}

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("{0} not found")]
    NotFound(Resource),
    #[error("Invalid state: {0}")]
    InvalidState(StateViolation),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    /// Short, stable name of the error kind, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            DomainError::NotFound(Resource::Cart(_)) => "cart_not_found",
            DomainError::NotFound(Resource::Address(_)) => "address_not_found",
            DomainError::NotFound(Resource::Order(_)) => "order_not_found",
            DomainError::InvalidState(StateViolation::AlreadyCheckedOut(_)) => {
                "already_checked_out"
            }
            DomainError::InvalidState(StateViolation::ConcurrentCheckout(_)) => {
                "concurrency_conflict"
            }
            DomainError::InvalidInput(_) => "invalid_input",
            DomainError::Internal(_) => "internal",
        }
    }
}
