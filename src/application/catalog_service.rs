use uuid::Uuid;

use crate::domain::cart::{Cart, Product};
use crate::domain::customer::Customer;
use crate::domain::errors::DomainError;
use crate::domain::ports::{CartRepository, CustomerRepository, ProductRepository, UnitOfWork};

/// A cart together with its owner, for read-only projections.
#[derive(Debug, Clone, PartialEq)]
pub struct CartDetails {
    pub cart: Cart,
    pub customer: Customer,
}

/// Read side for products and carts. Nothing here mutates state.
pub struct CatalogService<U> {
    uow: U,
}

impl<U: UnitOfWork> CatalogService<U> {
    pub fn new(uow: U) -> Self {
        Self { uow }
    }

    pub fn list_products(&self) -> Result<Vec<Product>, DomainError> {
        self.uow.transaction(|store| ProductRepository::list_all(store))
    }

    pub fn get_cart(&self, id: Uuid) -> Result<Option<CartDetails>, DomainError> {
        self.uow.transaction(|store| {
            let Some(cart) = CartRepository::find_by_id(&mut *store, id)? else {
                return Ok(None);
            };
            let customer = CustomerRepository::find_by_id(&mut *store, cart.customer_id)?
                .ok_or_else(|| {
                    DomainError::Internal(format!(
                        "cart {} references missing customer {}",
                        cart.id, cart.customer_id
                    ))
                })?;
            Ok(Some(CartDetails { cart, customer }))
        })
    }
}
