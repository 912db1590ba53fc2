use uuid::Uuid;

use super::cart::{Cart, Product};
use super::customer::{Customer, CustomerAddress};
use super::errors::DomainError;
use super::order::{ListResult, NewOrder, Order};

// Repositories are bound to a single open transaction, hence `&mut self`.

pub trait CartRepository {
    fn find_by_id(&mut self, id: Uuid) -> Result<Option<Cart>, DomainError>;

    /// Persist the cart's mutable state if `cart.version` still matches the
    /// stored version, bumping the stored version on success. A stale version
    /// is reported as `InvalidState(ConcurrentCheckout)`.
    fn save(&mut self, cart: &Cart) -> Result<(), DomainError>;
}

pub trait AddressRepository {
    fn find_by_id(&mut self, id: Uuid) -> Result<Option<CustomerAddress>, DomainError>;
}

pub trait OrderRepository {
    /// Persist a new order. The store assigns the identifier.
    fn save(&mut self, order: NewOrder) -> Result<Order, DomainError>;
    fn find_by_id(&mut self, id: Uuid) -> Result<Option<Order>, DomainError>;
    fn list(&mut self, page: i64, limit: i64) -> Result<ListResult, DomainError>;
}

pub trait ProductRepository {
    fn list_all(&mut self) -> Result<Vec<Product>, DomainError>;
}

pub trait CustomerRepository {
    /// Customer together with all of their addresses.
    fn find_by_id(&mut self, id: Uuid) -> Result<Option<Customer>, DomainError>;
}

/// Every port, served from the same transaction.
pub trait Store:
    CartRepository + AddressRepository + OrderRepository + ProductRepository + CustomerRepository
{
}

impl<T> Store for T where
    T: CartRepository
        + AddressRepository
        + OrderRepository
        + ProductRepository
        + CustomerRepository
{
}

/// Runs work against a [`Store`] inside one transaction: committed when the
/// work returns `Ok`, rolled back when it returns `Err`.
pub trait UnitOfWork: Send + Sync + 'static {
    fn transaction<T, F>(&self, work: F) -> Result<T, DomainError>
    where
        F: FnOnce(&mut dyn Store) -> Result<T, DomainError>;
}

impl<U: UnitOfWork> UnitOfWork for std::sync::Arc<U> {
    fn transaction<T, F>(&self, work: F) -> Result<T, DomainError>
    where
        F: FnOnce(&mut dyn Store) -> Result<T, DomainError>,
    {
        (**self).transaction(work)
    }
}
