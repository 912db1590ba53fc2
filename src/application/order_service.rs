use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::order::{ListResult, Order};
use crate::domain::ports::{OrderRepository, UnitOfWork};

pub struct OrderService<U> {
    uow: U,
}

impl<U: UnitOfWork> OrderService<U> {
    pub fn new(uow: U) -> Self {
        Self { uow }
    }

    pub fn get_order(&self, id: Uuid) -> Result<Option<Order>, DomainError> {
        self.uow
            .transaction(|store| OrderRepository::find_by_id(store, id))
    }

    /// `page` is 1-based and raised to 1; `limit` is clamped to `1..=100`.
    /// The returned `ListResult` carries the values actually used.
    pub fn list_orders(&self, page: i64, limit: i64) -> Result<ListResult, DomainError> {
        let page = page.max(1);
        let limit = limit.clamp(1, 100);
        self.uow
            .transaction(|store| OrderRepository::list(store, page, limit))
    }
}
