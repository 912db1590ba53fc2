//! In-memory store used by unit tests. Counts every repository call so tests
//! can assert which collaborators a failed checkout never reached.

use std::collections::HashMap;
use std::sync::Mutex;

use uuid::Uuid;

use crate::domain::cart::{Cart, Product};
use crate::domain::customer::{Customer, CustomerAddress};
use crate::domain::errors::{DomainError, Resource, StateViolation};
use crate::domain::order::{ListResult, NewOrder, Order, OrderSummary};
use crate::domain::ports::{
    AddressRepository, CartRepository, CustomerRepository, OrderRepository, ProductRepository,
    Store, UnitOfWork,
};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Calls {
    pub cart_finds: usize,
    pub cart_saves: usize,
    pub address_finds: usize,
    pub order_saves: usize,
}

#[derive(Debug, Default, Clone)]
pub struct InMemoryStore {
    pub carts: HashMap<Uuid, Cart>,
    pub addresses: Vec<CustomerAddress>,
    pub customers: Vec<Customer>,
    pub products: Vec<Product>,
    pub orders: Vec<Order>,
    pub calls: Calls,
    /// Simulates another checkout committing right after the cart is read.
    pub race_on_cart_read: bool,
}

impl CartRepository for InMemoryStore {
    fn find_by_id(&mut self, id: Uuid) -> Result<Option<Cart>, DomainError> {
        self.calls.cart_finds += 1;
        let found = self.carts.get(&id).cloned();
        if self.race_on_cart_read {
            if let Some(stored) = self.carts.get_mut(&id) {
                stored.checked_out = true;
                stored.version += 1;
            }
        }
        Ok(found)
    }

    fn save(&mut self, cart: &Cart) -> Result<(), DomainError> {
        self.calls.cart_saves += 1;
        let stored = self
            .carts
            .get_mut(&cart.id)
            .ok_or(DomainError::NotFound(Resource::Cart(cart.id)))?;
        if stored.version != cart.version {
            return Err(DomainError::InvalidState(StateViolation::ConcurrentCheckout(
                cart.id,
            )));
        }
        *stored = Cart {
            version: cart.version + 1,
            ..cart.clone()
        };
        Ok(())
    }
}

impl AddressRepository for InMemoryStore {
    fn find_by_id(&mut self, id: Uuid) -> Result<Option<CustomerAddress>, DomainError> {
        self.calls.address_finds += 1;
        Ok(self.addresses.iter().find(|a| a.id == id).cloned())
    }
}

impl OrderRepository for InMemoryStore {
    fn save(&mut self, order: NewOrder) -> Result<Order, DomainError> {
        self.calls.order_saves += 1;
        if self.orders.iter().any(|o| o.cart_id == order.cart_id) {
            return Err(DomainError::InvalidState(StateViolation::ConcurrentCheckout(
                order.cart_id,
            )));
        }
        let order = order.into_order(Uuid::new_v4());
        self.orders.push(order.clone());
        Ok(order)
    }

    fn find_by_id(&mut self, id: Uuid) -> Result<Option<Order>, DomainError> {
        Ok(self.orders.iter().find(|o| o.id == id).cloned())
    }

    fn list(&mut self, page: i64, limit: i64) -> Result<ListResult, DomainError> {
        let mut sorted = self.orders.clone();
        sorted.sort_by(|a, b| (b.order_date, b.id).cmp(&(a.order_date, a.id)));
        let offset = usize::try_from((page - 1).saturating_mul(limit)).unwrap_or(usize::MAX);
        Ok(ListResult {
            total: sorted.len() as i64,
            page,
            limit,
            items: sorted
                .into_iter()
                .skip(offset)
                .take(limit as usize)
                .map(|o| OrderSummary {
                    id: o.id,
                    cart_id: o.cart_id,
                    customer_id: o.customer_id,
                    shipping_method: o.shipping_method,
                    payment_method: o.payment_method,
                    order_date: o.order_date,
                    total: o.total,
                })
                .collect(),
        })
    }
}

impl ProductRepository for InMemoryStore {
    fn list_all(&mut self) -> Result<Vec<Product>, DomainError> {
        let mut products = self.products.clone();
        products.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(products)
    }
}

impl CustomerRepository for InMemoryStore {
    fn find_by_id(&mut self, id: Uuid) -> Result<Option<Customer>, DomainError> {
        Ok(self.customers.iter().find(|c| c.id == id).map(|c| Customer {
            addresses: self
                .addresses
                .iter()
                .filter(|a| a.customer_id == c.id)
                .cloned()
                .collect(),
            ..c.clone()
        }))
    }
}

/// Snapshot transactions: work runs on a copy that replaces the state only
/// when it succeeds. Call counters survive a rollback.
#[derive(Debug, Default)]
pub struct InMemoryUnitOfWork {
    state: Mutex<InMemoryStore>,
}

impl InMemoryUnitOfWork {
    pub fn new(store: InMemoryStore) -> Self {
        Self {
            state: Mutex::new(store),
        }
    }

    pub fn snapshot(&self) -> InMemoryStore {
        self.state.lock().expect("store lock poisoned").clone()
    }
}

impl UnitOfWork for InMemoryUnitOfWork {
    fn transaction<T, F>(&self, work: F) -> Result<T, DomainError>
    where
        F: FnOnce(&mut dyn Store) -> Result<T, DomainError>,
    {
        let mut state = self.state.lock().expect("store lock poisoned");
        let mut working = state.clone();
        let result = work(&mut working);
        if result.is_ok() {
            *state = working;
        } else {
            state.calls = working.calls;
        }
        result
    }
}

pub mod fixtures {
    use std::str::FromStr;

    use bigdecimal::BigDecimal;
    use uuid::Uuid;

    use super::InMemoryStore;
    use crate::domain::cart::{Cart, CartItem, Product};
    use crate::domain::customer::{Customer, CustomerAddress};

    pub struct Seeded {
        pub customer_id: Uuid,
        pub address_id: Uuid,
        pub cart_id: Uuid,
    }

    pub fn product(name: &str, price: &str) -> Product {
        Product {
            id: Uuid::new_v4(),
            name: name.to_string(),
            price: BigDecimal::from_str(price).expect("valid decimal"),
        }
    }

    pub fn address(customer_id: Uuid) -> CustomerAddress {
        CustomerAddress {
            id: Uuid::new_v4(),
            customer_id,
            street: "Main St".to_string(),
            city: "Springfield".to_string(),
            state: "IL".to_string(),
            zip_code: "12345".to_string(),
        }
    }

    /// One customer with one address and an open cart holding
    /// `Product 1` (10.99 x 2) and `Product 2` (5.50 x 3).
    pub fn seeded() -> (InMemoryStore, Seeded) {
        let customer = Customer {
            id: Uuid::new_v4(),
            name: "John Doe".to_string(),
            email: "john@example.com".to_string(),
            addresses: vec![],
        };
        let address = address(customer.id);
        let p1 = product("Product 1", "10.99");
        let p2 = product("Product 2", "5.50");
        let cart = Cart {
            id: Uuid::new_v4(),
            customer_id: customer.id,
            items: vec![
                CartItem {
                    product: p1.clone(),
                    quantity: 2,
                },
                CartItem {
                    product: p2.clone(),
                    quantity: 3,
                },
            ],
            checked_out: false,
            version: 0,
        };

        let seeded = Seeded {
            customer_id: customer.id,
            address_id: address.id,
            cart_id: cart.id,
        };

        let mut store = InMemoryStore::default();
        store.carts.insert(cart.id, cart);
        store.addresses.push(address);
        store.customers.push(customer);
        store.products = vec![p2, p1];
        (store, seeded)
    }
}
