use chrono::Utc;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::DatabaseErrorKind;
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::cart::{Cart, CartItem, Product};
use crate::domain::customer::{Customer, CustomerAddress};
use crate::domain::errors::{DomainError, StateViolation};
use crate::domain::order::{ListResult, NewOrder, Order, OrderItem, OrderSummary};
use crate::domain::ports::{
    AddressRepository, CartRepository, CustomerRepository, OrderRepository, ProductRepository,
    Store, UnitOfWork,
};
use crate::schema::{cart_items, carts, customer_addresses, customers, order_items, orders, products};

use super::models::{
    AddressRow, CartItemRow, CartRow, CustomerRow, NewOrderRow, OrderItemRow, OrderRow, ProductRow,
};

// ── Error conversions (infrastructure concern only) ──────────────────────────

impl From<diesel::result::Error> for DomainError {
    fn from(e: diesel::result::Error) -> Self {
        DomainError::Internal(e.to_string())
    }
}

impl From<r2d2::Error> for DomainError {
    fn from(e: r2d2::Error) -> Self {
        DomainError::Internal(e.to_string())
    }
}

// ── Row mapping ──────────────────────────────────────────────────────────────

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product {
            id: row.id,
            name: row.name,
            price: row.price,
        }
    }
}

impl From<AddressRow> for CustomerAddress {
    fn from(row: AddressRow) -> Self {
        CustomerAddress {
            id: row.id,
            customer_id: row.customer_id,
            street: row.street,
            city: row.city,
            state: row.state,
            zip_code: row.zip_code,
        }
    }
}

impl From<OrderItemRow> for OrderItem {
    fn from(row: OrderItemRow) -> Self {
        OrderItem {
            product_name: row.product_name,
            quantity: row.quantity,
            unit_price: row.unit_price,
        }
    }
}

fn corrupt(e: DomainError) -> DomainError {
    DomainError::Internal(format!("stored order is corrupt: {}", e))
}

fn summary_from_row(row: OrderRow) -> Result<OrderSummary, DomainError> {
    Ok(OrderSummary {
        id: row.id,
        cart_id: row.cart_id,
        customer_id: row.customer_id,
        shipping_method: row.shipping_method.parse().map_err(corrupt)?,
        payment_method: row.payment_method.parse().map_err(corrupt)?,
        order_date: row.order_date,
        total: row.total,
    })
}

// ── Store ────────────────────────────────────────────────────────────────────

/// Every repository port, served from one PostgreSQL connection that is
/// expected to be inside an open transaction.
pub struct DieselStore<'c> {
    conn: &'c mut PgConnection,
}

impl<'c> DieselStore<'c> {
    pub fn new(conn: &'c mut PgConnection) -> Self {
        Self { conn }
    }
}

impl CartRepository for DieselStore<'_> {
    fn find_by_id(&mut self, id: Uuid) -> Result<Option<Cart>, DomainError> {
        let conn = &mut *self.conn;

        let cart = carts::table
            .find(id)
            .select(CartRow::as_select())
            .first(conn)
            .optional()?;

        let Some(cart) = cart else {
            return Ok(None);
        };

        let lines: Vec<(CartItemRow, ProductRow)> = cart_items::table
            .inner_join(products::table)
            .filter(cart_items::cart_id.eq(cart.id))
            .order(cart_items::position.asc())
            .select((CartItemRow::as_select(), ProductRow::as_select()))
            .load(conn)?;

        Ok(Some(Cart {
            id: cart.id,
            customer_id: cart.customer_id,
            items: lines
                .into_iter()
                .map(|(line, product)| CartItem {
                    product: product.into(),
                    quantity: line.quantity,
                })
                .collect(),
            checked_out: cart.checked_out,
            version: cart.version,
        }))
    }

    fn save(&mut self, cart: &Cart) -> Result<(), DomainError> {
        // Compare-and-swap on `version`: a concurrent writer that committed
        // first has already bumped it, so this update matches no row.
        let updated = diesel::update(
            carts::table
                .filter(carts::id.eq(cart.id))
                .filter(carts::version.eq(cart.version)),
        )
        .set((
            carts::checked_out.eq(cart.checked_out),
            carts::version.eq(cart.version + 1),
            carts::updated_at.eq(Utc::now()),
        ))
        .execute(&mut *self.conn)?;

        if updated == 0 {
            return Err(DomainError::InvalidState(StateViolation::ConcurrentCheckout(
                cart.id,
            )));
        }
        Ok(())
    }
}

impl AddressRepository for DieselStore<'_> {
    fn find_by_id(&mut self, id: Uuid) -> Result<Option<CustomerAddress>, DomainError> {
        let address = customer_addresses::table
            .find(id)
            .select(AddressRow::as_select())
            .first(&mut *self.conn)
            .optional()?;
        Ok(address.map(Into::into))
    }
}

impl OrderRepository for DieselStore<'_> {
    fn save(&mut self, order: NewOrder) -> Result<Order, DomainError> {
        let conn = &mut *self.conn;
        let order_id = Uuid::new_v4();

        // 1. Insert the order header. `orders.cart_id` is unique, which backs
        //    up the cart version check.
        diesel::insert_into(orders::table)
            .values(&NewOrderRow {
                id: order_id,
                cart_id: order.cart_id,
                customer_id: order.customer_id,
                shipping_address_id: order.shipping_address.id,
                shipping_method: order.shipping_method.as_str().to_string(),
                payment_method: order.payment_method.as_str().to_string(),
                order_date: order.order_date,
                total: order.total.clone(),
            })
            .execute(conn)
            .map_err(|e| match e {
                diesel::result::Error::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                    DomainError::InvalidState(StateViolation::ConcurrentCheckout(order.cart_id))
                }
                other => other.into(),
            })?;

        // 2. Insert the item snapshots, keeping their order.
        let rows: Vec<OrderItemRow> = order
            .items
            .iter()
            .enumerate()
            .map(|(position, item)| OrderItemRow {
                id: Uuid::new_v4(),
                order_id,
                position: position as i32,
                product_name: item.product_name.clone(),
                quantity: item.quantity,
                unit_price: item.unit_price.clone(),
            })
            .collect();
        if !rows.is_empty() {
            diesel::insert_into(order_items::table)
                .values(&rows)
                .execute(conn)?;
        }

        Ok(order.into_order(order_id))
    }

    fn find_by_id(&mut self, id: Uuid) -> Result<Option<Order>, DomainError> {
        let conn = &mut *self.conn;

        let found: Option<(OrderRow, AddressRow)> = orders::table
            .inner_join(customer_addresses::table)
            .filter(orders::id.eq(id))
            .select((OrderRow::as_select(), AddressRow::as_select()))
            .first(conn)
            .optional()?;

        let Some((order, address)) = found else {
            return Ok(None);
        };

        let items = order_items::table
            .filter(order_items::order_id.eq(order.id))
            .order(order_items::position.asc())
            .select(OrderItemRow::as_select())
            .load(conn)?;

        Ok(Some(Order {
            id: order.id,
            cart_id: order.cart_id,
            customer_id: order.customer_id,
            shipping_address: address.into(),
            shipping_method: order.shipping_method.parse().map_err(corrupt)?,
            payment_method: order.payment_method.parse().map_err(corrupt)?,
            order_date: order.order_date,
            items: items.into_iter().map(Into::into).collect(),
            total: order.total,
        }))
    }

    fn list(&mut self, page: i64, limit: i64) -> Result<ListResult, DomainError> {
        let conn = &mut *self.conn;
        let offset = (page - 1).saturating_mul(limit);

        let total: i64 = orders::table.count().get_result(conn)?;

        let rows = orders::table
            .select(OrderRow::as_select())
            .order((orders::order_date.desc(), orders::id.desc()))
            .limit(limit)
            .offset(offset)
            .load(conn)?;

        Ok(ListResult {
            items: rows
                .into_iter()
                .map(summary_from_row)
                .collect::<Result<Vec<_>, _>>()?,
            total,
            page,
            limit,
        })
    }
}

impl ProductRepository for DieselStore<'_> {
    fn list_all(&mut self) -> Result<Vec<Product>, DomainError> {
        let rows = products::table
            .select(ProductRow::as_select())
            .order(products::name.asc())
            .load(&mut *self.conn)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }
}

impl CustomerRepository for DieselStore<'_> {
    fn find_by_id(&mut self, id: Uuid) -> Result<Option<Customer>, DomainError> {
        let conn = &mut *self.conn;

        let customer = customers::table
            .find(id)
            .select(CustomerRow::as_select())
            .first(conn)
            .optional()?;

        let Some(customer) = customer else {
            return Ok(None);
        };

        let addresses = customer_addresses::table
            .filter(customer_addresses::customer_id.eq(customer.id))
            .order(customer_addresses::street.asc())
            .select(AddressRow::as_select())
            .load(conn)?;

        Ok(Some(Customer {
            id: customer.id,
            name: customer.name,
            email: customer.email,
            addresses: addresses.into_iter().map(Into::into).collect(),
        }))
    }
}

// ── Unit of work ─────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DieselUnitOfWork {
    pool: DbPool,
}

impl DieselUnitOfWork {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl UnitOfWork for DieselUnitOfWork {
    fn transaction<T, F>(&self, work: F) -> Result<T, DomainError>
    where
        F: FnOnce(&mut dyn Store) -> Result<T, DomainError>,
    {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            let mut store = DieselStore::new(conn);
            work(&mut store)
        })
    }
}
