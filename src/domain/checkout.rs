use chrono::Utc;
use uuid::Uuid;

use super::errors::{DomainError, Resource, StateViolation};
use super::order::{order_total, snapshot_items, NewOrder, Order, PaymentMethod, ShippingMethod};
use super::ports::{AddressRepository, CartRepository, OrderRepository};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckoutRequest {
    pub cart_id: Uuid,
    pub address_id: Uuid,
    pub shipping_method: ShippingMethod,
    pub payment_method: PaymentMethod,
}

/// Turn a cart into an order.
///
/// Steps run strictly in this order and the first failure stops the rest:
///
/// 1. load the cart (`NotFound(Cart)`)
/// 2. refuse a cart that is already checked out (`InvalidState(AlreadyCheckedOut)`),
///    before the address store is touched
/// 3. load the shipping address (`NotFound(Address)`)
/// 4. snapshot every cart line and sum the total
/// 5. build the order, stamped with the current time
/// 6. flip the cart's checked-out flag and save it (`InvalidState(ConcurrentCheckout)`
///    if another checkout got there first)
/// 7. hand the order to the order store, which assigns its id
///
/// Nothing is rolled back here; callers run this inside a
/// [`UnitOfWork`](super::ports::UnitOfWork) so a failure in steps 6 or 7
/// discards both writes.
///
/// The address is not checked against the cart's customer, and quantities are
/// taken as they are.
pub fn place_order<S>(store: &mut S, request: CheckoutRequest) -> Result<Order, DomainError>
where
    S: CartRepository + AddressRepository + OrderRepository + ?Sized,
{
    let mut cart = CartRepository::find_by_id(&mut *store, request.cart_id)?
        .ok_or(DomainError::NotFound(Resource::Cart(request.cart_id)))?;

    if cart.is_checked_out() {
        return Err(DomainError::InvalidState(StateViolation::AlreadyCheckedOut(
            cart.id,
        )));
    }

    let shipping_address = AddressRepository::find_by_id(&mut *store, request.address_id)?
        .ok_or(DomainError::NotFound(Resource::Address(request.address_id)))?;

    let items = snapshot_items(&cart.items);
    let total = order_total(&items);

    let order = NewOrder {
        cart_id: cart.id,
        customer_id: cart.customer_id,
        shipping_address,
        shipping_method: request.shipping_method,
        payment_method: request.payment_method,
        order_date: Utc::now(),
        items,
        total,
    };

    cart.mark_checked_out();
    CartRepository::save(&mut *store, &cart)?;

    OrderRepository::save(&mut *store, order)
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use bigdecimal::BigDecimal;

    use super::*;
    use crate::testing::{fixtures, InMemoryStore};

    fn request(fx: &fixtures::Seeded) -> CheckoutRequest {
        CheckoutRequest {
            cart_id: fx.cart_id,
            address_id: fx.address_id,
            shipping_method: ShippingMethod::Standard,
            payment_method: PaymentMethod::CreditCard,
        }
    }

    #[test]
    fn successful_checkout_builds_and_persists_the_order() {
        let (mut store, fx) = fixtures::seeded();
        let before = Utc::now();

        let order = place_order(&mut store, request(&fx)).expect("checkout failed");

        assert_eq!(order.cart_id, fx.cart_id);
        assert_eq!(order.customer_id, fx.customer_id);
        assert_eq!(order.shipping_address.id, fx.address_id);
        assert_eq!(order.shipping_method, ShippingMethod::Standard);
        assert_eq!(order.payment_method, PaymentMethod::CreditCard);
        assert!(order.order_date >= before);
        assert!(order.order_date <= Utc::now());
        assert_eq!(order.items.len(), 2);
        assert_eq!(
            order.total,
            BigDecimal::from_str("38.48").expect("valid decimal")
        );

        assert!(store.carts[&fx.cart_id].is_checked_out());
        assert_eq!(store.orders.len(), 1);
        assert_eq!(store.orders[0].id, order.id);
        assert_eq!(store.calls.cart_finds, 1);
        assert_eq!(store.calls.address_finds, 1);
        assert_eq!(store.calls.cart_saves, 1);
        assert_eq!(store.calls.order_saves, 1);
    }

    #[test]
    fn order_items_copy_name_quantity_and_price_in_cart_order() {
        let (mut store, fx) = fixtures::seeded();
        let cart_items = store.carts[&fx.cart_id].items.clone();

        let order = place_order(
            &mut store,
            CheckoutRequest {
                shipping_method: ShippingMethod::CorreiosPac,
                payment_method: PaymentMethod::Boleto,
                ..request(&fx)
            },
        )
        .expect("checkout failed");

        for (order_item, cart_item) in order.items.iter().zip(cart_items.iter()) {
            assert_eq!(order_item.product_name, cart_item.product.name);
            assert_eq!(order_item.quantity, cart_item.quantity);
            assert_eq!(order_item.unit_price, cart_item.product.price);
        }
        assert_eq!(order.items[0].product_name, "Product 1");
        assert_eq!(order.items[1].product_name, "Product 2");
    }

    #[test]
    fn empty_cart_yields_zero_total() {
        let (mut store, fx) = fixtures::seeded();
        store
            .carts
            .get_mut(&fx.cart_id)
            .expect("seeded cart")
            .items
            .clear();

        let order = place_order(
            &mut store,
            CheckoutRequest {
                shipping_method: ShippingMethod::Express,
                payment_method: PaymentMethod::Pix,
                ..request(&fx)
            },
        )
        .expect("checkout failed");

        assert!(order.items.is_empty());
        assert_eq!(order.total, BigDecimal::from(0));
        assert!(store.carts[&fx.cart_id].is_checked_out());
    }

    #[test]
    fn missing_cart_touches_nothing_else() {
        let (mut store, fx) = fixtures::seeded();
        let unknown = Uuid::new_v4();

        let err = place_order(
            &mut store,
            CheckoutRequest {
                cart_id: unknown,
                ..request(&fx)
            },
        )
        .expect_err("checkout should fail");

        assert!(matches!(err, DomainError::NotFound(Resource::Cart(id)) if id == unknown));
        assert_eq!(store.calls.cart_finds, 1);
        assert_eq!(store.calls.address_finds, 0);
        assert_eq!(store.calls.order_saves, 0);
    }

    #[test]
    fn missing_address_consults_address_store_but_writes_nothing() {
        let (mut store, fx) = fixtures::seeded();
        let unknown = Uuid::new_v4();

        let err = place_order(
            &mut store,
            CheckoutRequest {
                address_id: unknown,
                ..request(&fx)
            },
        )
        .expect_err("checkout should fail");

        assert!(matches!(err, DomainError::NotFound(Resource::Address(id)) if id == unknown));
        assert_eq!(store.calls.address_finds, 1);
        assert_eq!(store.calls.cart_saves, 0);
        assert_eq!(store.calls.order_saves, 0);
        assert!(!store.carts[&fx.cart_id].is_checked_out());
    }

    #[test]
    fn checked_out_cart_is_rejected_before_address_lookup() {
        let (mut store, fx) = fixtures::seeded();
        store
            .carts
            .get_mut(&fx.cart_id)
            .expect("seeded cart")
            .checked_out = true;

        // Unknown address: the state guard must win over the address lookup.
        let err = place_order(
            &mut store,
            CheckoutRequest {
                address_id: Uuid::new_v4(),
                ..request(&fx)
            },
        )
        .expect_err("checkout should fail");

        assert!(matches!(
            err,
            DomainError::InvalidState(StateViolation::AlreadyCheckedOut(id)) if id == fx.cart_id
        ));
        assert_eq!(store.calls.address_finds, 0);
        assert_eq!(store.calls.order_saves, 0);
    }

    #[test]
    fn second_checkout_of_the_same_cart_fails() {
        let (mut store, fx) = fixtures::seeded();

        place_order(&mut store, request(&fx)).expect("first checkout failed");
        let err = place_order(&mut store, request(&fx)).expect_err("second checkout should fail");

        assert!(matches!(
            err,
            DomainError::InvalidState(StateViolation::AlreadyCheckedOut(_))
        ));
        assert_eq!(store.orders.len(), 1);
    }

    #[test]
    fn competing_checkout_surfaces_as_conflict() {
        let (mut store, fx) = fixtures::seeded();
        store.race_on_cart_read = true;

        let err = place_order(&mut store, request(&fx)).expect_err("checkout should lose the race");

        assert!(matches!(
            err,
            DomainError::InvalidState(StateViolation::ConcurrentCheckout(id)) if id == fx.cart_id
        ));
        assert_eq!(store.calls.order_saves, 0);
    }

    #[test]
    fn address_of_another_customer_is_accepted() {
        let (mut store, fx) = fixtures::seeded();
        let stranger = fixtures::address(Uuid::new_v4());
        let stranger_id = stranger.id;
        store.addresses.push(stranger);

        let order = place_order(
            &mut store,
            CheckoutRequest {
                address_id: stranger_id,
                ..request(&fx)
            },
        )
        .expect("checkout failed");

        assert_ne!(order.shipping_address.customer_id, order.customer_id);
    }

    #[test]
    fn works_through_a_store_trait_object() {
        let (mut store, fx) = fixtures::seeded();
        let dyn_store: &mut InMemoryStore = &mut store;
        let dyn_store: &mut dyn crate::domain::ports::Store = dyn_store;

        let order = place_order(dyn_store, request(&fx)).expect("checkout failed");
        assert_eq!(order.items.len(), 2);
    }
}
