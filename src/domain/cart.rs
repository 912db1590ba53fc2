use bigdecimal::BigDecimal;
use uuid::Uuid;

/// Catalog entry as seen at the moment it was read.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub price: BigDecimal,
}

/// A line of a cart. The product is resolved once when the cart is loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct CartItem {
    pub product: Product,
    pub quantity: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Cart {
    pub id: Uuid,
    pub customer_id: Uuid,
    /// Insertion order, which is also the snapshot order.
    pub items: Vec<CartItem>,
    pub checked_out: bool,
    /// Optimistic-concurrency token. Stores reject a save whose version is stale.
    pub version: i32,
}

impl Cart {
    pub fn is_checked_out(&self) -> bool {
        self.checked_out
    }

    /// One-way transition; there is no way back to an open cart.
    pub fn mark_checked_out(&mut self) {
        self.checked_out = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mark_checked_out_is_sticky() {
        let mut cart = Cart {
            id: Uuid::new_v4(),
            customer_id: Uuid::new_v4(),
            items: vec![],
            checked_out: false,
            version: 0,
        };
        assert!(!cart.is_checked_out());

        cart.mark_checked_out();
        cart.mark_checked_out();

        assert!(cart.is_checked_out());
        assert_eq!(cart.version, 0, "version is owned by the store");
    }
}
