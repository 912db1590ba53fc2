use uuid::Uuid;

/// Shipping destination. Street, city, state and zip code are opaque here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerAddress {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub addresses: Vec<CustomerAddress>,
}
