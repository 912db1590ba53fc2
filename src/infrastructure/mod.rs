pub mod diesel_store;
pub mod models;

pub use diesel_store::{DieselStore, DieselUnitOfWork};
