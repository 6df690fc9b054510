pub mod cart_store;
pub mod checkout;
pub mod filter;
pub mod persistence;
