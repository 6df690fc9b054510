// Adapters layer: concrete implementations of the domain ports (storage, catalog, payment).

pub mod catalog;
pub mod payment;
pub mod storage;
