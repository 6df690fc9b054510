pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command};
pub use config::TomlConfig;

pub use adapters::{
    catalog::{FileCatalog, HttpCatalog, StaticCatalog},
    payment::ConsolePaymentStage,
    storage::{FileStore, MemoryStore},
};
pub use crate::core::{
    cart_store::CartStore,
    checkout::{CheckoutHandoff, Handoff},
    filter::{ItemFilter, ALL_ITEMS},
    persistence::CartPersistence,
};
pub use domain::model::{Cart, CartLine, CartSummary, MenuItem};
pub use utils::error::{CartError, Result};
