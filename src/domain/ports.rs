use crate::domain::model::{CartSummary, MenuItem};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Durable key-value store shared by every view. Reads must observe the
/// process's own earlier writes; a single `set` is never observed half-done.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn delete(&self, key: &str) -> Result<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &T {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn delete(&self, key: &str) -> Result<()> {
        (**self).delete(key)
    }
}

#[async_trait]
pub trait MenuCatalog: Send + Sync {
    async fn fetch_items(&self) -> Result<Vec<MenuItem>>;
}

/// The external payment step. Receiving the summary is the "navigate to
/// payment" signal; the stage must not mutate the cart.
pub trait PaymentStage: Send + Sync {
    fn begin_payment(&self, summary: &CartSummary) -> Result<()>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    Http { endpoint: String },
    File { path: String },
}

pub trait ConfigProvider: Send + Sync {
    fn catalog_source(&self) -> CatalogSource;
    fn store_dir(&self) -> &str;
    fn timeout_seconds(&self) -> u64;
}
