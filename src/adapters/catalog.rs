use crate::domain::model::MenuItem;
use crate::domain::ports::{CatalogSource, MenuCatalog};
use crate::utils::error::{CartError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::collections::HashSet;
use std::path::PathBuf;
use std::time::Duration;

/// Drops items the cart cannot hold (negative or non-finite price) and
/// repeated ids, keeping catalog order.
pub fn sanitize_items(items: Vec<MenuItem>) -> Vec<MenuItem> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| {
            if !item.price.is_finite() || item.price < 0.0 {
                tracing::warn!("Skipping menu item {} with invalid price {}", item.id, item.price);
                return false;
            }
            if !seen.insert(item.id.clone()) {
                tracing::warn!("Skipping duplicate menu item {}", item.id);
                return false;
            }
            true
        })
        .collect()
}

/// Fetches the menu as a JSON array from an HTTP endpoint.
pub struct HttpCatalog {
    endpoint: String,
    client: Client,
}

impl HttpCatalog {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            endpoint: endpoint.into(),
            client,
        })
    }
}

#[async_trait]
impl MenuCatalog for HttpCatalog {
    async fn fetch_items(&self) -> Result<Vec<MenuItem>> {
        tracing::debug!("Fetching menu from: {}", self.endpoint);
        let response = self.client.get(&self.endpoint).send().await?;

        tracing::debug!("Menu response status: {}", response.status());
        if !response.status().is_success() {
            return Err(CartError::CatalogStatusError {
                endpoint: self.endpoint.clone(),
                status: response.status().as_u16(),
            });
        }

        let items: Vec<MenuItem> = response.json().await?;
        Ok(sanitize_items(items))
    }
}

/// Reads the menu from a JSON file holding an array of items.
pub struct FileCatalog {
    path: PathBuf,
}

impl FileCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl MenuCatalog for FileCatalog {
    async fn fetch_items(&self) -> Result<Vec<MenuItem>> {
        tracing::debug!("Reading menu from: {}", self.path.display());
        let content = tokio::fs::read_to_string(&self.path).await?;
        let items: Vec<MenuItem> = serde_json::from_str(&content)?;
        Ok(sanitize_items(items))
    }
}

/// Fixed in-memory menu.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    items: Vec<MenuItem>,
}

impl StaticCatalog {
    pub fn new(items: Vec<MenuItem>) -> Self {
        Self {
            items: sanitize_items(items),
        }
    }
}

#[async_trait]
impl MenuCatalog for StaticCatalog {
    async fn fetch_items(&self) -> Result<Vec<MenuItem>> {
        Ok(self.items.clone())
    }
}

pub fn catalog_from_source(source: &CatalogSource, timeout: Duration) -> Result<Box<dyn MenuCatalog>> {
    match source {
        CatalogSource::Http { endpoint } => Ok(Box::new(HttpCatalog::new(endpoint.clone(), timeout)?)),
        CatalogSource::File { path } => Ok(Box::new(FileCatalog::new(path))),
    }
}
