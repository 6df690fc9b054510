use crate::config::{
    DEFAULT_CATALOG_ENDPOINT, DEFAULT_STORE_DIR, DEFAULT_TIMEOUT_SECONDS, MAX_TIMEOUT_SECONDS,
};
use crate::core::filter::ALL_ITEMS;
use crate::domain::ports::{CatalogSource, ConfigProvider};
use crate::utils::error::{CartError, Result};
use crate::utils::validation::{validate_file_extension, validate_path, validate_range, validate_url, Validate};
use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "cafe-cart")]
#[command(about = "Browse the café menu and manage an order cart")]
pub struct CliConfig {
    #[arg(long, global = true, help = "Read catalog and storage settings from a TOML file")]
    pub config: Option<String>,

    #[arg(long, global = true)]
    pub catalog_url: Option<String>,

    #[arg(long, global = true)]
    pub catalog_file: Option<String>,

    #[arg(long, global = true, default_value = DEFAULT_STORE_DIR)]
    pub store_dir: String,

    #[arg(long, global = true, default_value_t = DEFAULT_TIMEOUT_SECONDS)]
    pub timeout_seconds: u64,

    #[arg(long, short, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON")]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List menu items, optionally limited to one category
    Menu {
        #[arg(long, default_value = ALL_ITEMS)]
        category: String,
    },
    /// List the menu categories
    Categories,
    /// Search item names and descriptions
    Search {
        query: String,
        #[arg(long, default_value = ALL_ITEMS)]
        category: String,
    },
    /// Add one unit of an item to the cart
    Add { id: String },
    /// Remove one unit of an item from the cart
    Remove { id: String },
    /// Show the cart
    Cart,
    /// Hand the cart to the payment stage
    Checkout,
}

impl ConfigProvider for CliConfig {
    fn catalog_source(&self) -> CatalogSource {
        match (&self.catalog_file, &self.catalog_url) {
            (Some(path), _) => CatalogSource::File { path: path.clone() },
            (None, Some(endpoint)) => CatalogSource::Http {
                endpoint: endpoint.clone(),
            },
            (None, None) => CatalogSource::Http {
                endpoint: DEFAULT_CATALOG_ENDPOINT.to_string(),
            },
        }
    }

    fn store_dir(&self) -> &str {
        &self.store_dir
    }

    fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if self.catalog_file.is_some() && self.catalog_url.is_some() {
            return Err(CartError::ConfigError {
                message: "--catalog-file and --catalog-url cannot be used together".to_string(),
            });
        }

        match self.catalog_source() {
            CatalogSource::Http { endpoint } => validate_url("catalog_url", &endpoint)?,
            CatalogSource::File { path } => {
                validate_path("catalog_file", &path)?;
                validate_file_extension("catalog_file", &path, &["json"])?;
            }
        }

        validate_path("store_dir", &self.store_dir)?;
        validate_range("timeout_seconds", self.timeout_seconds, 1, MAX_TIMEOUT_SECONDS)
    }
}
