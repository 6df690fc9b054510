use crate::domain::model::CartInvariantViolation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CartError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Catalog request failed: {0}")]
    CatalogError(#[from] reqwest::Error),

    #[error("Catalog responded with status {status} from {endpoint}")]
    CatalogStatusError { endpoint: String, status: u16 },

    #[error("Store error for key '{key}': {message}")]
    StoreError { key: String, message: String },

    #[error("Invalid store key '{key}': {reason}")]
    InvalidKeyError { key: String, reason: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Item rejected: {0}")]
    InvalidItem(#[from] CartInvariantViolation),

    #[error("Checkout refused: the cart is empty")]
    EmptyCart,

    #[error("Unknown menu item: {id}")]
    UnknownItem { id: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl CartError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            CartError::EmptyCart | CartError::UnknownItem { .. } => ErrorSeverity::Low,
            CartError::CatalogError(_) | CartError::CatalogStatusError { .. } => {
                ErrorSeverity::Medium
            }
            CartError::ConfigError { .. }
            | CartError::InvalidConfigValueError { .. }
            | CartError::MissingConfigError { .. }
            | CartError::InvalidKeyError { .. }
            | CartError::InvalidItem(_)
            | CartError::SerializationError(_) => ErrorSeverity::High,
            CartError::IoError(_) | CartError::StoreError { .. } => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            CartError::EmptyCart => "Your cart is empty. Add something before checking out.".to_string(),
            CartError::UnknownItem { id } => format!("There is no menu item with id '{}'.", id),
            CartError::CatalogError(_) | CartError::CatalogStatusError { .. } => {
                "The menu could not be loaded right now.".to_string()
            }
            CartError::IoError(_) | CartError::StoreError { .. } => {
                "The cart could not be saved.".to_string()
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            CartError::EmptyCart => "Add at least one item with `add <id>`",
            CartError::UnknownItem { .. } => "Run `menu` to list the available item ids",
            CartError::CatalogError(_) | CartError::CatalogStatusError { .. } => {
                "Check that the menu service is reachable and retry"
            }
            CartError::IoError(_) | CartError::StoreError { .. } => {
                "Check that the store directory is writable"
            }
            CartError::InvalidKeyError { .. } => "Use a plain key without path separators",
            CartError::InvalidItem(_) => "Fix the item's price in the menu service",
            CartError::SerializationError(_) => "Check that the catalog contains valid JSON",
            CartError::ConfigError { .. }
            | CartError::InvalidConfigValueError { .. }
            | CartError::MissingConfigError { .. } => "Fix the configuration and run again",
        }
    }
}

pub type Result<T> = std::result::Result<T, CartError>;
