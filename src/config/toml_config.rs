use crate::config::{DEFAULT_CATALOG_ENDPOINT, DEFAULT_STORE_DIR, DEFAULT_TIMEOUT_SECONDS, MAX_TIMEOUT_SECONDS};
use crate::domain::ports::{CatalogSource, ConfigProvider};
use crate::utils::error::{CartError, Result};
use crate::utils::validation::{
    validate_file_extension, validate_path, validate_range, validate_required_field, validate_url, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub catalog: CatalogConfig,
    pub storage: Option<StorageConfig>,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// "http" or "file"
    pub source: String,
    pub endpoint: Option<String>,
    pub path: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub dir: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub verbose: Option<bool>,
    pub json: Option<bool>,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(CartError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| CartError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| CartError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        match self.catalog.source.as_str() {
            "http" => {
                let endpoint = validate_required_field("catalog.endpoint", &self.catalog.endpoint)?;
                validate_url("catalog.endpoint", endpoint)?;
            }
            "file" => {
                let path = validate_required_field("catalog.path", &self.catalog.path)?;
                validate_path("catalog.path", path)?;
                validate_file_extension("catalog.path", path, &["json"])?;
            }
            other => {
                return Err(CartError::InvalidConfigValueError {
                    field: "catalog.source".to_string(),
                    value: other.to_string(),
                    reason: "Unsupported source. Valid sources: http, file".to_string(),
                });
            }
        }

        if let Some(storage) = &self.storage {
            validate_path("storage.dir", &storage.dir)?;
        }

        validate_range(
            "catalog.timeout_seconds",
            self.timeout_seconds(),
            1,
            MAX_TIMEOUT_SECONDS,
        )
    }

    pub fn verbose(&self) -> bool {
        self.logging
            .as_ref()
            .and_then(|l| l.verbose)
            .unwrap_or(false)
    }

    pub fn json_logs(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn catalog_source(&self) -> CatalogSource {
        match (self.catalog.source.as_str(), &self.catalog.path) {
            ("file", Some(path)) => CatalogSource::File { path: path.clone() },
            _ => CatalogSource::Http {
                endpoint: self
                    .catalog
                    .endpoint
                    .clone()
                    .unwrap_or_else(|| DEFAULT_CATALOG_ENDPOINT.to_string()),
            },
        }
    }

    fn store_dir(&self) -> &str {
        self.storage
            .as_ref()
            .map(|s| s.dir.as_str())
            .unwrap_or(DEFAULT_STORE_DIR)
    }

    fn timeout_seconds(&self) -> u64 {
        self.catalog.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
