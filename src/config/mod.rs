#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::{CliConfig, Command};
pub use toml_config::TomlConfig;

pub const DEFAULT_CATALOG_ENDPOINT: &str = "http://localhost:5000/api/menu";
pub const DEFAULT_STORE_DIR: &str = "./.cafe";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;
pub const MAX_TIMEOUT_SECONDS: u64 = 300;
