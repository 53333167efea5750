// ⚙️ Configuration - category allow-lists and server settings
//
// Allow-lists are configuration data, not constants: defaults live here and a
// JSON file (EXPENSE_TRACKER_CATEGORIES) can replace any of them.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

pub const CATEGORIES_PATH_VAR: &str = "EXPENSE_TRACKER_CATEGORIES";
pub const HOST_VAR: &str = "EXPENSE_TRACKER_HOST";
pub const PORT_VAR: &str = "EXPENSE_TRACKER_PORT";
pub const LOG_JSON_VAR: &str = "EXPENSE_TRACKER_LOG_JSON";

// ============================================================================
// CATEGORY ALLOW-LISTS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryConfig {
    /// Valid categories for income ledger entries
    pub income: Vec<String>,

    /// Valid categories for expense ledger entries
    pub expense: Vec<String>,

    /// Flat list for catalog entries
    pub catalog: Vec<String>,
}

fn owned(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

impl Default for CategoryConfig {
    fn default() -> Self {
        CategoryConfig {
            income: owned(&["Salary", "Freelance", "Sales", "Other"]),
            expense: owned(&["Food", "Transportation", "Leisure", "Bills", "Other"]),
            catalog: owned(&[
                "Books",
                "Electronics",
                "Clothing",
                "Furniture",
                "Sports",
                "Services",
                "Other",
            ]),
        }
    }
}

impl CategoryConfig {
    /// Parse a JSON document; keys that are missing keep their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: CategoryConfig =
            serde_json::from_str(json).context("Failed to parse category configuration")?;
        config.check()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read category file {:?}", path))?;
        Self::from_json(&json)
    }

    /// Defaults, unless EXPENSE_TRACKER_CATEGORIES points at a file
    pub fn from_env() -> Result<Self> {
        match env::var(CATEGORIES_PATH_VAR) {
            Ok(path) if !path.is_empty() => Self::load(Path::new(&path)),
            _ => Ok(Self::default()),
        }
    }

    fn check(&self) -> Result<()> {
        for (name, list) in [
            ("income", &self.income),
            ("expense", &self.expense),
            ("catalog", &self.catalog),
        ] {
            if list.is_empty() {
                bail!("Category list '{}' must not be empty", name);
            }
            if list.iter().any(|c| c.is_empty()) {
                bail!("Category list '{}' contains an empty name", name);
            }
        }
        Ok(())
    }
}

// ============================================================================
// SERVER SETTINGS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Emit logs as JSON lines instead of human-readable text
    pub log_json: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: "0.0.0.0".to_string(),
            port: 8000,
            log_json: false,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        let defaults = ServerConfig::default();

        let host = env::var(HOST_VAR).unwrap_or(defaults.host);

        let port = match env::var(PORT_VAR) {
            Ok(raw) => raw
                .parse::<u16>()
                .with_context(|| format!("{} must be a port number, got '{}'", PORT_VAR, raw))?,
            Err(_) => defaults.port,
        };

        let log_json = env::var(LOG_JSON_VAR)
            .map(|v| matches!(v.as_str(), "1" | "true" | "yes"))
            .unwrap_or(defaults.log_json);

        Ok(ServerConfig {
            host,
            port,
            log_json,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppConfig {
    pub categories: CategoryConfig,
    pub server: ServerConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Ok(AppConfig {
            categories: CategoryConfig::from_env()?,
            server: ServerConfig::from_env()?,
        })
    }
}
