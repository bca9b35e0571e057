use serde::Deserialize;
use std::time::Duration;

use crate::shared::date_utils::Period;

/// Client settings
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ClientConfig {
    /// Base path of the analytics API, e.g. "/api/v1" or "http://localhost:8000/api/v1"
    pub api_base_url: String,
    /// Lifetime of cached dashboard snapshots
    pub dashboard_cache_ttl_secs: u64,
    /// Default `limit` for the top-products endpoint
    pub top_products_limit: u32,
    /// Period preselected on the overview page ("7", "30", "90", "180", "365")
    pub default_period: String,
}

/// Default configuration embedded in the bundle
const DEFAULT_CONFIG: &str = r#"
api_base_url = "/api/v1"
dashboard_cache_ttl_secs = 300
top_products_limit = 10
default_period = "30"
"#;

impl ClientConfig {
    /// Parse a TOML document; missing keys fall back to the embedded defaults
    pub fn from_toml_str(contents: &str) -> Result<Self, String> {
        let mut merged: toml::Table = toml::from_str(DEFAULT_CONFIG)
            .map_err(|e| format!("Invalid default config: {}", e))?;
        let overrides: toml::Table =
            toml::from_str(contents).map_err(|e| format!("Invalid config: {}", e))?;
        merged.extend(overrides);

        toml::Value::Table(merged)
            .try_into()
            .map_err(|e| format!("Invalid config: {}", e))
    }

    pub fn dashboard_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.dashboard_cache_ttl_secs)
    }

    pub fn default_period(&self) -> Period {
        Period::from_value(&self.default_period)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: "/api/v1".to_string(),
            dashboard_cache_ttl_secs: 300,
            top_products_limit: 10,
            default_period: "30".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config = ClientConfig::from_toml_str("").unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.dashboard_cache_ttl(), Duration::from_secs(300));
        assert_eq!(config.default_period(), Period::Last30Days);
    }

    #[test]
    fn test_override_single_key() {
        let config =
            ClientConfig::from_toml_str(r#"api_base_url = "http://localhost:8000/api/v1""#)
                .unwrap();
        assert_eq!(config.api_base_url, "http://localhost:8000/api/v1");
        assert_eq!(config.top_products_limit, 10);
    }

    #[test]
    fn test_invalid_config() {
        assert!(ClientConfig::from_toml_str("dashboard_cache_ttl_secs = \"soon\"").is_err());
        assert!(ClientConfig::from_toml_str("not toml at all ===").is_err());
    }
}
