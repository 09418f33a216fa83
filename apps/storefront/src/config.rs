//! # Storefront Configuration
//!
//! Configuration loaded once at startup.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     STOREFRONT_CATALOG_ROOT=./catalog                                  │
//! │     STOREFRONT_AUTO_ADVANCE_MS=3000                                    │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/storefront/storefront.toml (Linux)                       │
//! │     ~/Library/Application Support/com.storefront.storefront/ (macOS)   │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [store]
//! name = "Corner Pizzeria"
//!
//! [catalog]
//! root = "./catalog"
//! collection = "mock"   # optional: list a named collection instead
//!
//! [carousel]
//! auto_advance_interval_ms = 2000
//! transition_ms = 500
//! manual_cooldown_ms = 10000
//!
//! [currency]
//! symbol = "$"
//! decimal_separator = "."
//! thousands_separator = ","
//! ```

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use storefront_core::carousel::{
    DEFAULT_AUTO_ADVANCE_INTERVAL, DEFAULT_MANUAL_COOLDOWN, DEFAULT_TRANSITION_DURATION,
};
use storefront_core::validation::validate_collection_id;
use storefront_core::{CarouselConfig, CurrencyFormat};
use tracing::{debug, info, warn};

use crate::error::{ConfigError, ConfigResult};

/// File name of the config file inside the config directory.
pub const CONFIG_FILE: &str = "storefront.toml";

// =============================================================================
// Sections
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreSettings {
    /// Shown as the heading of the product list.
    #[serde(default = "default_store_name")]
    pub name: String,
}

fn default_store_name() -> String {
    "Storefront".to_string()
}

impl Default for StoreSettings {
    fn default() -> Self {
        StoreSettings {
            name: default_store_name(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogSettings {
    /// Directory holding `products.json` and `collections/`.
    #[serde(default = "default_catalog_root")]
    pub root: PathBuf,

    /// Named collection to list instead of the default products.
    #[serde(default)]
    pub collection: Option<String>,
}

fn default_catalog_root() -> PathBuf {
    PathBuf::from("./catalog")
}

impl Default for CatalogSettings {
    fn default() -> Self {
        CatalogSettings {
            root: default_catalog_root(),
            collection: None,
        }
    }
}

/// Carousel timings in milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarouselSettings {
    #[serde(default = "default_auto_advance")]
    pub auto_advance_interval_ms: u64,

    /// Must match the visual cross-fade duration.
    #[serde(default = "default_transition")]
    pub transition_ms: u64,

    #[serde(default = "default_cooldown")]
    pub manual_cooldown_ms: u64,
}

fn default_auto_advance() -> u64 {
    DEFAULT_AUTO_ADVANCE_INTERVAL.as_millis() as u64
}

fn default_transition() -> u64 {
    DEFAULT_TRANSITION_DURATION.as_millis() as u64
}

fn default_cooldown() -> u64 {
    DEFAULT_MANUAL_COOLDOWN.as_millis() as u64
}

impl Default for CarouselSettings {
    fn default() -> Self {
        CarouselSettings {
            auto_advance_interval_ms: default_auto_advance(),
            transition_ms: default_transition(),
            manual_cooldown_ms: default_cooldown(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrencySettings {
    #[serde(default = "default_symbol")]
    pub symbol: String,

    #[serde(default = "default_decimal_separator")]
    pub decimal_separator: char,

    /// Omit to disable digit grouping.
    #[serde(default)]
    pub thousands_separator: Option<char>,
}

fn default_symbol() -> String {
    "$".to_string()
}

fn default_decimal_separator() -> char {
    '.'
}

impl Default for CurrencySettings {
    fn default() -> Self {
        CurrencySettings {
            symbol: default_symbol(),
            decimal_separator: default_decimal_separator(),
            thousands_separator: Some(','),
        }
    }
}

// =============================================================================
// Storefront Config
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorefrontConfig {
    #[serde(default)]
    pub store: StoreSettings,

    #[serde(default)]
    pub catalog: CatalogSettings,

    #[serde(default)]
    pub carousel: CarouselSettings,

    #[serde(default)]
    pub currency: CurrencySettings,
}

impl StorefrontConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (storefront.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading storefront config from file");
                let contents = std::fs::read_to_string(&path)
                    .map_err(|source| ConfigError::Io { path, source })?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load storefront config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.store.name.trim().is_empty() {
            return Err(ConfigError::Invalid("store.name must not be empty".into()));
        }

        if let Some(ref collection) = self.catalog.collection {
            validate_collection_id(collection)
                .map_err(|e| ConfigError::Invalid(format!("catalog.collection: {e}")))?;
        }

        let timings = [
            ("carousel.auto_advance_interval_ms", self.carousel.auto_advance_interval_ms),
            ("carousel.transition_ms", self.carousel.transition_ms),
            ("carousel.manual_cooldown_ms", self.carousel.manual_cooldown_ms),
        ];
        for (name, value) in timings {
            if value == 0 {
                return Err(ConfigError::Invalid(format!("{name} must be greater than 0")));
            }
        }

        if self.currency.thousands_separator == Some(self.currency.decimal_separator) {
            return Err(ConfigError::Invalid(
                "currency separators must differ".into(),
            ));
        }

        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies `STOREFRONT_*` overrides read through `lookup`.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(name) = lookup("STOREFRONT_STORE_NAME") {
            self.store.name = name;
        }

        if let Some(root) = lookup("STOREFRONT_CATALOG_ROOT") {
            debug!(root = %root, "Overriding catalog root from environment");
            self.catalog.root = PathBuf::from(root);
        }

        if let Some(collection) = lookup("STOREFRONT_COLLECTION") {
            self.catalog.collection = (!collection.is_empty()).then_some(collection);
        }

        let millis = [
            ("STOREFRONT_AUTO_ADVANCE_MS", &mut self.carousel.auto_advance_interval_ms),
            ("STOREFRONT_TRANSITION_MS", &mut self.carousel.transition_ms),
            ("STOREFRONT_COOLDOWN_MS", &mut self.carousel.manual_cooldown_ms),
        ];
        for (key, target) in millis {
            if let Some(raw) = lookup(key) {
                match raw.parse::<u64>() {
                    Ok(value) => *target = value,
                    Err(_) => warn!(key, value = %raw, "Ignoring non-numeric override"),
                }
            }
        }

        if let Some(symbol) = lookup("STOREFRONT_CURRENCY_SYMBOL") {
            self.currency.symbol = symbol;
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "storefront", "storefront")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    pub fn carousel_config(&self) -> CarouselConfig {
        CarouselConfig {
            auto_advance_interval: Duration::from_millis(self.carousel.auto_advance_interval_ms),
            transition_duration: Duration::from_millis(self.carousel.transition_ms),
            manual_cooldown: Duration::from_millis(self.carousel.manual_cooldown_ms),
        }
    }

    pub fn currency_format(&self) -> CurrencyFormat {
        CurrencyFormat {
            symbol: self.currency.symbol.clone(),
            decimal_separator: self.currency.decimal_separator,
            thousands_separator: self.currency.thousands_separator,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use storefront_core::{CurrencyFormatter, Money};

    #[test]
    fn test_default_config() {
        let config = StorefrontConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.carousel_config(), CarouselConfig::default());
        assert_eq!(config.currency_format(), CurrencyFormat::default());
        assert_eq!(config.catalog.root, PathBuf::from("./catalog"));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: StorefrontConfig = toml::from_str(
            r#"
            [carousel]
            auto_advance_interval_ms = 3000

            [currency]
            symbol = "€"
            decimal_separator = ","
            thousands_separator = "."
            "#,
        )
        .unwrap();

        assert_eq!(config.carousel.auto_advance_interval_ms, 3000);
        assert_eq!(config.carousel.transition_ms, 500);
        assert_eq!(config.store.name, "Storefront");
        assert_eq!(
            config.currency_format().format(Money::from_cents(123456)),
            "€1.234,56"
        );
    }

    #[test]
    fn test_config_validation() {
        let mut config = StorefrontConfig::default();
        config.carousel.transition_ms = 0;
        assert!(config.validate().is_err());

        let mut config = StorefrontConfig::default();
        config.catalog.collection = Some("../etc".to_string());
        assert!(config.validate().is_err());

        let mut config = StorefrontConfig::default();
        config.currency.decimal_separator = ',';
        assert!(config.validate().is_err());

        config.currency.thousands_separator = None;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("STOREFRONT_CATALOG_ROOT", "/srv/catalog"),
            ("STOREFRONT_COLLECTION", "mock"),
            ("STOREFRONT_AUTO_ADVANCE_MS", "4000"),
            ("STOREFRONT_COOLDOWN_MS", "soon"),
        ]
        .into_iter()
        .collect();

        let mut config = StorefrontConfig::default();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.catalog.root, PathBuf::from("/srv/catalog"));
        assert_eq!(config.catalog.collection.as_deref(), Some("mock"));
        assert_eq!(config.carousel.auto_advance_interval_ms, 4000);
        assert_eq!(config.carousel.manual_cooldown_ms, 10_000);
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("storefront-{}.toml", uuid::Uuid::new_v4()));
        std::fs::write(&path, "[store]\nname = \"Corner Pizzeria\"\n").unwrap();

        let config = StorefrontConfig::load(Some(path.clone())).unwrap();
        assert_eq!(config.store.name, "Corner Pizzeria");

        std::fs::write(&path, "[carousel]\ntransition_ms = \"fast\"\n").unwrap();
        assert!(matches!(
            StorefrontConfig::load(Some(path.clone())),
            Err(ConfigError::Parse(_))
        ));

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_toml_serialization() {
        let config = StorefrontConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[carousel]"));
        assert!(toml_str.contains("[currency]"));

        let back: StorefrontConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(back, config);
    }
}
