//! Configuration validation module.
//!
//! Collects every invalid value in one pass so startup fails with the
//! complete list rather than the first problem found.

use crate::{AppConfig, CacheBackend, StoreBackend};
use std::fmt;
use url::Url;

/// Configuration validation error variants.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValidationError {
    /// Port number is invalid (must be 1-65535).
    InvalidPort { name: String, value: u16 },
    /// Pool size configuration is invalid (min must be <= max).
    InvalidPoolSize { min: u32, max: u32 },
    /// Pool size exceeds maximum allowed.
    PoolSizeTooLarge { value: u32, maximum: u32 },
    /// URL format is invalid.
    InvalidUrl { url_type: String, message: String },
    /// Timeout or TTL value must be positive.
    NonPositiveTimeout { name: String, value: u64 },
    /// A percentage lies outside `[0, 1]`.
    PercentageOutOfRange { name: String, value: f64 },
    /// An absolute price bound is negative or not finite.
    InvalidPriceBound { name: String, value: f64 },
    /// `min_price` is above `max_price`.
    PriceBoundsInverted { min: f64, max: f64 },
    /// An inventory threshold is negative.
    NegativeThreshold { name: String, value: i64 },
    /// Log level is invalid.
    InvalidLogLevel { value: String },
    /// Metrics path must start with `/`.
    InvalidMetricsPath { value: String },
}

impl fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPort { name, value } => {
                write!(f, "Invalid port for {}: {} (must be 1-65535)", name, value)
            }
            Self::InvalidPoolSize { min, max } => {
                write!(
                    f,
                    "Invalid pool size: min ({}) cannot be greater than max ({})",
                    min, max
                )
            }
            Self::PoolSizeTooLarge { value, maximum } => {
                write!(f, "Pool size {} exceeds maximum allowed ({})", value, maximum)
            }
            Self::InvalidUrl { url_type, message } => {
                write!(f, "Invalid {} URL: {}", url_type, message)
            }
            Self::NonPositiveTimeout { name, value } => {
                write!(f, "'{}' must be positive, got {}", name, value)
            }
            Self::PercentageOutOfRange { name, value } => {
                write!(f, "'{}' must be between 0.0 and 1.0, got {}", name, value)
            }
            Self::InvalidPriceBound { name, value } => {
                write!(f, "'{}' must be a non-negative number, got {}", name, value)
            }
            Self::PriceBoundsInverted { min, max } => {
                write!(f, "min_price ({}) cannot be greater than max_price ({})", min, max)
            }
            Self::NegativeThreshold { name, value } => {
                write!(f, "'{}' must be non-negative, got {}", name, value)
            }
            Self::InvalidLogLevel { value } => {
                write!(
                    f,
                    "Invalid log level: '{}' (valid: trace, debug, info, warn, error)",
                    value
                )
            }
            Self::InvalidMetricsPath { value } => {
                write!(f, "Metrics path must start with '/', got '{}'", value)
            }
        }
    }
}

impl std::error::Error for ConfigValidationError {}

/// Result of configuration validation containing all errors found.
#[derive(Debug)]
pub struct ValidationResult {
    errors: Vec<ConfigValidationError>,
}

impl ValidationResult {
    fn new() -> Self {
        Self { errors: Vec::new() }
    }

    fn add_error(&mut self, error: ConfigValidationError) {
        self.errors.push(error);
    }

    /// Returns true if validation passed (no errors).
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the validation errors.
    pub fn errors(&self) -> &[ConfigValidationError] {
        &self.errors
    }

    /// Converts to Result, returning Err with all errors if any exist.
    pub fn into_result(self) -> Result<(), Vec<ConfigValidationError>> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Maximum connection pool size.
    const MAX_POOL_SIZE: u32 = 1000;
    /// Valid log levels.
    const VALID_LOG_LEVELS: &'static [&'static str] = &["trace", "debug", "info", "warn", "error"];

    /// Validates the entire application configuration.
    ///
    /// Returns Ok(()) if valid, or Err with all validation errors found.
    pub fn validate(config: &AppConfig) -> Result<(), Vec<ConfigValidationError>> {
        let mut result = ValidationResult::new();

        Self::validate_server(&config.server, &mut result);
        Self::validate_database(&config.database, &mut result);
        Self::validate_cache(config, &mut result);
        Self::validate_pricing(&config.pricing, &mut result);
        Self::validate_observability(&config.observability, &mut result);

        result.into_result()
    }

    fn validate_server(config: &crate::ServerConfig, result: &mut ValidationResult) {
        // 0 is invalid for binding
        if config.port == 0 {
            result.add_error(ConfigValidationError::InvalidPort {
                name: "server.port".to_string(),
                value: config.port,
            });
        }
        if config.request_timeout_secs == 0 {
            result.add_error(ConfigValidationError::NonPositiveTimeout {
                name: "server.request_timeout_secs".to_string(),
                value: 0,
            });
        }
    }

    fn validate_database(config: &crate::DatabaseConfig, result: &mut ValidationResult) {
        if config.backend != StoreBackend::Postgres {
            return;
        }

        if config.min_connections > config.max_connections {
            result.add_error(ConfigValidationError::InvalidPoolSize {
                min: config.min_connections,
                max: config.max_connections,
            });
        }
        if config.max_connections > Self::MAX_POOL_SIZE {
            result.add_error(ConfigValidationError::PoolSizeTooLarge {
                value: config.max_connections,
                maximum: Self::MAX_POOL_SIZE,
            });
        }
        if config.connect_timeout_secs == 0 {
            result.add_error(ConfigValidationError::NonPositiveTimeout {
                name: "database.connect_timeout_secs".to_string(),
                value: 0,
            });
        }

        match Url::parse(&config.url) {
            Ok(url) if matches!(url.scheme(), "postgres" | "postgresql") => {}
            Ok(url) => result.add_error(ConfigValidationError::InvalidUrl {
                url_type: "database".to_string(),
                message: format!("unsupported scheme '{}'", url.scheme()),
            }),
            Err(e) => result.add_error(ConfigValidationError::InvalidUrl {
                url_type: "database".to_string(),
                message: e.to_string(),
            }),
        }
    }

    fn validate_cache(config: &AppConfig, result: &mut ValidationResult) {
        let cache = &config.cache;
        if cache.backend == CacheBackend::Disabled {
            return;
        }

        for (name, value) in [
            ("cache.price_ttl_secs", cache.price_ttl_secs),
            ("cache.baseline_ttl_secs", cache.baseline_ttl_secs),
            ("cache.purge_interval_secs", cache.purge_interval_secs),
        ] {
            if value == 0 {
                result.add_error(ConfigValidationError::NonPositiveTimeout {
                    name: name.to_string(),
                    value,
                });
            }
        }

        if cache.backend == CacheBackend::Redis {
            match Url::parse(&config.redis.url) {
                Ok(url) if matches!(url.scheme(), "redis" | "rediss") => {}
                Ok(url) => result.add_error(ConfigValidationError::InvalidUrl {
                    url_type: "redis".to_string(),
                    message: format!("unsupported scheme '{}'", url.scheme()),
                }),
                Err(e) => result.add_error(ConfigValidationError::InvalidUrl {
                    url_type: "redis".to_string(),
                    message: e.to_string(),
                }),
            }
        }
    }

    fn validate_pricing(config: &crate::PricingConfig, result: &mut ValidationResult) {
        let rules = &config.rules;
        let model = &config.model;

        for (name, value) in [
            ("pricing.rules.min_margin_pct", rules.min_margin_pct),
            ("pricing.rules.max_above_competitor_pct", rules.max_above_competitor_pct),
            ("pricing.rules.clearance_discount_pct", rules.clearance_discount_pct),
            ("pricing.model.premium_pct", model.premium_pct),
            ("pricing.model.discount_pct", model.discount_pct),
            ("pricing.model.inventory_discount_pct", model.inventory_discount_pct),
        ] {
            if !(0.0..=1.0).contains(&value) {
                result.add_error(ConfigValidationError::PercentageOutOfRange {
                    name: name.to_string(),
                    value,
                });
            }
        }

        for (name, value) in [
            ("pricing.rules.clearance_inventory", rules.clearance_inventory),
            ("pricing.model.inventory_threshold", model.inventory_threshold),
        ] {
            if value < 0 {
                result.add_error(ConfigValidationError::NegativeThreshold {
                    name: name.to_string(),
                    value,
                });
            }
        }

        for (name, bound) in [
            ("pricing.rules.min_price", rules.min_price),
            ("pricing.rules.max_price", rules.max_price),
        ] {
            if let Some(value) = bound {
                if !value.is_finite() || value < 0.0 {
                    result.add_error(ConfigValidationError::InvalidPriceBound {
                        name: name.to_string(),
                        value,
                    });
                }
            }
        }

        if let (Some(min), Some(max)) = (rules.min_price, rules.max_price) {
            if min > max {
                result.add_error(ConfigValidationError::PriceBoundsInverted { min, max });
            }
        }
    }

    fn validate_observability(config: &crate::ObservabilityConfig, result: &mut ValidationResult) {
        if !Self::VALID_LOG_LEVELS.contains(&config.log_level.to_lowercase().as_str()) {
            result.add_error(ConfigValidationError::InvalidLogLevel {
                value: config.log_level.clone(),
            });
        }

        if config.metrics_enabled && !config.metrics_path.starts_with('/') {
            result.add_error(ConfigValidationError::InvalidMetricsPath {
                value: config.metrics_path.clone(),
            });
        }
    }
}

/// Formats validation errors for display.
pub fn format_validation_errors(errors: &[ConfigValidationError]) -> String {
    let mut output = String::from("Configuration validation failed:\n");
    for (i, error) in errors.iter().enumerate() {
        output.push_str(&format!("  {}. {}\n", i + 1, error));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_config_passes() {
        assert!(ConfigValidator::validate(&AppConfig::default()).is_ok());
    }

    #[test]
    fn test_invalid_port() {
        let mut config = AppConfig::default();
        config.server.port = 0;

        let errors = ConfigValidator::validate(&config).unwrap_err();
        assert!(errors.iter().any(|e| matches!(
            e,
            ConfigValidationError::InvalidPort { name, .. } if name == "server.port"
        )));
    }

    #[test]
    fn test_invalid_pool_size() {
        let mut config = AppConfig::default();
        config.database.min_connections = 100;
        config.database.max_connections = 10;

        let errors = ConfigValidator::validate(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigValidationError::InvalidPoolSize { .. })));
    }

    #[test]
    fn test_pool_size_too_large() {
        let mut config = AppConfig::default();
        config.database.max_connections = 2000;

        let errors = ConfigValidator::validate(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigValidationError::PoolSizeTooLarge { .. })));
    }

    #[test]
    fn test_invalid_database_url() {
        let mut config = AppConfig::default();
        config.database.url = "mysql://localhost/priceopt".to_string();

        let errors = ConfigValidator::validate(&config).unwrap_err();
        assert!(errors.iter().any(|e| matches!(
            e,
            ConfigValidationError::InvalidUrl { url_type, .. } if url_type == "database"
        )));
    }

    #[test]
    fn test_memory_backend_skips_database_checks() {
        let mut config = AppConfig::default();
        config.database.backend = StoreBackend::Memory;
        config.database.url = "not a url".to_string();

        assert!(ConfigValidator::validate(&config).is_ok());
    }

    #[test]
    fn test_invalid_redis_url() {
        let mut config = AppConfig::default();
        config.redis.url = "http://localhost:6379".to_string();

        let errors = ConfigValidator::validate(&config).unwrap_err();
        assert!(errors.iter().any(|e| matches!(
            e,
            ConfigValidationError::InvalidUrl { url_type, .. } if url_type == "redis"
        )));
    }

    #[test]
    fn test_zero_ttl() {
        let mut config = AppConfig::default();
        config.cache.backend = CacheBackend::Memory;
        config.cache.price_ttl_secs = 0;

        let errors = ConfigValidator::validate(&config).unwrap_err();
        assert!(errors.iter().any(|e| matches!(
            e,
            ConfigValidationError::NonPositiveTimeout { name, .. } if name == "cache.price_ttl_secs"
        )));
    }

    #[test]
    fn test_zero_purge_interval() {
        let mut config = AppConfig::default();
        config.cache.backend = CacheBackend::Memory;
        config.cache.purge_interval_secs = 0;

        let errors = ConfigValidator::validate(&config).unwrap_err();
        assert!(errors.iter().any(|e| matches!(
            e,
            ConfigValidationError::NonPositiveTimeout { name, .. } if name == "cache.purge_interval_secs"
        )));
    }

    #[test]
    fn test_percentage_out_of_range() {
        let mut config = AppConfig::default();
        config.pricing.rules.max_above_competitor_pct = 1.5;
        config.pricing.model.premium_pct = -0.1;

        let errors = ConfigValidator::validate(&config).unwrap_err();
        assert_eq!(
            errors
                .iter()
                .filter(|e| matches!(e, ConfigValidationError::PercentageOutOfRange { .. }))
                .count(),
            2
        );
    }

    #[test]
    fn test_price_bounds() {
        let mut config = AppConfig::default();
        config.pricing.rules.min_price = Some(50.0);
        config.pricing.rules.max_price = Some(10.0);

        let errors = ConfigValidator::validate(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigValidationError::PriceBoundsInverted { .. })));
    }

    #[test]
    fn test_invalid_log_level() {
        let mut config = AppConfig::default();
        config.observability.log_level = "verbose".to_string();

        let errors = ConfigValidator::validate(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigValidationError::InvalidLogLevel { .. })));
    }

    #[test]
    fn test_multiple_errors_collected() {
        let mut config = AppConfig::default();
        config.server.port = 0;
        config.observability.log_level = "verbose".to_string();
        config.observability.metrics_path = "metrics".to_string();

        let errors = ConfigValidator::validate(&config).unwrap_err();
        assert!(errors.len() >= 3);
    }

    #[test]
    fn test_format_validation_errors() {
        let errors = vec![
            ConfigValidationError::InvalidPort {
                name: "server.port".to_string(),
                value: 0,
            },
            ConfigValidationError::InvalidLogLevel {
                value: "verbose".to_string(),
            },
        ];

        let formatted = format_validation_errors(&errors);
        assert!(formatted.contains("Configuration validation failed"));
        assert!(formatted.contains("1. Invalid port"));
        assert!(formatted.contains("2. Invalid log level"));
    }
}
