//! Panel configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `CART_DISCOUNTS_SHIPPING_TARGET` - Let operators target shipping (default: false)
//! - `LOG_FORMAT` - `text` or `json` (default: text)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment (e.g., "staging")
//! - `SENTRY_SAMPLE_RATE` - Error sample rate, 0.0 to 1.0 (default: 1.0)

use cart_discounts_core::DiscountCapabilities;
use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// How binaries format log output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Sentry error tracking configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct SentryConfig {
    pub dsn: String,
    pub environment: Option<String>,
    /// Error sample rate (0.0 to 1.0)
    pub sample_rate: f32,
}

/// Discount panel configuration.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PanelConfig {
    /// What the discount form supports
    pub capabilities: DiscountCapabilities,
    pub log_format: LogFormat,
    /// Sentry configuration (optional)
    pub sentry: Option<SentryConfig>,
}

impl PanelConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unparseable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unparseable value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let supports_shipping_target = get("CART_DISCOUNTS_SHIPPING_TARGET")
            .map(|v| parse_bool("CART_DISCOUNTS_SHIPPING_TARGET", &v))
            .transpose()?
            .unwrap_or(false);

        let log_format = match get("LOG_FORMAT").as_deref().map(str::to_lowercase).as_deref() {
            None | Some("text") => LogFormat::Text,
            Some("json") => LogFormat::Json,
            Some(other) => {
                return Err(ConfigError::InvalidEnvVar(
                    "LOG_FORMAT".to_string(),
                    format!("expected text or json, got {other}"),
                ));
            }
        };

        let sentry = match get("SENTRY_DSN") {
            Some(dsn) => Some(SentryConfig {
                dsn,
                environment: get("SENTRY_ENVIRONMENT"),
                sample_rate: get("SENTRY_SAMPLE_RATE")
                    .map(|v| parse_sample_rate("SENTRY_SAMPLE_RATE", &v))
                    .transpose()?
                    .unwrap_or(1.0),
            }),
            None => None,
        };

        Ok(Self {
            capabilities: DiscountCapabilities {
                supports_shipping_target,
            },
            log_format,
            sentry,
        })
    }
}

fn parse_bool(name: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ConfigError::InvalidEnvVar(
            name.to_string(),
            format!("expected a boolean, got {other}"),
        )),
    }
}

fn parse_sample_rate(name: &str, value: &str) -> Result<f32, ConfigError> {
    let rate = value
        .trim()
        .parse::<f32>()
        .map_err(|e| ConfigError::InvalidEnvVar(name.to_string(), e.to_string()))?;
    if !(0.0..=1.0).contains(&rate) {
        return Err(ConfigError::InvalidEnvVar(
            name.to_string(),
            format!("must be between 0.0 and 1.0, got {rate}"),
        ));
    }
    Ok(rate)
}
