//! Runtime settings loaded from the environment.
//!
//! A `.env` file in the working directory is honoured through dotenvy; real
//! environment variables win over it.

use std::path::PathBuf;
use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::ConfigError;
use crate::models::StatusThresholds;

pub const DATA_DIR_VAR: &str = "TOUROPS_DATA_DIR";
pub const CURRENCY_VAR: &str = "TOUROPS_CURRENCY";
pub const REFERENCE_PREFIX_VAR: &str = "TOUROPS_REFERENCE_PREFIX";
pub const WARNING_THRESHOLD_VAR: &str = "TOUROPS_WARNING_THRESHOLD";
pub const CRITICAL_THRESHOLD_VAR: &str = "TOUROPS_CRITICAL_THRESHOLD";

/// Application settings
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Directory holding the JSON collection files
    pub data_dir: PathBuf,
    /// Currency code used for display money
    pub currency: String,
    /// Prefix of generated booking references
    pub reference_prefix: String,
    /// Utilization cutoffs for pool status
    pub thresholds: StatusThresholds,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            currency: "EUR".to_string(),
            reference_prefix: "PB".to_string(),
            thresholds: StatusThresholds::default(),
        }
    }
}

impl Settings {
    /// Load settings from `.env` and the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Err(e) = dotenvy::dotenv() {
            tracing::debug!("No .env file loaded: {}", e);
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let data_dir = lookup(DATA_DIR_VAR)
            .map(PathBuf::from)
            .unwrap_or(defaults.data_dir);
        let currency = lookup(CURRENCY_VAR)
            .map(|c| c.trim().to_uppercase())
            .filter(|c| !c.is_empty())
            .unwrap_or(defaults.currency);
        let reference_prefix = lookup(REFERENCE_PREFIX_VAR)
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .unwrap_or(defaults.reference_prefix);

        let warning = parse_decimal(&lookup, WARNING_THRESHOLD_VAR, dec!(75))?;
        let critical = parse_decimal(&lookup, CRITICAL_THRESHOLD_VAR, dec!(90))?;
        if warning >= critical {
            return Err(ConfigError::ThresholdOrder {
                warning: warning.to_string(),
                critical: critical.to_string(),
            });
        }

        Ok(Self {
            data_dir,
            currency,
            reference_prefix,
            thresholds: StatusThresholds { warning, critical },
        })
    }
}

fn parse_decimal<F>(lookup: &F, key: &str, default: Decimal) -> Result<Decimal, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => Decimal::from_str(raw.trim()).map_err(|_| ConfigError::InvalidValue {
            key: key.to_string(),
            value: raw,
        }),
    }
}
