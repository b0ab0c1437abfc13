use std::env;
use std::path::PathBuf;

use crate::models::money::{Pricing, DEFAULT_CURRENCY_SYMBOL, DEFAULT_TAX_RATE_BPS};

#[derive(Debug, Clone)]
pub struct Config {
    pub tax_rate_bps: u32,
    pub currency_symbol: String,
    pub menu_file: Option<PathBuf>,
    pub log_level: String,
    pub environment: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            tax_rate_bps: DEFAULT_TAX_RATE_BPS,
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
            menu_file: None,
            log_level: "warn".to_string(),
            environment: "development".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from any key lookup; unset keys fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        let tax_rate_bps = match lookup("TAX_RATE") {
            Some(raw) => parse_tax_rate(&raw)?,
            None => defaults.tax_rate_bps,
        };

        let config = Config {
            tax_rate_bps,
            currency_symbol: lookup("CURRENCY_SYMBOL").unwrap_or(defaults.currency_symbol),
            menu_file: lookup("MENU_FILE")
                .filter(|path| !path.trim().is_empty())
                .map(PathBuf::from),
            log_level: lookup("LOG_LEVEL").unwrap_or(defaults.log_level),
            environment: lookup("APP_ENV").unwrap_or(defaults.environment),
        };

        config.validate()?;
        tracing::debug!("Config: successfully loaded for {} environment", config.environment);
        Ok(config)
    }

    fn validate(&self) -> Result<(), anyhow::Error> {
        if self.currency_symbol.trim().is_empty() {
            return Err(anyhow::anyhow!("CURRENCY_SYMBOL must not be empty"));
        }

        if self.tax_rate_bps > 10_000 {
            return Err(anyhow::anyhow!("TAX_RATE must be between 0 and 1"));
        }

        Ok(())
    }

    pub fn pricing(&self) -> Pricing {
        Pricing::new(self.tax_rate_bps, self.currency_symbol.trim())
    }
}

/// `"0.08"` -> 800 basis points.
fn parse_tax_rate(raw: &str) -> anyhow::Result<u32> {
    let rate: f64 = raw
        .trim()
        .parse()
        .map_err(|_| anyhow::anyhow!("TAX_RATE '{}' is not a number", raw))?;

    if !rate.is_finite() || !(0.0..=1.0).contains(&rate) {
        return Err(anyhow::anyhow!("TAX_RATE must be between 0 and 1, got {}", raw));
    }

    Ok((rate * 10_000.0).round() as u32)
}
