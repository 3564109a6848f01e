//! Application configuration

use std::env;
use std::str::FromStr;

use common::error::{Error, Result};
use market_data::sparkline::DEFAULT_COUNT;
use market_data::{MarketDataService, SparklineGenerator, ViewBox};

/// Deepest order book a request may ask for
pub const MAX_DEPTH: usize = market_data::MAX_ORDERBOOK_DEPTH;

/// Application configuration
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// API port
    pub port: u16,
    /// Order book levels considered per side
    pub max_depth: usize,
    /// Points per sparkline
    pub sparkline_points: usize,
    /// Sparkline view box width
    pub sparkline_width: f64,
    /// Sparkline view box height
    pub sparkline_height: f64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            max_depth: MAX_DEPTH,
            sparkline_points: DEFAULT_COUNT,
            sparkline_width: 100.0,
            sparkline_height: 30.0,
        }
    }
}

impl AppConfig {
    /// Create a new configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a configuration from any key lookup, falling back to defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let config = Self {
            port: parse_var(&lookup, "PORT")?.unwrap_or(defaults.port),
            max_depth: parse_var(&lookup, "MAX_ORDERBOOK_DEPTH")?
                .unwrap_or(defaults.max_depth)
                .clamp(1, MAX_DEPTH),
            sparkline_points: parse_var(&lookup, "SPARKLINE_POINTS")?
                .unwrap_or(defaults.sparkline_points)
                .max(2),
            sparkline_width: parse_var(&lookup, "SPARKLINE_WIDTH")?.unwrap_or(defaults.sparkline_width),
            sparkline_height: parse_var(&lookup, "SPARKLINE_HEIGHT")?.unwrap_or(defaults.sparkline_height),
        };

        if !(config.sparkline_width > 0.0) || !(config.sparkline_height > 0.0) {
            return Err(Error::ConfigurationError(format!(
                "sparkline view box must be positive, got {}x{}",
                config.sparkline_width, config.sparkline_height
            )));
        }

        Ok(config)
    }

    /// Market data service built from this configuration
    pub fn market_data_service(&self) -> MarketDataService {
        let view_box = ViewBox {
            width: self.sparkline_width,
            height: self.sparkline_height,
        };
        MarketDataService::with_settings(
            SparklineGenerator::new(self.sparkline_points, view_box),
            self.max_depth,
        )
    }
}

fn parse_var<F, T>(lookup: &F, key: &str) -> Result<Option<T>>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| Error::ConfigurationError(format!("{}={}: {}", key, raw, e))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_overrides_and_clamping() {
        let config = AppConfig::from_lookup(lookup(&[
            ("PORT", "9000"),
            ("MAX_ORDERBOOK_DEPTH", "1000"),
            ("SPARKLINE_POINTS", "1"),
            ("SPARKLINE_WIDTH", "120"),
        ]))
        .unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.max_depth, 250);
        assert_eq!(config.sparkline_points, 2);
        assert_eq!(config.sparkline_width, 120.0);
        assert_eq!(config.sparkline_height, 30.0);
    }

    #[test]
    fn test_invalid_values_are_errors() {
        let err = AppConfig::from_lookup(lookup(&[("PORT", "eighty")])).unwrap_err();
        assert!(matches!(err, Error::ConfigurationError(ref msg) if msg.starts_with("PORT=eighty")));

        let err = AppConfig::from_lookup(lookup(&[("SPARKLINE_HEIGHT", "0")])).unwrap_err();
        assert!(matches!(err, Error::ConfigurationError(_)));
    }

    #[test]
    fn test_service_uses_settings() {
        let config = AppConfig::from_lookup(lookup(&[("MAX_ORDERBOOK_DEPTH", "20")])).unwrap();
        let service = config.market_data_service();
        assert_eq!(service.max_depth(), 20);
        assert_eq!(service.sparkline().count, 40);
    }
}
