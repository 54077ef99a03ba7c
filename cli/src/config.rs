//! Client configuration.

use std::path::PathBuf;

use runway_fx::HttpRateProviderConfig;

/// Main client configuration.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Replacement country table; the built-in one is used when absent.
    pub countries_file: Option<PathBuf>,
    /// Skip live lookups and use fallback tables only.
    pub offline: bool,
    /// Log filter directive.
    pub log_level: String,
    /// Emit logs as JSON.
    pub log_json: bool,
    /// Live rate source.
    pub rates: HttpRateProviderConfig,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            countries_file: None,
            offline: false,
            log_level: "info".to_string(),
            log_json: false,
            rates: HttpRateProviderConfig::default(),
        }
    }
}

impl CliConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let mut config = Self {
            rates: HttpRateProviderConfig::from_env(),
            ..Self::default()
        };

        if let Ok(path) = std::env::var("RUNWAY_COUNTRIES_FILE") {
            if !path.is_empty() {
                config.countries_file = Some(PathBuf::from(path));
            }
        }

        if let Ok(offline) = std::env::var("RUNWAY_OFFLINE") {
            config.offline = parse_flag(&offline);
        }

        if let Ok(level) = std::env::var("RUNWAY_LOG_LEVEL") {
            config.log_level = level;
        }

        config
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.log_level.trim().is_empty() {
            return Err("Log level cannot be empty".to_string());
        }

        if !self.offline {
            self.rates.validate()?;
        }

        Ok(())
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
