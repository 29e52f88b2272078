use crate::application::analytics::SlaThresholds;
use crate::domain::entities::Priority;
use chrono::Locale;
use chrono_tz::Tz;
use std::env;

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub server_host: String,
    pub server_port: u16,
    pub otel_exporter_endpoint: Option<String>,
    pub service_name: String,
    pub metrics_port: u16,
    pub analytics: AnalyticsConfig,
}

/// Policy knobs of the analytics engine.
#[derive(Clone, Debug)]
pub struct AnalyticsConfig {
    pub thresholds: SlaThresholds,
    pub agent_capacity: i64,
    pub timezone: Tz,
    pub locale: Locale,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            thresholds: SlaThresholds::default(),
            agent_capacity: 12,
            timezone: chrono_tz::UTC,
            locale: Locale::en_US,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://deskpulse.db?mode=rwc".to_string());

        let server_host = env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

        let server_port = env::var("SERVER_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidPort)?;

        let otel_exporter_endpoint = env::var("OTEL_EXPORTER_OTLP_ENDPOINT").ok();

        let service_name = env::var("SERVICE_NAME").unwrap_or_else(|_| "deskpulse".to_string());

        let metrics_port = env::var("METRICS_PORT")
            .unwrap_or_else(|_| "9000".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidPort)?;

        Ok(Config {
            database_url,
            server_host,
            server_port,
            otel_exporter_endpoint,
            service_name,
            metrics_port,
            analytics: AnalyticsConfig::from_env()?,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

impl AnalyticsConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = SlaThresholds::default();
        let mut pairs = Vec::with_capacity(Priority::ALL.len());
        for priority in Priority::ALL {
            let var = format!("SLA_{}_MINUTES", priority);
            let minutes = match env::var(&var) {
                Ok(raw) => parse_positive(&var, &raw)?,
                Err(_) => defaults
                    .threshold_for(priority)
                    .map_err(|_| ConfigError::MissingThreshold(priority))?,
            };
            pairs.push((priority, minutes));
        }
        let thresholds = SlaThresholds::from_pairs(pairs);

        let agent_capacity = match env::var("AGENT_CAPACITY") {
            Ok(raw) => parse_positive("AGENT_CAPACITY", &raw)?,
            Err(_) => 12,
        };

        let timezone_name = env::var("DASHBOARD_TIMEZONE").unwrap_or_else(|_| "UTC".to_string());
        let timezone = timezone_name
            .parse::<Tz>()
            .map_err(|_| ConfigError::InvalidTimezone(timezone_name))?;

        let locale_name = env::var("DASHBOARD_LOCALE").unwrap_or_else(|_| "en_US".to_string());
        let locale = Locale::try_from(locale_name.as_str())
            .map_err(|_| ConfigError::InvalidLocale(locale_name))?;

        let config = Self {
            thresholds,
            agent_capacity,
            timezone,
            locale,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for priority in Priority::ALL {
            self.thresholds
                .threshold_for(priority)
                .map_err(|_| ConfigError::MissingThreshold(priority))?;
        }
        Ok(())
    }
}

fn parse_positive(var: &str, raw: &str) -> Result<i64, ConfigError> {
    match raw.trim().parse::<i64>() {
        Ok(value) if value > 0 => Ok(value),
        _ => Err(ConfigError::InvalidNumber {
            var: var.to_string(),
            value: raw.to_string(),
        }),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid port number")]
    InvalidPort,

    #[error("{var} must be a positive integer, got {value:?}")]
    InvalidNumber { var: String, value: String },

    #[error("No SLA threshold configured for priority {0}")]
    MissingThreshold(Priority),

    #[error("Unknown time zone: {0}")]
    InvalidTimezone(String),

    #[error("Unknown locale: {0}")]
    InvalidLocale(String),
}
