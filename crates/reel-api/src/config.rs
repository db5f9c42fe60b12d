//! Service configuration module.
//!
//! Configuration is loaded from environment variables with fallback to
//! defaults.

use serde::{Deserialize, Serialize};
use std::env;

use reel_core::money::PenaltyRate;
use reel_core::pricing::RentalTerms;
use reel_core::{DEFAULT_PENALTY_RATE_BPS, DEFAULT_RETURN_WINDOW_DAYS};

/// Service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// SQLite database file path
    pub database_path: String,

    /// JWT secret key for signing session tokens
    pub jwt_secret: String,

    /// JWT token lifetime in seconds
    pub jwt_lifetime_secs: i64,

    /// Days from rental creation to the due date
    pub return_window_days: i64,

    /// Late-return penalty per day, in basis points of the price paid
    pub penalty_rate_bps: u32,
}

impl ServiceConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let config = ServiceConfig {
            database_path: env::var("REEL_DATABASE_PATH")
                .unwrap_or_else(|_| "./data/reel.db".to_string()),

            jwt_secret: env::var("REEL_JWT_SECRET").unwrap_or_else(|_| {
                // In production, this MUST be set via environment variable
                "reel-dev-secret-change-in-production".to_string()
            }),

            jwt_lifetime_secs: env::var("REEL_JWT_LIFETIME_SECS")
                .unwrap_or_else(|_| "3600".to_string()) // 1 hour
                .parse()
                .map_err(|_| ConfigError::InvalidValue("REEL_JWT_LIFETIME_SECS".to_string()))?,

            return_window_days: env::var("RETURN_WINDOW_DAYS")
                .unwrap_or_else(|_| DEFAULT_RETURN_WINDOW_DAYS.to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("RETURN_WINDOW_DAYS".to_string()))?,

            penalty_rate_bps: env::var("PENALTY_RATE_BPS")
                .unwrap_or_else(|_| DEFAULT_PENALTY_RATE_BPS.to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("PENALTY_RATE_BPS".to_string()))?,
        };

        if config.return_window_days <= 0 {
            return Err(ConfigError::InvalidValue("RETURN_WINDOW_DAYS".to_string()));
        }

        Ok(config)
    }

    /// The rental policy this deployment applies to new orders.
    pub fn rental_terms(&self) -> RentalTerms {
        RentalTerms {
            return_window_days: self.return_window_days,
            penalty_rate: PenaltyRate::from_bps(self.penalty_rate_bps),
        }
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        ServiceConfig {
            database_path: "./data/reel.db".to_string(),
            jwt_secret: "reel-dev-secret-change-in-production".to_string(),
            jwt_lifetime_secs: 3600,
            return_window_days: DEFAULT_RETURN_WINDOW_DAYS,
            penalty_rate_bps: DEFAULT_PENALTY_RATE_BPS,
        }
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),
}
