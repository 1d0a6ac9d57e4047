use serde::Deserialize;
use std::env;
use std::path::PathBuf;

use crate::core::Result;

pub mod database;
pub mod server;

pub use database::DatabaseConfig;
pub use server::ServerConfig;

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub report: ReportConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub env: String,
    pub log_level: String,
}

/// Configuration for the PDF report endpoint
#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// Optional logo asset; a missing file is a warning, not an error
    pub logo_path: PathBuf,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        Ok(Config {
            app: AppConfig {
                env: env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
                log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            },
            database: DatabaseConfig::from_env()?,
            server: ServerConfig::from_env()?,
            report: ReportConfig {
                logo_path: env::var("LOGO_PATH")
                    .unwrap_or_else(|_| "assets/logo.jpg".to_string())
                    .into(),
            },
        })
    }
}
