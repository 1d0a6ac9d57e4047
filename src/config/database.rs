use crate::core::{AppError, Result};
use mongodb::{options::ClientOptions, Client, Database};
use serde::Deserialize;
use std::env;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub uri: String,
    pub database: String,
}

impl DatabaseConfig {
    pub fn from_env() -> Result<Self> {
        Ok(DatabaseConfig {
            uri: env::var("MONGODB_URI")
                .map_err(|_| AppError::Configuration("MONGODB_URI not set".to_string()))?,
            database: env::var("MONGODB_DATABASE")
                .unwrap_or_else(|_| "mensalidades".to_string()),
        })
    }

    /// Connect to MongoDB and return a handle to the configured database.
    ///
    /// The driver connects lazily; this only validates the connection string
    /// and sets conservative timeouts.
    pub async fn connect(&self) -> Result<Database> {
        let mut options = ClientOptions::parse(&self.uri).await?;
        options.app_name = Some("mensalidades".to_string());
        options.connect_timeout = Some(Duration::from_secs(10));
        options.server_selection_timeout = Some(Duration::from_secs(30));

        let client = Client::with_options(options)?;
        Ok(client.database(&self.database))
    }
}
