use std::str::FromStr;

use dotenvy::dotenv;
use serde::Deserialize;
use sqlx::postgres::PgConnectOptions;

use crate::error::{Error, Result};

fn default_db_name() -> String {
    "manage_client".to_string()
}

fn default_db_host() -> String {
    "localhost".to_string()
}

fn default_db_port() -> u16 {
    5432
}

/// Configuration for the application
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Full connection URL, takes precedence over the individual fields
    pub database_url: Option<String>,
    #[serde(default = "default_db_name")]
    pub db_name: String,
    pub db_user: Option<String>,
    pub db_password: Option<String>,
    #[serde(default = "default_db_host")]
    pub db_host: String,
    #[serde(default = "default_db_port")]
    pub db_port: u16,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Variables from a `.env` file are loaded first if one exists.
    pub fn load() -> Result<Self> {
        dotenv().ok();

        let config = envy::from_env::<Config>()?;

        Ok(config)
    }

    /// Build connection options for the single repository connection
    pub fn connect_options(&self) -> Result<PgConnectOptions> {
        if let Some(url) = &self.database_url {
            return PgConnectOptions::from_str(url)
                .map_err(|err| Error::Config(format!("invalid DATABASE_URL: {err}")));
        }

        let user = self
            .db_user
            .as_deref()
            .ok_or_else(|| Error::Config("DB_USER is not set and no DATABASE_URL given".to_string()))?;

        let mut options = PgConnectOptions::new()
            .host(&self.db_host)
            .port(self.db_port)
            .database(&self.db_name)
            .username(user);
        if let Some(password) = &self.db_password {
            options = options.password(password);
        }

        Ok(options)
    }
}

/// Initialize environment variables and load configuration
pub fn init() -> Result<Config> {
    Config::load()
}
