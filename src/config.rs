use std::path::Path;

use anyhow::{Result, bail};

use crate::constants::*;
use crate::database::DatabaseLocation;

/// Server settings read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database: DatabaseLocation,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from any key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let host = var("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = var("PORT").unwrap_or_else(|| DEFAULT_PORT.to_string());
        let port: u16 = port
            .trim()
            .parse()
            .map_err(|_| anyhow::anyhow!("PORT must be a number between 0 and 65535, got {port:?}"))?;

        let database = match var("DATABASE_URL") {
            Some(url) if is_remote_url(&url) => DatabaseLocation::Remote {
                url,
                auth_token: var("DATABASE_AUTH_TOKEN").unwrap_or_default(),
            },
            Some(url) => bail!("DATABASE_URL must start with one of {REMOTE_URL_SCHEMES:?}, got {url:?}"),
            None => {
                let data_path = var("DATA_PATH").unwrap_or_else(|| DEFAULT_DATA_PATH.to_string());
                let db_name = var("DB_NAME").unwrap_or_else(|| DEFAULT_DB_NAME.to_string());
                validate_db_name(&db_name)?;
                DatabaseLocation::Local(Path::new(&data_path).join(format!("{db_name}.db")))
            }
        };

        Ok(Self {
            host,
            port,
            database,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn is_remote_url(url: &str) -> bool {
    REMOTE_URL_SCHEMES
        .iter()
        .any(|scheme| url.starts_with(scheme))
}

fn validate_db_name(name: &str) -> Result<()> {
    let valid = name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if !valid {
        bail!("DB_NAME may only contain ASCII letters, digits, '_' or '-', got {name:?}");
    }
    Ok(())
}
