use std::{net::SocketAddr, path::PathBuf};

use mfolio_connect::KiteCredentials;
use mfolio_core::errors::{Error, Result, ValidationError};
use mfolio_core::funds::Account;

const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:9876";
const DEFAULT_DATA_DIR: &str = ".";
const DEFAULT_STATIC_DIR: &str = "ui/dist";

pub struct Config {
    pub listen_addr: SocketAddr,
    pub data_dir: PathBuf,
    pub static_dir: String,
    pub classification_rules: Option<PathBuf>,
    pub equity_credentials: KiteCredentials,
    pub debt_credentials: KiteCredentials,
}

impl Config {
    /// Read the configuration from the process environment, after loading
    /// an optional `.env` file.
    ///
    /// Broker credentials are required; a missing or empty one is
    /// `ConfigMissing`.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from any key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let required = |key: &str| var(key).ok_or_else(|| Error::ConfigMissing(key.to_string()));

        let listen_addr: SocketAddr = var("MF_LISTEN_ADDR")
            .unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string())
            .parse()
            .map_err(|e| ValidationError::InvalidInput(format!("MF_LISTEN_ADDR: {}", e)))?;
        let data_dir = var("MF_DATA_DIR").unwrap_or_else(|| DEFAULT_DATA_DIR.into());
        let static_dir = var("MF_STATIC_DIR").unwrap_or_else(|| DEFAULT_STATIC_DIR.into());
        let classification_rules = var("MF_CLASSIFICATION_RULES").map(PathBuf::from);

        let equity_credentials = KiteCredentials::new(
            required("EQ_KITE_API_KEY")?,
            required("EQ_KITE_API_SECRET")?,
        );
        let debt_credentials = KiteCredentials::new(
            required("DEBT_KITE_API_KEY")?,
            required("DEBT_KITE_API_SECRET")?,
        );

        Ok(Self {
            listen_addr,
            data_dir: PathBuf::from(data_dir),
            static_dir,
            classification_rules,
            equity_credentials,
            debt_credentials,
        })
    }

    pub fn credentials(&self, account: Account) -> &KiteCredentials {
        match account {
            Account::Equity => &self.equity_credentials,
            Account::Debt => &self.debt_credentials,
        }
    }
}
