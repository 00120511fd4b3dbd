//! Environment-driven configuration.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};

const DEFAULT_BIND: &str = "127.0.0.1:3000";
const DEFAULT_POLL_SECS: u64 = 15;
const DEFAULT_ADMIN_PHONE: &str = "Dujao";
const DEFAULT_ADMIN_PASSWORD: &str = "3003";

#[derive(Debug, Clone)]
pub struct Config {
    /// Remote store connection URL. Absent means local-only mode.
    pub db_url: Option<String>,
    /// Directory for the local JSON fallback files.
    pub data_dir: PathBuf,
    pub bind: SocketAddr,
    /// Cache refresh cadence for the polling synchronizer.
    pub poll_secs: u64,
    pub admin_phone: String,
    pub admin_password: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let db_url = std::env::var("LAVAJATO_DB_URL").ok().filter(|s| !s.is_empty());
        let data_dir = match std::env::var("LAVAJATO_DATA_DIR") {
            Ok(dir) => PathBuf::from(dir),
            Err(_) => default_data_dir()?,
        };
        let bind = std::env::var("LAVAJATO_BIND")
            .unwrap_or_else(|_| DEFAULT_BIND.to_string())
            .parse()
            .context("LAVAJATO_BIND is not a valid socket address")?;
        let poll_secs = match std::env::var("LAVAJATO_POLL_SECS") {
            Ok(raw) => raw.parse().context("LAVAJATO_POLL_SECS is not a number")?,
            Err(_) => DEFAULT_POLL_SECS,
        };
        let admin_phone = std::env::var("LAVAJATO_ADMIN_PHONE")
            .unwrap_or_else(|_| DEFAULT_ADMIN_PHONE.to_string());
        let admin_password = std::env::var("LAVAJATO_ADMIN_PASSWORD")
            .unwrap_or_else(|_| DEFAULT_ADMIN_PASSWORD.to_string());

        Ok(Self {
            db_url,
            data_dir,
            bind,
            poll_secs,
            admin_phone,
            admin_password,
        })
    }
}

fn default_data_dir() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME is not set and LAVAJATO_DATA_DIR is unset")?;
    Ok(PathBuf::from(home).join(".lavajato"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_bind_parses() {
        let bind: SocketAddr = DEFAULT_BIND.parse().unwrap();
        assert_eq!(bind.port(), 3000);
    }
}
