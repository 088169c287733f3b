use std::env;
use std::net::SocketAddr;

use claimlens_core::connection::{ConnectionConfig, TokenType};
use claimlens_core::error::CoreError;

const DEFAULT_BIND: &str = "0.0.0.0:8080";

/// Runtime settings read from the process environment.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub connection: ConnectionConfig,
    pub bind: SocketAddr,
    pub log_json: bool,
}

impl ServerConfig {
    pub fn from_env() -> eyre::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the config from any key lookup. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> eyre::Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let require = |key: &str| get(key).ok_or_else(|| CoreError::MissingSetting(key.to_string()));

        let token_type = match get("SNOWFLAKE_TOKEN_TYPE") {
            Some(raw) => TokenType::parse(&raw)
                .ok_or_else(|| eyre::eyre!("unsupported SNOWFLAKE_TOKEN_TYPE: {raw}"))?,
            None => TokenType::ProgrammaticAccessToken,
        };

        let connection = ConnectionConfig {
            account_url: require("SNOWFLAKE_ACCOUNT_URL")?,
            token: require("SNOWFLAKE_TOKEN")?,
            token_type,
            warehouse: get("SNOWFLAKE_WAREHOUSE"),
            role: get("SNOWFLAKE_ROLE"),
        };

        let bind_raw = get("CLAIMLENS_BIND").unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind = bind_raw
            .parse()
            .map_err(|e| eyre::eyre!("invalid CLAIMLENS_BIND {bind_raw:?}: {e}"))?;

        let log_json = get("CLAIMLENS_LOG_JSON")
            .is_some_and(|v| matches!(v.as_str(), "1" | "true" | "TRUE" | "yes"));

        Ok(Self {
            connection,
            bind,
            log_json,
        })
    }
}
