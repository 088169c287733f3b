use serde::{Deserialize, Serialize};

/// How the bearer token presented to the warehouse was issued.
///
/// Serialized as the value of the `X-Snowflake-Authorization-Token-Type`
/// header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenType {
    ProgrammaticAccessToken,
    KeypairJwt,
    Oauth,
}

impl TokenType {
    pub fn header_value(self) -> &'static str {
        match self {
            TokenType::ProgrammaticAccessToken => "PROGRAMMATIC_ACCESS_TOKEN",
            TokenType::KeypairJwt => "KEYPAIR_JWT",
            TokenType::Oauth => "OAUTH",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "PROGRAMMATIC_ACCESS_TOKEN" | "PAT" => Some(TokenType::ProgrammaticAccessToken),
            "KEYPAIR_JWT" | "JWT" => Some(TokenType::KeypairJwt),
            "OAUTH" => Some(TokenType::Oauth),
            _ => None,
        }
    }
}

/// Account endpoint and credentials shared by the statement and analyst
/// clients.
#[derive(Clone, Serialize, Deserialize)]
pub struct ConnectionConfig {
    /// Account base URL, e.g. `https://myorg-myaccount.snowflakecomputing.com`.
    pub account_url: String,
    pub token: String,
    pub token_type: TokenType,
    #[serde(default)]
    pub warehouse: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

impl ConnectionConfig {
    /// Join an API path onto the account URL.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.account_url.trim_end_matches('/'))
    }
}

impl std::fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("account_url", &self.account_url)
            .field("token", &redact_token(&self.token))
            .field("token_type", &self.token_type)
            .field("warehouse", &self.warehouse)
            .field("role", &self.role)
            .finish()
    }
}

/// Keep only the first and last four characters of a secret.
pub fn redact_token(token: &str) -> String {
    if token.len() <= 8 || !token.is_ascii() {
        return "****".to_string();
    }
    let prefix = &token[..4];
    let suffix = &token[token.len() - 4..];
    format!("{prefix}...{suffix}")
}
