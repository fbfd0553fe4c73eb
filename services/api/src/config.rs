use serde::Deserialize;

use yamdb_core::config::Config;

/// API service configuration loaded from environment variables.
#[derive(Debug, Deserialize)]
pub struct ApiConfig {
    /// PostgreSQL connection URL. Env var: `DATABASE_URL`.
    pub database_url: String,
    /// Signs access tokens and confirmation codes. Env var: `SECRET_KEY`.
    pub secret_key: String,
    /// HTTP port (default 8000). Env var: `API_PORT`.
    #[serde(default = "default_api_port")]
    pub api_port: u16,
    /// Access-token lifetime (default one day).
    #[serde(default = "default_access_token_ttl")]
    pub access_token_ttl_secs: u64,
    /// Confirmation-code lifetime (default three days).
    #[serde(default = "default_confirmation_code_ttl")]
    pub confirmation_code_ttl_secs: u64,
}

fn default_api_port() -> u16 {
    8000
}

fn default_access_token_ttl() -> u64 {
    24 * 60 * 60
}

fn default_confirmation_code_ttl() -> u64 {
    3 * 24 * 60 * 60
}

impl Config for ApiConfig {}
