use std::env;

use crate::error::{GatewayError, Result};

const DEFAULT_PORT: u16 = 3000;

/// Service configuration, built once at startup and injected into the router
/// state. Nothing reads the environment after this point.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// Base URL the available-slots handler fetches the upstream payload from.
    /// Defaults to this process, which also serves the mock upstream route.
    pub upstream_url: String,
    /// Allow-list for the X-API-Key check. Comma-separated in API_KEYS.
    pub api_keys: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let port = match env::var("PORT") {
            Ok(raw) => raw.parse().map_err(|_| {
                GatewayError::Config(format!("PORT must be a number, got '{raw}'"))
            })?,
            Err(_) => DEFAULT_PORT,
        };

        let upstream_url =
            env::var("UPSTREAM_URL").unwrap_or_else(|_| format!("http://127.0.0.1:{port}"));

        let api_keys = env::var("API_KEYS")
            .map(|raw| parse_api_keys(&raw))
            .unwrap_or_default();

        Ok(Self {
            port,
            upstream_url,
            api_keys,
        })
    }
}

fn parse_api_keys(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|key| key.trim().to_string())
        .filter(|key| !key.is_empty())
        .collect()
}
