use dotenv::dotenv;
use std::env;
use std::net::SocketAddr;

use crate::error::ConfigError;

pub const DEFAULT_STREAM_ENDPOINT: &str = "https://video.stream-io-api.com";
pub const DEFAULT_CALL_TYPE: &str = "default";
pub const DEFAULT_CLERK_ENDPOINT: &str = "https://api.clerk.com";
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:3000";

#[derive(Debug, Clone)]
pub struct StreamConfig {
    pub api_key: String,
    pub api_secret: String,
    pub endpoint: String,
    pub call_type: String,
}

#[derive(Debug, Clone)]
pub struct ClerkConfig {
    pub secret_key: String,
    pub endpoint: String,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub stream: StreamConfig,
    pub clerk: ClerkConfig,
    pub bind_address: SocketAddr,
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    env::var(name)
        .ok()
        .filter(|value| !value.is_empty())
        .ok_or(ConfigError::Missing(name))
}

fn optional(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

impl AppConfig {
    /// Load configuration from the environment, reading `.env` first if present
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();

        let stream = StreamConfig {
            api_key: required("STREAM_API_KEY")?,
            api_secret: required("STREAM_API_SECRET")?,
            endpoint: optional("STREAM_API_ENDPOINT", DEFAULT_STREAM_ENDPOINT),
            call_type: optional("STREAM_CALL_TYPE", DEFAULT_CALL_TYPE),
        };

        let clerk = ClerkConfig {
            secret_key: required("CLERK_SECRET_KEY")?,
            endpoint: optional("CLERK_API_ENDPOINT", DEFAULT_CLERK_ENDPOINT),
        };

        let bind_address = optional("BIND_ADDRESS", DEFAULT_BIND_ADDRESS)
            .parse()
            .map_err(|_| ConfigError::Invalid("BIND_ADDRESS"))?;

        Ok(Self {
            stream,
            clerk,
            bind_address,
        })
    }
}
