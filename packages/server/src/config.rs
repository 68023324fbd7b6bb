use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// Gemini credential. Optional at startup so the auth endpoints keep
    /// working without it; /chat reports its absence as a 500.
    pub gemini_api_key: Option<String>,
    pub email_server_host: String,
    pub email_server_port: u16,
    pub email_server_user: String,
    pub email_server_password: String,
    pub email_from: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            gemini_api_key: env::var("GEMINI_API_KEY").ok(),
            // Mail settings default to empty: a misconfigured transport
            // surfaces as a delivery failure on the first send call.
            email_server_host: env::var("EMAIL_SERVER_HOST").unwrap_or_default(),
            email_server_port: env::var("EMAIL_SERVER_PORT")
                .unwrap_or_else(|_| "587".to_string())
                .parse()
                .context("EMAIL_SERVER_PORT must be a valid number")?,
            email_server_user: env::var("EMAIL_SERVER_USER").unwrap_or_default(),
            email_server_password: env::var("EMAIL_SERVER_PASSWORD").unwrap_or_default(),
            email_from: env::var("EMAIL_FROM").unwrap_or_default(),
        })
    }
}
