use anyhow::{bail, Context, Result};
use reqwest::Url;

pub const DEFAULT_API_URL: &str = "http://localhost:5000";

/// Client configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: Url,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_values(
            std::env::var("JOBFINDER_API_URL").ok(),
            std::env::var("RUST_LOG").ok(),
        )
    }

    fn from_values(api_url: Option<String>, rust_log: Option<String>) -> Result<Self> {
        let raw = api_url.unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let api_base_url = Url::parse(&raw)
            .with_context(|| format!("JOBFINDER_API_URL '{raw}' is not a valid URL"))?;
        if !matches!(api_base_url.scheme(), "http" | "https") {
            bail!("JOBFINDER_API_URL must use http or https, got '{raw}'");
        }

        Ok(Config {
            api_base_url,
            rust_log: rust_log.unwrap_or_else(|| "info".to_string()),
        })
    }
}
