use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub provider: ProviderConfig,
    pub query: QueryConfig,
    pub catalog: CatalogConfig,
    pub ui: UiConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProviderConfig {
    pub base_url: String,
    pub host: String,
    #[serde(default = "default_key_header")]
    pub key_header: String,
    #[serde(default = "default_host_header")]
    pub host_header: String,
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
    #[serde(skip)]
    pub api_key: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QueryConfig {
    #[serde(default = "default_query_input")]
    pub default_input: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogConfig {
    pub path: String,
    #[serde(default = "default_max_suggestions")]
    pub max_suggestions: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UiConfig {
    pub refresh_rate_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

fn default_key_header() -> String {
    "X-RapidAPI-Key".to_string()
}

fn default_host_header() -> String {
    "X-RapidAPI-Host".to_string()
}

fn default_request_timeout_ms() -> u64 {
    15_000
}

fn default_query_input() -> String {
    "AAPL | Apple Stocks".to_string()
}

fn default_max_suggestions() -> usize {
    8
}

impl ProviderConfig {
    /// The two headers that accompany every request, in a fixed order.
    pub fn auth_headers(&self) -> [(String, String); 2] {
        [
            (self.key_header.clone(), self.api_key.clone()),
            (self.host_header.clone(), self.host.clone()),
        ]
    }

    pub fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            bail!("provider.base_url must not be empty");
        }
        url::Url::parse(&self.base_url)
            .with_context(|| format!("provider.base_url '{}' is not a valid URL", self.base_url))?;
        if self.key_header.trim().is_empty() || self.host_header.trim().is_empty() {
            bail!("provider.key_header and provider.host_header must not be empty");
        }
        if self.key_header.eq_ignore_ascii_case(&self.host_header) {
            bail!("provider.key_header and provider.host_header must differ");
        }
        if self.request_timeout_ms == 0 {
            bail!("provider.request_timeout_ms must be > 0");
        }
        Ok(())
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let config_path = Path::new("config/default.toml");
        let config_str = std::fs::read_to_string(config_path)
            .with_context(|| format!("failed to read {}", config_path.display()))?;

        let mut config = Self::from_toml_str(&config_str)
            .context("failed to parse config/default.toml")?;

        config.provider.api_key = std::env::var("RAPIDAPI_KEY")
            .context("RAPIDAPI_KEY not set in .env or environment")?;

        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Config = toml::from_str(s)?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.provider.validate().context("provider section is invalid")?;
        if self.catalog.max_suggestions == 0 {
            bail!("catalog.max_suggestions must be > 0");
        }
        if self.ui.refresh_rate_ms == 0 {
            bail!("ui.refresh_rate_ms must be > 0");
        }
        Ok(())
    }
}
