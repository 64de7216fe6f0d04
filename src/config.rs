use serde::Deserialize;
use url::Url;

const DEFAULT_COMPANY_API_BASE_URL: &str = "https://receita-federal-api.example.com";
const DEFAULT_LEGAL_API_BASE_URL: &str = "https://api.jusbrasil.com";
const DEFAULT_NEWS_API_BASE_URL: &str = "https://newsapi.org";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub port: u16,
    /// Timeout applied to every outbound provider request.
    pub http_timeout_secs: u64,
    pub max_body_bytes: usize,
    pub company_api_base_url: String,
    pub company_api_key: Option<String>,
    pub legal_api_base_url: String,
    pub legal_api_key: Option<String>,
    pub news_api_base_url: String,
    pub news_api_key: Option<String>,
    /// Fill the media section with template data when the news provider fails.
    pub synthetic_media_fallback: bool,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number between 1-65535"))?,
            http_timeout_secs: std::env::var("HTTP_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("HTTP_TIMEOUT_SECS must be a number of seconds"))
                .and_then(|secs: u64| {
                    if secs == 0 {
                        anyhow::bail!("HTTP_TIMEOUT_SECS must be greater than zero");
                    }
                    Ok(secs)
                })?,
            max_body_bytes: std::env::var("MAX_BODY_BYTES")
                .unwrap_or_else(|_| (1024 * 1024).to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("MAX_BODY_BYTES must be a number of bytes"))?,
            company_api_base_url: base_url_var("COMPANY_API_BASE_URL", DEFAULT_COMPANY_API_BASE_URL)?,
            company_api_key: optional_var("RECEITA_FEDERAL_API_KEY"),
            legal_api_base_url: base_url_var("LEGAL_API_BASE_URL", DEFAULT_LEGAL_API_BASE_URL)?,
            legal_api_key: optional_var("JUSBRASIL_API_KEY"),
            news_api_base_url: base_url_var("NEWS_API_BASE_URL", DEFAULT_NEWS_API_BASE_URL)?,
            news_api_key: optional_var("NEWS_API_KEY").or_else(|| optional_var("GOOGLE_NEWS_API_KEY")),
            synthetic_media_fallback: std::env::var("SYNTHETIC_MEDIA_FALLBACK")
                .ok()
                .map(|v| parse_flag(&v))
                .transpose()?
                .unwrap_or(false),
        };

        // Log successful configuration load (without sensitive values)
        tracing::info!("Configuration loaded successfully");
        tracing::debug!("Company API: {}", config.company_api_base_url);
        tracing::debug!("Legal API: {}", config.legal_api_base_url);
        tracing::debug!("News API: {}", config.news_api_base_url);
        for (name, key) in [
            ("RECEITA_FEDERAL_API_KEY", &config.company_api_key),
            ("JUSBRASIL_API_KEY", &config.legal_api_key),
            ("NEWS_API_KEY", &config.news_api_key),
        ] {
            if key.is_none() {
                tracing::warn!("{} not set, that provider will always fall back", name);
            }
        }
        tracing::debug!("Server Port: {}", config.port);

        Ok(config)
    }
}

/// Reads an optional secret; blank values count as absent.
fn optional_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn base_url_var(name: &str, default: &str) -> anyhow::Result<String> {
    let value = std::env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string());
    validate_base_url(name, &value)
}

pub(crate) fn validate_base_url(name: &str, value: &str) -> anyhow::Result<String> {
    let url = Url::parse(value.trim())
        .map_err(|e| anyhow::anyhow!("{} is not a valid URL: {}", name, e))?;
    if url.scheme() != "http" && url.scheme() != "https" {
        anyhow::bail!("{} must start with http:// or https://", name);
    }
    Ok(value.trim().trim_end_matches('/').to_string())
}

fn parse_flag(value: &str) -> anyhow::Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => anyhow::bail!("SYNTHETIC_MEDIA_FALLBACK must be a boolean, got '{}'", other),
    }
}
