//! HTTP clients for the three data providers: company registry, legal records
//! and news. Every client is built once at startup and shared by reference.
//!
//! Clients return [`ProviderError`] on any failure, including a missing API
//! key. The aggregator decides what to substitute; nothing here retries.

use crate::cnpj::Cnpj;
use crate::config::Config;
use crate::errors::{AppError, ResultExt};
use crate::models::*;
use bigdecimal::BigDecimal;
use chrono::{DateTime, NaiveDate, Utc};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Failure of a single provider call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    /// No API key configured for the provider.
    MissingCredential(&'static str),
    /// The request could not be sent or the connection failed.
    Transport(String),
    /// The provider answered with a non-2xx status.
    Status { status: u16, body: String },
    /// The response body did not match the expected shape.
    Decode(String),
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderError::MissingCredential(name) => write!(f, "{} not configured", name),
            ProviderError::Transport(msg) => write!(f, "request failed: {}", msg),
            ProviderError::Status { status, body } => {
                write!(f, "provider returned status {}: {}", status, body)
            }
            ProviderError::Decode(msg) => write!(f, "failed to parse response: {}", msg),
        }
    }
}

impl std::error::Error for ProviderError {}

fn build_client(config: &Config) -> Result<Client, AppError> {
    Client::builder()
        .timeout(Duration::from_secs(config.http_timeout_secs))
        .build()
        .with_context(|| {
            format!(
                "Failed to create HTTP client ({}s timeout)",
                config.http_timeout_secs
            )
        })
}

/// Sends a GET request and decodes a JSON body, mapping every failure mode
/// to a [`ProviderError`].
async fn get_json<T: DeserializeOwned>(
    request: reqwest::RequestBuilder,
    provider: &str,
) -> Result<T, ProviderError> {
    let response = request
        .send()
        .await
        .map_err(|e| ProviderError::Transport(e.to_string()))?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        tracing::warn!("{} returned error {}: {}", provider, status, body);
        return Err(ProviderError::Status {
            status: status.as_u16(),
            body,
        });
    }

    response
        .json::<T>()
        .await
        .map_err(|e| ProviderError::Decode(e.to_string()))
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(raw, "%d/%m/%Y"))
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|d| d.date_naive()))
}

fn non_empty(value: Option<String>, default: &str) -> String {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Accepts a JSON number or a numeric string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum Amount {
    Number(f64),
    Text(String),
}

impl Amount {
    fn to_decimal(&self) -> Option<BigDecimal> {
        match self {
            Amount::Number(n) => BigDecimal::from_str(&n.to_string()).ok(),
            Amount::Text(s) => BigDecimal::from_str(s.trim()).ok(),
        }
    }
}

// ============ Company registry ============

#[derive(Debug, Deserialize)]
struct RegistryResponse {
    nome: Option<String>,
    natureza_juridica: Option<String>,
    capital_social: Option<Amount>,
    data_abertura: Option<String>,
    situacao: Option<String>,
    #[serde(default)]
    endereco: RegistryAddress,
    #[serde(default)]
    socios: Vec<RegistryPartner>,
    #[serde(default)]
    atividades: Vec<RegistryActivity>,
}

#[derive(Debug, Default, Deserialize)]
struct RegistryAddress {
    logradouro: Option<String>,
    numero: Option<String>,
    complemento: Option<String>,
    bairro: Option<String>,
    municipio: Option<String>,
    uf: Option<String>,
    cep: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RegistryPartner {
    nome: String,
    #[serde(default)]
    cpf: String,
    #[serde(default)]
    tipo: String,
}

#[derive(Debug, Deserialize)]
struct RegistryActivity {
    codigo: String,
    descricao: String,
    #[serde(default)]
    principal: bool,
}

impl RegistryResponse {
    /// Maps the registry payload onto a `CompanyRecord`, filling gaps with
    /// neutral placeholders.
    fn into_record(self, cnpj: &Cnpj) -> CompanyRecord {
        let address = self.endereco;
        CompanyRecord {
            name: non_empty(self.nome, &format!("Empresa {}", cnpj.formatted())),
            cnpj: cnpj.clone(),
            cnpj_formatted: cnpj.formatted(),
            legal_nature: non_empty(self.natureza_juridica, "Sociedade Empresária Limitada"),
            capital: self.capital_social.and_then(|c| c.to_decimal()),
            founding_date: self.data_abertura.as_deref().and_then(parse_date),
            status: non_empty(self.situacao, "Ativa"),
            address: Address {
                street: non_empty(address.logradouro, "Endereço não disponível"),
                number: non_empty(address.numero, "S/N"),
                complement: address.complemento.unwrap_or_default().trim().to_string(),
                neighborhood: non_empty(address.bairro, "Bairro não disponível"),
                city: non_empty(address.municipio, "Cidade não disponível"),
                state: non_empty(address.uf, "SP"),
                zip_code: non_empty(address.cep, "00000-000"),
            },
            partners: self
                .socios
                .into_iter()
                .map(|s| Partner {
                    name: s.nome,
                    document: s.cpf,
                    role: s.tipo,
                })
                .collect(),
            activities: self
                .atividades
                .into_iter()
                .map(|a| Activity {
                    code: a.codigo,
                    description: a.descricao,
                    is_main: a.principal,
                })
                .collect(),
            financial: None,
            partnerships: Vec::new(),
        }
    }
}

/// Client for the federal company registry (Receita Federal).
#[derive(Clone)]
pub struct CompanyRegistryService {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl CompanyRegistryService {
    pub fn new(config: &Config) -> Result<Self, AppError> {
        Ok(Self {
            client: build_client(config)?,
            base_url: config.company_api_base_url.clone(),
            api_key: config.company_api_key.clone(),
        })
    }

    /// Fetch registry data for a CNPJ.
    pub async fn fetch_company(&self, cnpj: &Cnpj) -> Result<CompanyRecord, ProviderError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(ProviderError::MissingCredential("RECEITA_FEDERAL_API_KEY"))?;

        let url = format!("{}/v1/cnpj/{}", self.base_url, cnpj.digits());
        tracing::info!("Fetching registry data for CNPJ: {}", cnpj);

        let request = self.client.get(&url).bearer_auth(api_key);
        let data: RegistryResponse = get_json(request, "Company registry").await?;

        tracing::info!("Successfully fetched registry data for {}", cnpj);
        Ok(data.into_record(cnpj))
    }
}

// ============ Legal records ============

#[derive(Debug, Deserialize)]
struct LegalResponse {
    #[serde(default)]
    processos: Vec<LegalCase>,
    #[serde(default)]
    mandados: Vec<LegalCase>,
    falencia: Option<LegalBankruptcy>,
}

#[derive(Debug, Deserialize)]
struct LegalCase {
    numero: String,
    tribunal: String,
    tipo: String,
    status: String,
    data: String,
    valor: Option<Amount>,
    #[serde(default)]
    partes: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct LegalBankruptcy {
    status: String,
    data: String,
    tribunal: String,
}

impl LegalResponse {
    fn into_record(self) -> Result<LegalRecord, ProviderError> {
        let date = |raw: &str| {
            parse_date(raw).ok_or_else(|| ProviderError::Decode(format!("invalid date '{}'", raw)))
        };

        let lawsuits = self
            .processos
            .into_iter()
            .map(|p| -> Result<Lawsuit, ProviderError> {
                Ok(Lawsuit {
                    date: date(&p.data)?,
                    number: p.numero,
                    court: p.tribunal,
                    kind: p.tipo,
                    status: p.status,
                    value: p.valor.and_then(|v| v.to_decimal()).unwrap_or_default(),
                    parties: p.partes,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let court_orders = self
            .mandados
            .into_iter()
            .map(|m| -> Result<CourtOrder, ProviderError> {
                Ok(CourtOrder {
                    date: date(&m.data)?,
                    number: m.numero,
                    court: m.tribunal,
                    kind: m.tipo,
                    status: m.status,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let bankruptcy = match self.falencia {
            Some(f) => Some(Bankruptcy {
                date: date(&f.data)?,
                status: f.status,
                court: f.tribunal,
            }),
            None => None,
        };

        Ok(LegalRecord {
            lawsuits,
            court_orders,
            bankruptcy,
        })
    }
}

/// Client for the court-records provider (JusBrasil).
#[derive(Clone)]
pub struct LegalRecordsService {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl LegalRecordsService {
    pub fn new(config: &Config) -> Result<Self, AppError> {
        Ok(Self {
            client: build_client(config)?,
            base_url: config.legal_api_base_url.clone(),
            api_key: config.legal_api_key.clone(),
        })
    }

    /// Fetch lawsuits, court orders and bankruptcy status for a CNPJ.
    pub async fn fetch_legal(&self, cnpj: &Cnpj) -> Result<LegalRecord, ProviderError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(ProviderError::MissingCredential("JUSBRASIL_API_KEY"))?;

        let url = format!("{}/v1/empresa/{}/processos", self.base_url, cnpj.digits());
        tracing::info!("Fetching legal records for CNPJ: {}", cnpj);

        let request = self.client.get(&url).bearer_auth(api_key);
        let data: LegalResponse = get_json(request, "Legal records").await?;
        let record = data.into_record()?;

        tracing::info!(
            "Legal records for {}: {} lawsuits, {} court orders",
            cnpj,
            record.lawsuits.len(),
            record.court_orders.len()
        );
        Ok(record)
    }
}

// ============ Media ============

const POSITIVE_WORDS: [&str; 7] = [
    "crescimento",
    "lucro",
    "sucesso",
    "inovação",
    "sustentável",
    "premiada",
    "líder",
];

const NEGATIVE_WORDS: [&str; 6] = [
    "multa",
    "processo",
    "reclamação",
    "prejuízo",
    "investigação",
    "denúncia",
];

/// Keyword sentiment: +1 per positive word present, -1 per negative word.
pub fn classify_sentiment(text: &str) -> Sentiment {
    let lower = text.to_lowercase();
    let positive = POSITIVE_WORDS.iter().filter(|w| lower.contains(*w)).count() as i32;
    let negative = NEGATIVE_WORDS.iter().filter(|w| lower.contains(*w)).count() as i32;

    match (positive - negative).signum() {
        1 => Sentiment::Positive,
        -1 => Sentiment::Negative,
        _ => Sentiment::Neutral,
    }
}

#[derive(Debug, Deserialize)]
struct NewsResponse {
    #[serde(default)]
    articles: Vec<NewsArticle>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NewsArticle {
    title: Option<String>,
    source: Option<NewsSource>,
    published_at: Option<String>,
    url: Option<String>,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NewsSource {
    name: Option<String>,
}

impl NewsArticle {
    fn into_item(self, today: NaiveDate) -> Option<NewsItem> {
        let title = self.title.filter(|t| !t.trim().is_empty())?;
        let summary = self.description.unwrap_or_default();
        let sentiment = classify_sentiment(&format!("{} {}", title, summary));
        Some(NewsItem {
            sentiment,
            date: self
                .published_at
                .as_deref()
                .and_then(parse_date)
                .unwrap_or(today),
            source: self
                .source
                .and_then(|s| s.name)
                .unwrap_or_else(|| "Desconhecida".to_string()),
            url: self.url.unwrap_or_default(),
            title,
            summary,
        })
    }
}

/// Client for the news provider. Social media and complaint sites have no
/// integration, so live media records carry news only.
#[derive(Clone)]
pub struct MediaService {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl MediaService {
    pub fn new(config: &Config) -> Result<Self, AppError> {
        Ok(Self {
            client: build_client(config)?,
            base_url: config.news_api_base_url.clone(),
            api_key: config.news_api_key.clone(),
        })
    }

    /// Fetch recent Portuguese-language news mentioning the company.
    pub async fn fetch_media(
        &self,
        cnpj: &Cnpj,
        company_name: &str,
    ) -> Result<MediaRecord, ProviderError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(ProviderError::MissingCredential("NEWS_API_KEY"))?;

        // Build URL with proper parameter encoding to prevent injection attacks
        let url = reqwest::Url::parse_with_params(
            &format!("{}/v2/everything", self.base_url),
            &[
                ("q", company_name),
                ("apiKey", api_key),
                ("language", "pt"),
                ("sortBy", "publishedAt"),
            ],
        )
        .map_err(|e| ProviderError::Transport(format!("Failed to build URL: {}", e)))?;

        tracing::info!("Fetching news for {} ({})", company_name, cnpj);
        // Redact key from logs to prevent credential exposure
        tracing::debug!(
            "News URL: {}/v2/everything?q={}&apiKey=[REDACTED]",
            self.base_url,
            company_name
        );

        let data: NewsResponse = get_json(self.client.get(url), "News API").await?;
        let today = Utc::now().date_naive();
        let news: Vec<NewsItem> = data
            .articles
            .into_iter()
            .filter_map(|a| a.into_item(today))
            .collect();

        tracing::info!("Fetched {} news items for {}", news.len(), company_name);
        Ok(MediaRecord {
            news,
            social_media: Vec::new(),
            complaints: Vec::new(),
        })
    }
}

/// True when a registration status denotes an active company.
pub fn is_active_status(status: &str) -> bool {
    matches!(
        status.trim().to_lowercase().as_str(),
        "ativa" | "ativo" | "active" | "02"
    )
}
