use crate::cnpj::Cnpj;
use bigdecimal::BigDecimal;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

// ============ Company ============

/// Identity and registry facts for a company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompanyRecord {
    /// Legal name.
    pub name: String,
    /// Canonical 14-digit CNPJ.
    #[schema(value_type = String, example = "07526557000100")]
    pub cnpj: Cnpj,
    /// Display form `NN.NNN.NNN/NNNN-NN`.
    pub cnpj_formatted: String,
    pub legal_nature: String,
    /// Share capital in BRL; `None` when the registry does not report it.
    #[serde(default)]
    #[schema(value_type = Option<String>, example = "100000")]
    pub capital: Option<BigDecimal>,
    pub founding_date: Option<NaiveDate>,
    /// Registration status as reported by the registry (e.g. "Ativa").
    pub status: String,
    pub address: Address,
    #[serde(default)]
    pub partners: Vec<Partner>,
    #[serde(default)]
    pub activities: Vec<Activity>,
    #[serde(default)]
    pub financial: Option<FinancialSnapshot>,
    #[serde(default)]
    pub partnerships: Vec<Partnership>,
}

/// Postal address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub street: String,
    pub number: String,
    pub complement: String,
    pub neighborhood: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
}

/// A partner (sócio) listed in the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Partner {
    pub name: String,
    /// CPF or CNPJ of the partner, as reported.
    pub document: String,
    /// Role, e.g. "Sócio Administrador".
    #[serde(rename = "type")]
    pub role: String,
}

/// An economic activity (CNAE) registered for the company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub code: String,
    pub description: String,
    /// Whether this is the primary activity.
    pub is_main: bool,
}

/// Headline financial figures, when known.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FinancialSnapshot {
    #[schema(value_type = String)]
    pub revenue: BigDecimal,
    #[schema(value_type = String)]
    pub profit: BigDecimal,
    pub employees: u32,
    pub last_update: NaiveDate,
}

/// A partnership, acquisition or similar corporate event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Partnership {
    pub company: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub date: NaiveDate,
    pub description: String,
}

// ============ Legal ============

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Lawsuit {
    pub number: String,
    pub court: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub status: String,
    /// Filing date.
    pub date: NaiveDate,
    /// Amount in dispute, in BRL.
    #[schema(value_type = String)]
    pub value: BigDecimal,
    #[serde(default)]
    pub parties: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CourtOrder {
    pub number: String,
    pub court: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub status: String,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Bankruptcy {
    pub status: String,
    pub date: NaiveDate,
    pub court: String,
}

/// Court records. `bankruptcy` is `None` when there is no bankruptcy filing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LegalRecord {
    #[serde(default)]
    pub lawsuits: Vec<Lawsuit>,
    #[serde(default)]
    pub court_orders: Vec<CourtOrder>,
    #[serde(default)]
    pub bankruptcy: Option<Bankruptcy>,
}

// ============ Media ============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct NewsItem {
    pub title: String,
    pub source: String,
    pub date: NaiveDate,
    pub url: String,
    #[serde(default)]
    pub summary: String,
    pub sentiment: Sentiment,
}

/// Mention summary for one social platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SocialMention {
    pub platform: String,
    pub mentions: u64,
    pub sentiment: Sentiment,
    pub last_mention: NaiveDate,
}

/// Complaint totals for one complaint site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ComplaintSummary {
    pub source: String,
    pub count: u64,
    pub last_complaint: NaiveDate,
    pub url: String,
    /// Reputation label: BOM, REGULAR or RUIM.
    pub status: String,
    /// Percentage of complaints resolved (0-100).
    pub resolution: u8,
    pub details: ComplaintBreakdown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ComplaintBreakdown {
    pub resolved: u64,
    pub pending: u64,
    pub not_resolved: u64,
    /// E.g. "36h".
    pub average_response_time: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MediaRecord {
    #[serde(default)]
    pub news: Vec<NewsItem>,
    #[serde(default)]
    pub social_media: Vec<SocialMention>,
    #[serde(default)]
    pub complaints: Vec<ComplaintSummary>,
}

// ============ Risk ============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

/// Qualitative reading of the risk score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum RiskBand {
    Low,
    Moderate,
    High,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Warning {
    #[serde(rename = "type")]
    pub severity: Severity,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Recommendation {
    pub priority: Priority,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
}

/// Score, warnings and recommendations for a company.
///
/// The score runs from 0 to `scale` (always 100); higher means lower risk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessment {
    pub risk_score: u8,
    pub scale: u8,
    pub band: RiskBand,
    pub warnings: Vec<Warning>,
    pub recommendations: Vec<Recommendation>,
}

// ============ Dossier ============

/// Where the data of a dossier section came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Provenance {
    /// The provider answered.
    Live,
    /// Fixed demonstration dataset for a well-known CNPJ.
    Illustrative,
    /// Generated from templates after the provider failed.
    Synthetic,
    /// The provider failed and the section is empty.
    Unavailable,
}

impl Provenance {
    pub fn is_simulated(self) -> bool {
        matches!(self, Provenance::Illustrative | Provenance::Synthetic)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SectionProvenance {
    pub company: Provenance,
    pub legal: Provenance,
    pub media: Provenance,
}

/// The assembled report. Immutable once built and never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Dossier {
    pub report_id: Uuid,
    #[serde(flatten)]
    pub company: CompanyRecord,
    pub disclaimer: String,
    pub legal: LegalRecord,
    pub media: MediaRecord,
    pub risk: RiskAssessment,
    pub provenance: SectionProvenance,
    pub generated_at: DateTime<Utc>,
}

// ============ API Request/Response Models ============

/// Request body for `POST /api/cnpj`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CnpjRequest {
    #[schema(example = "07.526.557/0001-00")]
    pub cnpj: Option<String>,
}
