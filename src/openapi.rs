use crate::errors::ApiErrorBody;
use crate::handlers;
use crate::models::*;
use crate::presentation::{Color, DossierSummary, Layout, SummaryWarning};
use utoipa::OpenApi;

/// OpenAPI document served at `/api-docs/openapi.json`.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "CNPJ Dossier API",
        description = "Business dossiers for Brazilian companies identified by CNPJ"
    ),
    paths(
        handlers::health,
        handlers::generate_dossier,
        handlers::render_document,
        handlers::summarize
    ),
    components(schemas(
        CnpjRequest,
        Dossier,
        CompanyRecord,
        Address,
        Partner,
        Activity,
        FinancialSnapshot,
        Partnership,
        LegalRecord,
        Lawsuit,
        CourtOrder,
        Bankruptcy,
        MediaRecord,
        NewsItem,
        SocialMention,
        ComplaintSummary,
        ComplaintBreakdown,
        Sentiment,
        RiskAssessment,
        RiskBand,
        Severity,
        Priority,
        Warning,
        Recommendation,
        Provenance,
        SectionProvenance,
        DossierSummary,
        SummaryWarning,
        Color,
        Layout,
        ApiErrorBody
    )),
    tags(
        (name = "dossier", description = "Dossier generation and rendering"),
        (name = "health", description = "Liveness")
    )
)]
pub struct ApiDoc;
