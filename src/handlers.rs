use crate::aggregator::DataAggregator;
use crate::config::Config;
use crate::dossier;
use crate::errors::AppError;
use crate::models::*;
use crate::openapi::ApiDoc;
use crate::presentation::{self, DossierSummary, Layout};
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer};
use utoipa::{IntoParams, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

/// Shared application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Config,
    /// Provider clients, built once at startup.
    pub aggregator: DataAggregator,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, AppError> {
        let aggregator = DataAggregator::new(&config)?;
        Ok(Self { config, aggregator })
    }
}

/// Health check endpoint.
///
/// Returns the service status and version.
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses((status = 200, description = "Service is up"))
)]
pub async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "service": "rust-cnpj-dossier",
            "version": env!("CARGO_PKG_VERSION")
        })),
    )
}

/// POST /api/cnpj
///
/// Validates the CNPJ, aggregates provider data and returns the dossier.
#[utoipa::path(
    post,
    path = "/api/cnpj",
    tag = "dossier",
    request_body = CnpjRequest,
    responses(
        (status = 200, description = "Dossier generated", body = Dossier),
        (status = 400, description = "Missing or invalid CNPJ", body = ApiErrorBody),
        (status = 500, description = "Processing failure", body = ApiErrorBody)
    )
)]
pub async fn generate_dossier(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CnpjRequest>, JsonRejection>,
) -> Result<Json<Dossier>, AppError> {
    let Json(request) = payload.map_err(|rejection| {
        tracing::warn!("Rejected /api/cnpj body: {}", rejection.body_text());
        AppError::MissingCnpj(Some(rejection.body_text()))
    })?;

    let raw = request
        .cnpj
        .filter(|c| !c.trim().is_empty())
        .ok_or(AppError::MissingCnpj(None))?;

    tracing::info!("POST /api/cnpj - cnpj: {}", raw);
    let dossier = dossier::generate_dossier(&state.aggregator, &raw).await?;

    Ok(Json(dossier))
}

/// Query string for the document endpoint.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DocumentQuery {
    /// `full` (default) or `minimal`.
    pub layout: Option<Layout>,
}

/// POST /api/dossier/document
///
/// Renders a dossier (as returned by `/api/cnpj`) into a downloadable text
/// document.
#[utoipa::path(
    post,
    path = "/api/dossier/document",
    tag = "dossier",
    params(DocumentQuery),
    request_body = Dossier,
    responses(
        (status = 200, description = "Rendered document", content_type = "text/plain", body = String),
        (status = 400, description = "Malformed dossier or layout", body = ApiErrorBody)
    )
)]
pub async fn render_document(
    query: Result<Query<DocumentQuery>, QueryRejection>,
    payload: Result<Json<Dossier>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Query(query) = query.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let Json(dossier) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let dossier = dossier::rescore(dossier);
    let layout = query.layout.unwrap_or_default();

    tracing::info!(
        "POST /api/dossier/document - report {} ({:?})",
        dossier.report_id,
        layout
    );

    let document = presentation::render(&dossier, layout)?;
    let filename = presentation::document_filename(&dossier, layout);

    Ok((
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        document,
    ))
}

/// POST /api/dossier/summary
///
/// Returns the on-screen summary of a dossier.
#[utoipa::path(
    post,
    path = "/api/dossier/summary",
    tag = "dossier",
    request_body = Dossier,
    responses(
        (status = 200, description = "Dossier summary", body = DossierSummary),
        (status = 400, description = "Malformed dossier", body = ApiErrorBody)
    )
)]
pub async fn summarize(
    payload: Result<Json<Dossier>, JsonRejection>,
) -> Result<Json<DossierSummary>, AppError> {
    let Json(dossier) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let dossier = dossier::rescore(dossier);
    Ok(Json(presentation::summary(&dossier)))
}

/// Builds the application router with middleware and API docs.
pub fn router(state: Arc<AppState>) -> Router {
    let max_body_bytes = state.config.max_body_bytes;

    let api_routes = Router::new()
        .route("/api/cnpj", post(generate_dossier))
        .route("/api/dossier/document", post(render_document))
        .route("/api/dossier/summary", post(summarize))
        .layer(ServiceBuilder::new().layer(RequestBodyLimitLayer::new(max_body_bytes)));

    Router::new()
        .route("/health", get(health))
        .merge(api_routes)
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
