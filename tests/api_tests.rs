/// Router tests driven through `tower::ServiceExt::oneshot`
/// Providers are configured without API keys so every section falls back offline
use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use rust_cnpj_dossier::config::Config;
use rust_cnpj_dossier::handlers::{router, AppState};
use rust_cnpj_dossier::models::Dossier;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

fn offline_app() -> Router {
    let config = Config {
        port: 0,
        http_timeout_secs: 1,
        max_body_bytes: 64 * 1024,
        company_api_base_url: "http://127.0.0.1:9".to_string(),
        company_api_key: None,
        legal_api_base_url: "http://127.0.0.1:9".to_string(),
        legal_api_key: None,
        news_api_base_url: "http://127.0.0.1:9".to_string(),
        news_api_key: None,
        synthetic_media_fallback: false,
    };
    router(Arc::new(AppState::new(config).unwrap()))
}

fn post_json(uri: &str, body: String) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .unwrap()
}

async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
    to_bytes(response.into_body(), usize::MAX).await.unwrap().to_vec()
}

async fn json_body(response: axum::response::Response) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

async fn ambev_dossier(app: &Router) -> Dossier {
    let response = app
        .clone()
        .oneshot(post_json("/api/cnpj", r#"{"cnpj":"07.526.557/0001-00"}"#.to_string()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

#[tokio::test]
async fn test_health() {
    let response = offline_app()
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_generate_dossier_for_ambev() {
    let app = offline_app();
    let dossier = ambev_dossier(&app).await;

    assert_eq!(dossier.company.name, "Ambev S.A.");
    assert_eq!(dossier.company.cnpj.digits(), "07526557000100");
    assert_eq!(dossier.legal.lawsuits.len(), 1);
    assert_eq!(dossier.risk.scale, 100);
}

#[tokio::test]
async fn test_missing_cnpj() {
    for body in [r#"{}"#, r#"{"cnpj":"   "}"#, r#"{"cnpj":null}"#] {
        let response = offline_app()
            .oneshot(post_json("/api/cnpj", body.to_string()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body {}", body);
        let json = json_body(response).await;
        assert_eq!(json["code"], "MISSING_CNPJ");
        assert_eq!(json["error"], "CNPJ is required");
    }
}

#[tokio::test]
async fn test_malformed_body_reports_details() {
    let response = offline_app()
        .oneshot(post_json("/api/cnpj", "not json".to_string()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = json_body(response).await;
    assert_eq!(json["code"], "MISSING_CNPJ");
    assert!(json["details"].is_string());
}

#[tokio::test]
async fn test_invalid_cnpj() {
    let response = offline_app()
        .oneshot(post_json("/api/cnpj", r#"{"cnpj":"00000000000000"}"#.to_string()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = json_body(response).await;
    assert_eq!(json["code"], "INVALID_CNPJ");
    assert_eq!(json["error"], "Invalid CNPJ");
}

#[tokio::test]
async fn test_render_document_layouts() {
    let app = offline_app();
    let dossier = ambev_dossier(&app).await;
    let body = serde_json::to_string(&dossier).unwrap();

    let response = app
        .clone()
        .oneshot(post_json("/api/dossier/document?layout=minimal", body.clone()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"dossie-07526557000100-resumido.txt\""
    );
    let text = String::from_utf8(body_bytes(response).await).unwrap();
    assert!(text.starts_with("DOSSIÊ EMPRESARIAL - RESUMO"));
    assert!(text.contains("Processos Ativos: 1"));

    let response = app
        .clone()
        .oneshot(post_json("/api/dossier/document", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let text = String::from_utf8(body_bytes(response).await).unwrap();
    assert!(text.starts_with("DOSSIÊ EMPRESARIAL\n"));
    assert!(text.contains("Cervejaria Colorado"));
}

#[tokio::test]
async fn test_render_document_rejects_unknown_layout() {
    let app = offline_app();
    let dossier = ambev_dossier(&app).await;

    let response = app
        .oneshot(post_json(
            "/api/dossier/document?layout=poster",
            serde_json::to_string(&dossier).unwrap(),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_summary() {
    let app = offline_app();
    let dossier = ambev_dossier(&app).await;

    let response = app
        .oneshot(post_json(
            "/api/dossier/summary",
            serde_json::to_string(&dossier).unwrap(),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = json_body(response).await;
    assert_eq!(json["name"], "Ambev S.A.");
    assert_eq!(json["cnpj"], "07.526.557/0001-00");
    assert_eq!(json["lawsuits"], 1);
    assert_eq!(json["containsSimulatedData"], true);
    assert!(json["topWarnings"].as_array().unwrap().len() <= 3);
}

#[tokio::test]
async fn test_openapi_document_served() {
    let response = offline_app()
        .oneshot(
            Request::get("/api-docs/openapi.json")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert!(json["paths"]["/api/cnpj"].is_object());
}

#[tokio::test]
async fn test_summary_with_huge_counts() {
    let app = offline_app();
    let mut dossier = ambev_dossier(&app).await;
    for mention in dossier.media.social_media.iter_mut().take(2) {
        mention.mentions = u64::MAX;
    }
    for complaint in dossier.media.complaints.iter_mut().take(2) {
        complaint.count = u64::MAX;
    }
    let body = serde_json::to_string(&dossier).unwrap();

    let response = app
        .clone()
        .oneshot(post_json("/api/dossier/summary", body.clone()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["socialMentions"], u64::MAX);
    assert_eq!(json["complaints"], u64::MAX);

    let response = app
        .oneshot(post_json("/api/dossier/document?layout=minimal", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_posted_risk_block_is_recomputed() {
    let app = offline_app();
    let dossier = ambev_dossier(&app).await;
    let expected = dossier.risk.clone();

    let mut tampered = serde_json::to_value(&dossier).unwrap();
    tampered["risk"]["riskScore"] = 250.into();
    tampered["risk"]["band"] = "low".into();
    tampered["risk"]["warnings"] = serde_json::json!([]);
    let body = tampered.to_string();

    let response = app
        .clone()
        .oneshot(post_json("/api/dossier/document", body.clone()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let text = String::from_utf8(body_bytes(response).await).unwrap();
    assert!(!text.contains("250/100"));
    assert!(text.contains(&format!("{}/100", expected.risk_score)));

    let response = app
        .oneshot(post_json("/api/dossier/summary", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["riskScore"], expected.risk_score);
    assert_eq!(json["topWarnings"].as_array().unwrap().len(), expected.warnings.len().min(3));
}
