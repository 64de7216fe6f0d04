/// Integration tests with mocked external APIs
/// Tests provider clients and the aggregation workflow without hitting real services
use rust_cnpj_dossier::aggregator::DataAggregator;
use rust_cnpj_dossier::cnpj::Cnpj;
use rust_cnpj_dossier::config::Config;
use rust_cnpj_dossier::dossier::generate_dossier;
use rust_cnpj_dossier::errors::AppError;
use rust_cnpj_dossier::models::{Provenance, Sentiment};
use rust_cnpj_dossier::services::{
    CompanyRegistryService, LegalRecordsService, MediaService, ProviderError,
};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Helper function to create test config with every provider on one base URL
fn create_test_config(base_url: String) -> Config {
    Config {
        port: 8080,
        http_timeout_secs: 5,
        max_body_bytes: 1024 * 1024,
        company_api_base_url: base_url.clone(),
        company_api_key: Some("registry_key".to_string()),
        legal_api_base_url: base_url.clone(),
        legal_api_key: Some("legal_key".to_string()),
        news_api_base_url: base_url,
        news_api_key: Some("news_key".to_string()),
        synthetic_media_fallback: false,
    }
}

fn registry_body() -> serde_json::Value {
    serde_json::json!({
        "cnpj": "11222333000181",
        "nome": "Acme Tecnologia Ltda",
        "natureza_juridica": "Sociedade Empresária Limitada",
        "capital_social": 250000,
        "data_abertura": "2012-03-15",
        "situacao": "Ativa",
        "endereco": {
            "logradouro": "Rua das Flores",
            "numero": "42",
            "bairro": "Centro",
            "municipio": "Curitiba",
            "uf": "PR",
            "cep": "80010-000"
        },
        "socios": [
            { "nome": "Ana Souza", "cpf": "111.222.333-44", "tipo": "Sócio Administrador" }
        ],
        "atividades": [
            { "codigo": "6202-3/00", "descricao": "Desenvolvimento de software", "principal": true }
        ]
    })
}

#[tokio::test]
async fn test_registry_successful_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/cnpj/11222333000181"))
        .and(header("authorization", "Bearer registry_key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(registry_body()))
        .mount(&mock_server)
        .await;

    let config = create_test_config(mock_server.uri());
    let service = CompanyRegistryService::new(&config).unwrap();
    let cnpj = Cnpj::parse("11.222.333/0001-81").unwrap();

    let company = service.fetch_company(&cnpj).await.unwrap();
    assert_eq!(company.name, "Acme Tecnologia Ltda");
    assert_eq!(company.cnpj_formatted, "11.222.333/0001-81");
    assert_eq!(company.address.city, "Curitiba");
    assert_eq!(company.address.complement, "");
    assert_eq!(company.partners[0].role, "Sócio Administrador");
    assert!(company.financial.is_none());
}

#[tokio::test]
async fn test_registry_error_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/cnpj/11222333000181"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&mock_server)
        .await;

    let config = create_test_config(mock_server.uri());
    let service = CompanyRegistryService::new(&config).unwrap();
    let cnpj = Cnpj::parse("11222333000181").unwrap();

    let err = service.fetch_company(&cnpj).await.unwrap_err();
    assert_eq!(
        err,
        ProviderError::Status {
            status: 503,
            body: "maintenance".to_string()
        }
    );
}

#[tokio::test]
async fn test_missing_key_is_a_fetch_failure() {
    let mock_server = MockServer::start().await;
    let mut config = create_test_config(mock_server.uri());
    config.legal_api_key = None;

    let service = LegalRecordsService::new(&config).unwrap();
    let cnpj = Cnpj::parse("11222333000181").unwrap();

    let err = service.fetch_legal(&cnpj).await.unwrap_err();
    assert_eq!(err, ProviderError::MissingCredential("JUSBRASIL_API_KEY"));
    // No request reached the server
    assert!(mock_server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_legal_records_mapping() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/empresa/11222333000181/processos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "processos": [{
                "numero": "0001234-56.2024.5.02.0001",
                "tribunal": "TRT2",
                "tipo": "Processo Trabalhista",
                "status": "Em andamento",
                "data": "2024-02-10",
                "valor": "35000.00",
                "partes": ["Reclamante", "Acme Tecnologia Ltda"]
            }],
            "mandados": [],
            "falencia": null
        })))
        .mount(&mock_server)
        .await;

    let config = create_test_config(mock_server.uri());
    let service = LegalRecordsService::new(&config).unwrap();
    let cnpj = Cnpj::parse("11222333000181").unwrap();

    let legal = service.fetch_legal(&cnpj).await.unwrap();
    assert_eq!(legal.lawsuits.len(), 1);
    assert_eq!(legal.lawsuits[0].court, "TRT2");
    assert!(legal.court_orders.is_empty());
    assert!(legal.bankruptcy.is_none());
}

#[tokio::test]
async fn test_news_query_and_sentiment() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/everything"))
        .and(query_param("q", "Acme Tecnologia Ltda"))
        .and(query_param("apiKey", "news_key"))
        .and(query_param("language", "pt"))
        .and(query_param("sortBy", "publishedAt"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "ok",
            "articles": [
                {
                    "title": "Acme recebe multa do Procon",
                    "source": { "name": "G1" },
                    "publishedAt": "2026-10-01T12:00:00Z",
                    "url": "https://g1.example/acme",
                    "description": "Investigação sobre cobranças"
                },
                {
                    "title": "Acme registra lucro e crescimento",
                    "source": { "name": "Valor" },
                    "publishedAt": "2026-09-20T08:00:00Z",
                    "url": "https://valor.example/acme",
                    "description": null
                },
                { "title": null, "source": null }
            ]
        })))
        .mount(&mock_server)
        .await;

    let config = create_test_config(mock_server.uri());
    let service = MediaService::new(&config).unwrap();
    let cnpj = Cnpj::parse("11222333000181").unwrap();

    let media = service
        .fetch_media(&cnpj, "Acme Tecnologia Ltda")
        .await
        .unwrap();
    assert_eq!(media.news.len(), 2);
    assert_eq!(media.news[0].sentiment, Sentiment::Negative);
    assert_eq!(media.news[1].sentiment, Sentiment::Positive);
    assert_eq!(media.news[0].source, "G1");
    assert!(media.social_media.is_empty());
    assert!(media.complaints.is_empty());
}

#[tokio::test]
async fn test_all_providers_live() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/cnpj/11222333000181"))
        .respond_with(ResponseTemplate::new(200).set_body_json(registry_body()))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/empresa/11222333000181/processos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v2/everything"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "articles": [] })),
        )
        .mount(&mock_server)
        .await;

    let aggregator = DataAggregator::new(&create_test_config(mock_server.uri())).unwrap();
    let dossier = generate_dossier(&aggregator, "11.222.333/0001-81")
        .await
        .unwrap();

    assert_eq!(dossier.company.name, "Acme Tecnologia Ltda");
    assert_eq!(dossier.provenance.company, Provenance::Live);
    assert_eq!(dossier.provenance.legal, Provenance::Live);
    assert_eq!(dossier.provenance.media, Provenance::Live);
    // Nothing adverse: base score
    assert_eq!(dossier.risk.risk_score, 70);
}

#[tokio::test]
async fn test_all_providers_fail_for_unknown_cnpj() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let aggregator = DataAggregator::new(&create_test_config(mock_server.uri())).unwrap();
    let dossier = generate_dossier(&aggregator, "11222333000181").await.unwrap();

    assert_eq!(dossier.provenance.company, Provenance::Synthetic);
    assert_eq!(dossier.provenance.legal, Provenance::Unavailable);
    assert_eq!(dossier.provenance.media, Provenance::Unavailable);
    assert_eq!(dossier.company.name, "Empresa 11.222.333/0001-81");
    assert!(dossier.legal.lawsuits.is_empty());
    assert!(dossier.media.news.is_empty());
    assert_eq!(dossier.risk.risk_score, 70);
    assert!(dossier.risk.warnings.is_empty());

    // One attempt per provider, no retries
    assert_eq!(mock_server.received_requests().await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_ambev_fallback_is_deterministic() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let aggregator = DataAggregator::new(&create_test_config(mock_server.uri())).unwrap();
    let first = generate_dossier(&aggregator, "07526557000100").await.unwrap();
    let second = generate_dossier(&aggregator, "07.526.557/0001-00")
        .await
        .unwrap();

    assert_eq!(first.company.name, "Ambev S.A.");
    assert_eq!(first.company, second.company);
    assert_eq!(first.legal, second.legal);
    assert_eq!(first.media, second.media);
    assert_eq!(first.risk, second.risk);
    assert_eq!(first.legal.lawsuits.len(), 1);
    assert_eq!(first.company.partnerships.len(), 1);
    assert_eq!(first.provenance.media, Provenance::Illustrative);
}

#[tokio::test]
async fn test_invalid_cnpj_rejected_before_any_fetch() {
    let mock_server = MockServer::start().await;
    let aggregator = DataAggregator::new(&create_test_config(mock_server.uri())).unwrap();

    let err = generate_dossier(&aggregator, "00000000000000")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidCnpj(_)));
    assert!(mock_server.received_requests().await.unwrap().is_empty());
}
