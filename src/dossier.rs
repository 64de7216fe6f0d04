use crate::aggregator::{AggregatedData, DataAggregator};
use crate::cnpj::Cnpj;
use crate::errors::AppError;
use crate::models::{CompanyRecord, Dossier, LegalRecord, MediaRecord, SectionProvenance};
use crate::risk;
use chrono::{DateTime, Utc};
use uuid::Uuid;

pub const DISCLAIMER: &str = "Este dossiê foi gerado automaticamente a partir de fontes públicas e \
de provedores de dados de terceiros. Quando um provedor não responde, a seção correspondente é \
preenchida com dados ilustrativos ou simulados, conforme indicado no campo de procedência. As \
informações têm caráter informativo e não substituem uma análise de crédito ou jurídica.";

/// Builds the final record from the aggregated sections.
pub fn assemble(data: AggregatedData) -> Dossier {
    assemble_at(data, Utc::now())
}

pub fn assemble_at(data: AggregatedData, generated_at: DateTime<Utc>) -> Dossier {
    let AggregatedData {
        company,
        legal,
        media,
        provenance,
    } = data;
    let risk = risk::assess(&company, &legal, &media);

    Dossier {
        report_id: Uuid::new_v4(),
        company,
        disclaimer: DISCLAIMER.to_string(),
        legal,
        media,
        risk,
        provenance,
        generated_at,
    }
}

/// Validates the raw CNPJ, aggregates provider data and assembles the dossier.
///
/// Validation runs before any provider call.
pub async fn generate_dossier(aggregator: &DataAggregator, raw: &str) -> Result<Dossier, AppError> {
    let cnpj = Cnpj::parse(raw)?;
    tracing::info!("Generating dossier for CNPJ {}", cnpj);

    let data = aggregator.aggregate(&cnpj).await;
    let dossier = assemble(data);

    tracing::info!(
        "Dossier {} ready: score {}/{} ({} warnings)",
        dossier.report_id,
        dossier.risk.risk_score,
        dossier.risk.scale,
        dossier.risk.warnings.len()
    );
    Ok(dossier)
}

/// Replaces the risk block with one computed from the dossier's own sections.
/// Applied to every dossier posted back for rendering.
pub fn rescore(mut dossier: Dossier) -> Dossier {
    let risk = risk::assess(&dossier.company, &dossier.legal, &dossier.media);
    if risk != dossier.risk {
        tracing::warn!(
            "Dossier {} carried a stale risk block (score {}/{}), recomputed as {}/{}",
            dossier.report_id,
            dossier.risk.risk_score,
            dossier.risk.scale,
            risk.risk_score,
            risk.scale
        );
        dossier.risk = risk;
    }
    dossier
}

/// Assembles a dossier from sections fetched elsewhere.
pub fn from_parts(
    company: CompanyRecord,
    legal: LegalRecord,
    media: MediaRecord,
    provenance: SectionProvenance,
    generated_at: DateTime<Utc>,
) -> Dossier {
    assemble_at(
        AggregatedData {
            company,
            legal,
            media,
            provenance,
        },
        generated_at,
    )
}
