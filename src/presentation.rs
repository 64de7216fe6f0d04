//! Rendering of a finished dossier.
//!
//! [`summary`] produces the on-screen card; [`render`] produces the
//! downloadable text document in either layout. Both read the same
//! [`Dossier`] and never modify it.

use crate::errors::{AppError, ResultExt};
use crate::locale::{format_brl, format_date, format_datetime_long, format_integer, sentiment_label};
use crate::models::*;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use utoipa::ToSchema;

const SEPARATOR: &str = "════════════════════════════════════════";

/// Document layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    #[default]
    Full,
    Minimal,
}

/// Display colour for severities, priorities and the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Red,
    Yellow,
    Green,
}

pub fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::High => Color::Red,
        Severity::Medium => Color::Yellow,
        Severity::Low => Color::Green,
    }
}

pub fn priority_color(priority: Priority) -> Color {
    match priority {
        Priority::High => Color::Red,
        Priority::Medium => Color::Yellow,
        Priority::Low => Color::Green,
    }
}

pub fn band_color(band: RiskBand) -> Color {
    match band {
        RiskBand::Low => Color::Green,
        RiskBand::Moderate => Color::Yellow,
        RiskBand::High => Color::Red,
    }
}

fn band_label(band: RiskBand) -> &'static str {
    match band {
        RiskBand::Low => "Risco baixo",
        RiskBand::Moderate => "Risco moderado",
        RiskBand::High => "Risco alto",
    }
}

fn severity_label(severity: Severity) -> &'static str {
    match severity {
        Severity::High => "ALTO",
        Severity::Medium => "MÉDIO",
        Severity::Low => "BAIXO",
    }
}

fn priority_label(priority: Priority) -> &'static str {
    match priority {
        Priority::High => "Alta",
        Priority::Medium => "Média",
        Priority::Low => "Baixa",
    }
}

fn provenance_label(provenance: Provenance) -> &'static str {
    match provenance {
        Provenance::Live => "dados do provedor",
        Provenance::Illustrative => "dados ilustrativos",
        Provenance::Synthetic => "dados simulados",
        Provenance::Unavailable => "indisponível",
    }
}

/// A warning as shown on screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SummaryWarning {
    pub message: String,
    pub color: Color,
}

/// Compact on-screen view of a dossier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DossierSummary {
    pub name: String,
    pub cnpj: String,
    pub status: String,
    pub risk_score: u8,
    pub scale: u8,
    pub band: RiskBand,
    pub score_color: Color,
    pub lawsuits: usize,
    pub news: usize,
    pub social_mentions: u64,
    pub complaints: u64,
    /// High-severity warnings first, at most three.
    pub top_warnings: Vec<SummaryWarning>,
    /// Highest-priority recommendation, if any.
    pub top_recommendation: Option<SummaryWarning>,
    /// True when any section is illustrative or synthetic.
    pub contains_simulated_data: bool,
}

fn severity_rank(severity: Severity) -> u8 {
    match severity {
        Severity::High => 0,
        Severity::Medium => 1,
        Severity::Low => 2,
    }
}

fn priority_rank(priority: Priority) -> u8 {
    match priority {
        Priority::High => 0,
        Priority::Medium => 1,
        Priority::Low => 2,
    }
}

pub fn summary(dossier: &Dossier) -> DossierSummary {
    let mut warnings: Vec<&Warning> = dossier.risk.warnings.iter().collect();
    // stable: keeps evaluation order within a severity
    warnings.sort_by_key(|w| severity_rank(w.severity));

    let provenance = dossier.provenance;
    DossierSummary {
        name: dossier.company.name.clone(),
        cnpj: dossier.company.cnpj_formatted.clone(),
        status: dossier.company.status.clone(),
        risk_score: dossier.risk.risk_score,
        scale: dossier.risk.scale,
        band: dossier.risk.band,
        score_color: band_color(dossier.risk.band),
        lawsuits: dossier.legal.lawsuits.len(),
        news: dossier.media.news.len(),
        social_mentions: total_mentions(&dossier.media),
        complaints: total_complaints(&dossier.media),
        top_warnings: warnings
            .into_iter()
            .take(3)
            .map(|w| SummaryWarning {
                message: w.message.clone(),
                color: severity_color(w.severity),
            })
            .collect(),
        top_recommendation: dossier
            .risk
            .recommendations
            .iter()
            .min_by_key(|r| priority_rank(r.priority))
            .map(|r| SummaryWarning {
                message: r.message.clone(),
                color: priority_color(r.priority),
            }),
        contains_simulated_data: provenance.company.is_simulated()
            || provenance.legal.is_simulated()
            || provenance.media.is_simulated(),
    }
}

fn total_mentions(media: &MediaRecord) -> u64 {
    media
        .social_media
        .iter()
        .fold(0u64, |total, s| total.saturating_add(s.mentions))
}

fn total_complaints(media: &MediaRecord) -> u64 {
    media
        .complaints
        .iter()
        .fold(0u64, |total, c| total.saturating_add(c.count))
}

fn capital_label(company: &CompanyRecord) -> String {
    company
        .capital
        .as_ref()
        .map(format_brl)
        .unwrap_or_else(|| "não informado".to_string())
}

/// First 16 hex characters of the SHA-256 of the dossier JSON.
pub fn verification_code(dossier: &Dossier) -> Result<String, AppError> {
    let json = serde_json::to_vec(dossier).context("serializing dossier for verification code")?;
    let hash = Sha256::digest(&json);
    Ok(hex::encode(hash)[..16].to_string())
}

/// Attachment filename for a rendered document.
pub fn document_filename(dossier: &Dossier, layout: Layout) -> String {
    let suffix = match layout {
        Layout::Full => "",
        Layout::Minimal => "-resumido",
    };
    format!("dossie-{}{}.txt", dossier.company.cnpj.digits(), suffix)
}

/// Renders the dossier as a text document.
pub fn render(dossier: &Dossier, layout: Layout) -> Result<String, AppError> {
    let mut doc = match layout {
        Layout::Full => render_full(dossier),
        Layout::Minimal => render_minimal(dossier),
    };

    doc.push_str(&format!("\n{}\n", SEPARATOR));
    doc.push_str(&format!(
        "Gerado em {}\n",
        format_datetime_long(dossier.generated_at)
    ));
    doc.push_str(&format!("Relatório: {}\n", dossier.report_id));
    doc.push_str(&format!("Código de verificação: {}\n", verification_code(dossier)?));

    Ok(doc)
}

fn header(doc: &mut String, dossier: &Dossier, title: &str) {
    doc.push_str(&format!("{}\n", title));
    doc.push_str(&format!("{}\n", SEPARATOR));
    doc.push_str(&format!("{}\n", dossier.company.name));
    doc.push_str(&format!("CNPJ: {}\n", dossier.company.cnpj_formatted));
}

fn section(doc: &mut String, title: &str) {
    doc.push_str(&format!("\n═══ {} ═══\n", title));
}

fn provenance_note(doc: &mut String, provenance: Provenance) {
    if provenance != Provenance::Live {
        doc.push_str(&format!("(Fonte: {})\n", provenance_label(provenance)));
    }
}

fn risk_section(doc: &mut String, risk: &RiskAssessment) {
    section(doc, "ANÁLISE DE RISCO");
    doc.push_str(&format!(
        "Score de Risco: {}/{} ({})\n",
        risk.risk_score,
        risk.scale,
        band_label(risk.band)
    ));
    if risk.warnings.is_empty() {
        doc.push_str("Nenhum alerta identificado.\n");
    }
    for warning in &risk.warnings {
        doc.push_str(&format!("[{}] {}", severity_label(warning.severity), warning.message));
        if let Some(details) = &warning.details {
            doc.push_str(&format!(" - {}", details));
        }
        doc.push('\n');
    }
}

fn render_full(dossier: &Dossier) -> String {
    let company = &dossier.company;
    let mut doc = String::new();

    header(&mut doc, dossier, "DOSSIÊ EMPRESARIAL");

    section(&mut doc, "INFORMAÇÕES BÁSICAS");
    provenance_note(&mut doc, dossier.provenance.company);
    doc.push_str(&format!("Nome: {}\n", company.name));
    doc.push_str(&format!("CNPJ: {}\n", company.cnpj_formatted));
    doc.push_str(&format!("Natureza: {}\n", company.legal_nature));
    doc.push_str(&format!("Capital: {}\n", capital_label(company)));
    if let Some(founded) = company.founding_date {
        doc.push_str(&format!("Data de Fundação: {}\n", format_date(founded)));
    }
    doc.push_str(&format!("Status: {}\n", company.status));

    section(&mut doc, "ENDEREÇO");
    let address = &company.address;
    doc.push_str(&format!("{}, {}", address.street, address.number));
    if !address.complement.is_empty() {
        doc.push_str(&format!(" - {}", address.complement));
    }
    doc.push('\n');
    doc.push_str(&format!(
        "{} - {}/{}\nCEP: {}\n",
        address.neighborhood, address.city, address.state, address.zip_code
    ));

    if let Some(financial) = &company.financial {
        section(&mut doc, "DADOS FINANCEIROS");
        doc.push_str(&format!("Receita: {}\n", format_brl(&financial.revenue)));
        doc.push_str(&format!("Lucro: {}\n", format_brl(&financial.profit)));
        doc.push_str(&format!(
            "Funcionários: {}\n",
            format_integer(u64::from(financial.employees))
        ));
        doc.push_str(&format!(
            "Última atualização: {}\n",
            format_date(financial.last_update)
        ));
    }

    if !company.partners.is_empty() {
        section(&mut doc, "SÓCIOS");
        for partner in &company.partners {
            doc.push_str(&format!(
                "• {} ({}) - {}\n",
                partner.name, partner.role, partner.document
            ));
        }
    }

    if !company.activities.is_empty() {
        section(&mut doc, "ATIVIDADES");
        for activity in &company.activities {
            let main = if activity.is_main { " [principal]" } else { "" };
            doc.push_str(&format!(
                "• {} - {}{}\n",
                activity.code, activity.description, main
            ));
        }
    }

    if !company.partnerships.is_empty() {
        section(&mut doc, "PARCERIAS RECENTES");
        for partnership in &company.partnerships {
            doc.push_str(&format!(
                "• {} ({}) - {}: {}\n",
                partnership.company,
                partnership.kind,
                format_date(partnership.date),
                partnership.description
            ));
        }
    }

    let media = &dossier.media;
    section(&mut doc, "NOTÍCIAS RECENTES");
    provenance_note(&mut doc, dossier.provenance.media);
    if media.news.is_empty() {
        doc.push_str("Nenhuma notícia encontrada.\n");
    }
    for news in &media.news {
        doc.push_str(&format!(
            "• {} - {} ({}) [{}]\n",
            format_date(news.date),
            news.title,
            news.source,
            sentiment_label(news.sentiment)
        ));
        if !news.summary.is_empty() {
            doc.push_str(&format!("  {}\n", news.summary));
        }
    }

    let legal = &dossier.legal;
    section(&mut doc, "PROCESSOS EM ANDAMENTO");
    provenance_note(&mut doc, dossier.provenance.legal);
    if legal.lawsuits.is_empty() {
        doc.push_str("Nenhum processo encontrado.\n");
    }
    for lawsuit in &legal.lawsuits {
        doc.push_str(&format!("• {} - {}\n", lawsuit.number, lawsuit.court));
        doc.push_str(&format!(
            "  {} | {} | {} | {}\n",
            lawsuit.kind,
            lawsuit.status,
            format_date(lawsuit.date),
            format_brl(&lawsuit.value)
        ));
        if !lawsuit.parties.is_empty() {
            doc.push_str(&format!("  Partes: {}\n", lawsuit.parties.join(", ")));
        }
    }

    if !legal.court_orders.is_empty() {
        section(&mut doc, "MANDADOS JUDICIAIS");
        for order in &legal.court_orders {
            doc.push_str(&format!(
                "• {} - {} | {} | {} | {}\n",
                order.number,
                order.court,
                order.kind,
                order.status,
                format_date(order.date)
            ));
        }
    }

    if let Some(bankruptcy) = &legal.bankruptcy {
        section(&mut doc, "FALÊNCIA");
        doc.push_str(&format!(
            "{} - {} ({})\n",
            bankruptcy.status,
            bankruptcy.court,
            format_date(bankruptcy.date)
        ));
    }

    if !media.social_media.is_empty() {
        section(&mut doc, "REDES SOCIAIS");
        for social in &media.social_media {
            doc.push_str(&format!(
                "• {}: {} menções [{}] - última em {}\n",
                social.platform,
                format_integer(social.mentions),
                sentiment_label(social.sentiment),
                format_date(social.last_mention)
            ));
        }
    }

    if !media.complaints.is_empty() {
        section(&mut doc, "RECLAMAÇÕES");
        for complaint in &media.complaints {
            doc.push_str(&format!(
                "• {}: {} reclamações ({}) - {}% resolvidas\n",
                complaint.source,
                format_integer(complaint.count),
                complaint.status,
                complaint.resolution
            ));
            doc.push_str(&format!(
                "  Resolvidas: {} | Pendentes: {} | Não resolvidas: {} | Tempo médio: {}\n",
                format_integer(complaint.details.resolved),
                format_integer(complaint.details.pending),
                format_integer(complaint.details.not_resolved),
                complaint.details.average_response_time
            ));
        }
    }

    risk_section(&mut doc, &dossier.risk);

    if !dossier.risk.recommendations.is_empty() {
        section(&mut doc, "RECOMENDAÇÕES");
        for rec in &dossier.risk.recommendations {
            doc.push_str(&format!(
                "[Prioridade {}] {}\n",
                priority_label(rec.priority),
                rec.message
            ));
            if let Some(action) = &rec.action {
                doc.push_str(&format!("  → {}\n", action));
            }
        }
    }

    doc.push_str(&format!("\n{}\n", dossier.disclaimer));
    doc
}

fn render_minimal(dossier: &Dossier) -> String {
    let company = &dossier.company;
    let mut doc = String::new();

    header(&mut doc, dossier, "DOSSIÊ EMPRESARIAL - RESUMO");

    section(&mut doc, "INFORMAÇÕES BÁSICAS");
    doc.push_str(&format!("Capital Social: {}\n", capital_label(company)));
    match company.founding_date {
        Some(founded) => doc.push_str(&format!("Data de Fundação: {}\n", format_date(founded))),
        None => doc.push_str("Data de Fundação: não informada\n"),
    }
    doc.push_str(&format!("{}\n", dossier.disclaimer));

    risk_section(&mut doc, &dossier.risk);

    let media = &dossier.media;
    section(&mut doc, "RESUMO DE MÍDIA");
    provenance_note(&mut doc, dossier.provenance.media);
    doc.push_str(&format!("Notícias Recentes: {}\n", media.news.len()));
    doc.push_str(&format!(
        "Menções em Redes: {}\n",
        format_integer(total_mentions(media))
    ));
    doc.push_str(&format!(
        "Reclamações: {}\n",
        format_integer(total_complaints(media))
    ));

    section(&mut doc, "RESUMO LEGAL");
    provenance_note(&mut doc, dossier.provenance.legal);
    doc.push_str(&format!(
        "Processos Ativos: {}\n",
        dossier.legal.lawsuits.len()
    ));
    for (i, lawsuit) in dossier.legal.lawsuits.iter().enumerate() {
        doc.push_str(&format!(
            "Processo {}: {} - {}\n",
            i + 1,
            lawsuit.kind,
            lawsuit.status
        ));
    }

    doc
}
