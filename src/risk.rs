//! Risk scoring.
//!
//! Score starts at [`BASE_SCORE`] and loses fixed points per adverse signal,
//! clamped to `0..=100`. Higher is better. Warnings and recommendations are
//! independent threshold checks; list order is evaluation order.

use crate::models::*;
use crate::services::is_active_status;
use bigdecimal::{BigDecimal, Zero};

pub const BASE_SCORE: i64 = 70;
pub const SCALE: u8 = 100;

const LAWSUIT_PENALTY: i64 = 3;
const LAWSUIT_PENALTY_CAP: i64 = 30;
const NEGATIVE_PROFIT_PENALTY: i64 = 15;
const LOW_REVENUE_PENALTY: i64 = 10;
const FEW_EMPLOYEES_PENALTY: i64 = 5;
const NEGATIVE_NEWS_PENALTY: i64 = 5;
const COMPLAINT_VOLUME_PENALTY: i64 = 10;
const LOW_RESOLUTION_PENALTY: i64 = 10;
const NEGATIVE_SOCIAL_PENALTY: i64 = 3;

const LOW_REVENUE_THRESHOLD: u64 = 1_000_000;
const FEW_EMPLOYEES_THRESHOLD: u32 = 50;
const COMPLAINT_VOLUME_THRESHOLD: u64 = 1000;
const LOW_RESOLUTION_THRESHOLD: f64 = 70.0;
const LOW_CAPITAL_THRESHOLD: u64 = 10_000;

/// The figures the scorer looks at, extracted from the aggregated records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RiskSignals {
    pub lawsuits: usize,
    pub financial: Option<FinancialSnapshot>,
    pub capital: Option<BigDecimal>,
    pub active: bool,
    pub bankruptcy: bool,
    pub news: usize,
    pub negative_news: usize,
    pub total_complaints: u64,
    /// Mean resolution percentage; `None` when there are no complaint sources.
    pub average_resolution: Option<f64>,
    pub negative_social: usize,
}

impl RiskSignals {
    pub fn collect(company: &CompanyRecord, legal: &LegalRecord, media: &MediaRecord) -> Self {
        let average_resolution = if media.complaints.is_empty() {
            None
        } else {
            let sum: f64 = media.complaints.iter().map(|c| f64::from(c.resolution)).sum();
            Some(sum / media.complaints.len() as f64)
        };

        Self {
            lawsuits: legal.lawsuits.len(),
            financial: company.financial.clone(),
            capital: company.capital.clone(),
            active: is_active_status(&company.status),
            bankruptcy: legal.bankruptcy.is_some(),
            news: media.news.len(),
            negative_news: media
                .news
                .iter()
                .filter(|n| n.sentiment == Sentiment::Negative)
                .count(),
            total_complaints: media
                .complaints
                .iter()
                .fold(0u64, |total, c| total.saturating_add(c.count)),
            average_resolution,
            negative_social: media
                .social_media
                .iter()
                .filter(|s| s.sentiment == Sentiment::Negative)
                .count(),
        }
    }

    fn negative_profit(&self) -> bool {
        self.financial
            .as_ref()
            .map(|f| f.profit < BigDecimal::zero())
            .unwrap_or(false)
    }

    /// Reported, positive and below the threshold. Unreported capital is no signal.
    fn low_capital(&self) -> bool {
        matches!(
            &self.capital,
            Some(capital) if *capital > BigDecimal::zero()
                && *capital < BigDecimal::from(LOW_CAPITAL_THRESHOLD)
        )
    }

    /// Score in `0..=100`.
    pub fn score(&self) -> u8 {
        let mut score = BASE_SCORE;

        let lawsuit_impact = (self.lawsuits as i64).saturating_mul(LAWSUIT_PENALTY);
        score -= lawsuit_impact.min(LAWSUIT_PENALTY_CAP);

        if let Some(financial) = &self.financial {
            if financial.profit < BigDecimal::zero() {
                score -= NEGATIVE_PROFIT_PENALTY;
            }
            if financial.revenue < BigDecimal::from(LOW_REVENUE_THRESHOLD) {
                score -= LOW_REVENUE_PENALTY;
            }
            if financial.employees < FEW_EMPLOYEES_THRESHOLD {
                score -= FEW_EMPLOYEES_PENALTY;
            }
        }

        score = score.saturating_sub((self.negative_news as i64).saturating_mul(NEGATIVE_NEWS_PENALTY));

        if self.total_complaints > COMPLAINT_VOLUME_THRESHOLD {
            score -= COMPLAINT_VOLUME_PENALTY;
        }
        if matches!(self.average_resolution, Some(avg) if avg < LOW_RESOLUTION_THRESHOLD) {
            score -= LOW_RESOLUTION_PENALTY;
        }

        score = score.saturating_sub((self.negative_social as i64).saturating_mul(NEGATIVE_SOCIAL_PENALTY));

        score.clamp(0, i64::from(SCALE)) as u8
    }

    pub fn warnings(&self) -> Vec<Warning> {
        let mut warnings = Vec::new();
        let mut push = |severity, message: &str, details: Option<String>| {
            warnings.push(Warning {
                severity,
                message: message.to_string(),
                details,
            })
        };

        if self.lawsuits > 5 {
            push(
                Severity::High,
                "Alto número de processos judiciais",
                Some(format!("{} processos encontrados", self.lawsuits)),
            );
        }
        if self.negative_profit() {
            push(
                Severity::High,
                "Empresa apresenta prejuízo",
                Some("Lucro líquido negativo no último período".to_string()),
            );
        }
        if self.bankruptcy {
            push(
                Severity::High,
                "Registro de falência ou recuperação judicial",
                None,
            );
        }
        if !self.active {
            push(
                Severity::High,
                "Situação cadastral irregular",
                Some("A empresa não está ativa na Receita Federal".to_string()),
            );
        }
        if self.negative_news > 3 {
            push(
                Severity::Medium,
                "Volume significativo de notícias negativas",
                Some(format!("{} notícias negativas", self.negative_news)),
            );
        }
        if self.total_complaints > COMPLAINT_VOLUME_THRESHOLD {
            push(
                Severity::Medium,
                "Alto volume de reclamações",
                Some(format!("{} reclamações registradas", self.total_complaints)),
            );
        }
        if matches!(&self.financial, Some(f) if f.employees < 10) {
            push(
                Severity::Low,
                "Empresa de pequeno porte",
                Some("Menos de 10 funcionários".to_string()),
            );
        }

        warnings
    }

    pub fn recommendations(&self) -> Vec<Recommendation> {
        let mut recommendations = Vec::new();
        let mut push = |priority, message: &str, action: &str| {
            recommendations.push(Recommendation {
                priority,
                message: message.to_string(),
                action: Some(action.to_string()),
            })
        };

        if self.lawsuits > 0 {
            push(
                Priority::High,
                "Processos Judiciais Ativos",
                "Avalie os processos judiciais ativos e considere a possibilidade de negociação ou defesa.",
            );
        }
        if self.negative_profit() {
            push(
                Priority::Medium,
                "Melhorar a Estratégia de Negócios",
                "Avalie as estratégias de negócios e a estrutura de custos.",
            );
        }
        if self.negative_news > 0 {
            push(
                Priority::Medium,
                "Realizar análise detalhada das notícias negativas",
                "Contratar serviço de monitoramento de mídia.",
            );
        }
        if self.total_complaints > 0 {
            push(
                Priority::Medium,
                "Analisar reclamações e propor melhorias",
                "Implementar plano de gestão de reclamações.",
            );
        }
        if self.low_capital() {
            push(
                Priority::Low,
                "Avaliar capital social da empresa",
                "Considerar aumento do capital social.",
            );
        }
        if self.news < 5 {
            push(
                Priority::Low,
                "Ampliar a Presença na Mídia",
                "Avalie a estratégia de comunicação e relacionamento com a imprensa.",
            );
        }

        recommendations
    }

    pub fn assess(&self) -> RiskAssessment {
        let risk_score = self.score();
        RiskAssessment {
            risk_score,
            scale: SCALE,
            band: band(risk_score),
            warnings: self.warnings(),
            recommendations: self.recommendations(),
        }
    }
}

/// 60 and above is low risk, 40 to 59 moderate, below 40 high.
pub fn band(score: u8) -> RiskBand {
    match score {
        60.. => RiskBand::Low,
        40..=59 => RiskBand::Moderate,
        _ => RiskBand::High,
    }
}

/// Convenience wrapper over [`RiskSignals::collect`] and [`RiskSignals::assess`].
pub fn assess(company: &CompanyRecord, legal: &LegalRecord, media: &MediaRecord) -> RiskAssessment {
    RiskSignals::collect(company, legal, media).assess()
}
