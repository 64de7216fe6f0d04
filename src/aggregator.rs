/// Data aggregation for a single dossier
///
/// For a validated CNPJ this module runs the provider calls in order:
/// 1. Company registry
/// 2. Legal records
/// 3. News / media (queried by company name, so it runs last)
///
/// Each call is attempted once. On failure the section is filled from
/// `fallback` and its provenance records what was used.
use crate::cnpj::Cnpj;
use crate::config::Config;
use crate::errors::AppError;
use crate::fallback::{self, IllustrativeDataset};
use crate::models::{CompanyRecord, LegalRecord, MediaRecord, Provenance, SectionProvenance};
use crate::services::{CompanyRegistryService, LegalRecordsService, MediaService};
use chrono::{NaiveDate, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Merged provider output for one CNPJ.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedData {
    pub company: CompanyRecord,
    pub legal: LegalRecord,
    pub media: MediaRecord,
    pub provenance: SectionProvenance,
}

/// Holds the three provider clients. Built once at startup.
#[derive(Clone)]
pub struct DataAggregator {
    company: CompanyRegistryService,
    legal: LegalRecordsService,
    media: MediaService,
    synthetic_media_fallback: bool,
}

impl DataAggregator {
    pub fn new(config: &Config) -> Result<Self, AppError> {
        Ok(Self {
            company: CompanyRegistryService::new(config)?,
            legal: LegalRecordsService::new(config)?,
            media: MediaService::new(config)?,
            synthetic_media_fallback: config.synthetic_media_fallback,
        })
    }

    /// Fetch all sections for `cnpj`, substituting fallback data on failure.
    pub async fn aggregate(&self, cnpj: &Cnpj) -> AggregatedData {
        let today = Utc::now().date_naive();
        self.aggregate_on(cnpj, today).await
    }

    async fn aggregate_on(&self, cnpj: &Cnpj, today: NaiveDate) -> AggregatedData {
        let illustrative = fallback::illustrative_dataset(cnpj, today);

        // 1. Company
        let (company, company_source) = match self.company.fetch_company(cnpj).await {
            Ok(company) => (company, Provenance::Live),
            Err(e) => {
                tracing::warn!("Company registry failed for {}: {}, using fallback", cnpj, e);
                match &illustrative {
                    Some(dataset) => (dataset.company.clone(), Provenance::Illustrative),
                    None => (
                        fallback::synthetic_company(&mut StdRng::from_entropy(), cnpj),
                        Provenance::Synthetic,
                    ),
                }
            }
        };

        // 2. Legal
        let (legal, legal_source) = match self.legal.fetch_legal(cnpj).await {
            Ok(legal) => (legal, Provenance::Live),
            Err(e) => {
                tracing::warn!("Legal records failed for {}: {}, using fallback", cnpj, e);
                match &illustrative {
                    Some(dataset) => (dataset.legal.clone(), Provenance::Illustrative),
                    None => (LegalRecord::default(), Provenance::Unavailable),
                }
            }
        };

        // 3. Media
        let (media, media_source) = match self.media.fetch_media(cnpj, &company.name).await {
            Ok(media) => (media, Provenance::Live),
            Err(e) => {
                tracing::warn!("Media lookup failed for {}: {}, using fallback", cnpj, e);
                self.media_fallback(illustrative.as_ref(), &company.name, today)
            }
        };

        tracing::info!(
            "Aggregated {}: company={:?} legal={:?} media={:?}",
            cnpj,
            company_source,
            legal_source,
            media_source
        );

        AggregatedData {
            company,
            legal,
            media,
            provenance: SectionProvenance {
                company: company_source,
                legal: legal_source,
                media: media_source,
            },
        }
    }

    fn media_fallback(
        &self,
        illustrative: Option<&IllustrativeDataset>,
        company_name: &str,
        today: NaiveDate,
    ) -> (MediaRecord, Provenance) {
        if let Some(dataset) = illustrative {
            return (dataset.media.clone(), Provenance::Illustrative);
        }
        if self.synthetic_media_fallback {
            let media = fallback::synthetic_media(&mut StdRng::from_entropy(), company_name, today);
            return (media, Provenance::Synthetic);
        }
        (MediaRecord::default(), Provenance::Unavailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offline_config(synthetic_media_fallback: bool) -> Config {
        Config {
            port: 0,
            http_timeout_secs: 1,
            max_body_bytes: 1024,
            company_api_base_url: "http://127.0.0.1:9".to_string(),
            company_api_key: None,
            legal_api_base_url: "http://127.0.0.1:9".to_string(),
            legal_api_key: None,
            news_api_base_url: "http://127.0.0.1:9".to_string(),
            news_api_key: None,
            synthetic_media_fallback,
        }
    }

    #[tokio::test]
    async fn test_missing_keys_fall_back_without_network() {
        let aggregator = DataAggregator::new(&offline_config(false)).unwrap();
        let cnpj = Cnpj::parse("11222333000181").unwrap();

        let data = aggregator.aggregate(&cnpj).await;
        assert_eq!(data.provenance.company, Provenance::Synthetic);
        assert_eq!(data.provenance.legal, Provenance::Unavailable);
        assert_eq!(data.provenance.media, Provenance::Unavailable);
        assert_eq!(data.company.name, "Empresa 11.222.333/0001-81");
        assert!(data.legal.lawsuits.is_empty());
        assert!(data.media.news.is_empty());
    }

    #[tokio::test]
    async fn test_synthetic_media_when_enabled() {
        let aggregator = DataAggregator::new(&offline_config(true)).unwrap();
        let cnpj = Cnpj::parse("60746948000112").unwrap();

        let data = aggregator.aggregate(&cnpj).await;
        assert_eq!(data.company.name, "Banco Bradesco S.A.");
        assert_eq!(data.provenance.media, Provenance::Synthetic);
        assert!(!data.media.news.is_empty());
        assert_eq!(data.media.social_media.len(), 4);
    }

    #[tokio::test]
    async fn test_ambev_is_illustrative_and_stable() {
        let aggregator = DataAggregator::new(&offline_config(false)).unwrap();
        let cnpj = Cnpj::parse(fallback::AMBEV_CNPJ).unwrap();
        let today = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();

        let first = aggregator.aggregate_on(&cnpj, today).await;
        let second = aggregator.aggregate_on(&cnpj, today).await;
        assert_eq!(first, second);
        assert_eq!(first.provenance.company, Provenance::Illustrative);
        assert_eq!(first.provenance.legal, Provenance::Illustrative);
        assert_eq!(first.provenance.media, Provenance::Illustrative);
    }
}
