//! Substitute data used when a provider call fails.
//!
//! Two kinds exist: a fixed illustrative dataset for well-known CNPJs, and
//! synthetic records drawn at random from fixed templates. Generators take
//! the RNG as a parameter so callers choose between `thread_rng()` and a
//! seeded RNG.

use crate::cnpj::Cnpj;
use crate::models::*;
use bigdecimal::BigDecimal;
use chrono::{Days, NaiveDate};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Display names for a handful of well-known CNPJs.
const WELL_KNOWN: [(&str, &str); 10] = [
    ("07526557000100", "Ambev S.A."),
    ("13347016000117", "Meta Platforms Brasil Ltda."),
    ("60746948000112", "Banco Bradesco S.A."),
    ("33000167000101", "Petróleo Brasileiro S.A. - Petrobras"),
    ("33041260065290", "Vale S.A."),
    ("60840055000131", "Itaú Unibanco S.A."),
    ("59105999000186", "Magazine Luiza S.A."),
    ("47508411000156", "Natura Cosméticos S.A."),
    ("00000000000191", "Banco do Brasil S.A."),
    ("02558157000162", "VIVO - Telefônica Brasil S.A."),
];

/// CNPJ of the company with a full illustrative dataset.
pub const AMBEV_CNPJ: &str = "07526557000100";

pub fn well_known_name(cnpj: &Cnpj) -> Option<&'static str> {
    WELL_KNOWN
        .iter()
        .find(|(digits, _)| *digits == cnpj.digits())
        .map(|(_, name)| *name)
}

/// Name used when the registry does not supply one.
pub fn display_name(cnpj: &Cnpj) -> String {
    well_known_name(cnpj)
        .map(str::to_string)
        .unwrap_or_else(|| format!("Empresa {}", cnpj.formatted()))
}

fn days_before(today: NaiveDate, days: u64) -> NaiveDate {
    today.checked_sub_days(Days::new(days)).unwrap_or(today)
}

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

/// Complete records for a CNPJ with an illustrative dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct IllustrativeDataset {
    pub company: CompanyRecord,
    pub legal: LegalRecord,
    pub media: MediaRecord,
}

/// Returns the fixed dataset for CNPJs that have one.
///
/// Everything except the relative dates is constant. Media is generated from
/// the templates with an RNG seeded by the CNPJ, so it is the same on every
/// call for the same `today`.
pub fn illustrative_dataset(cnpj: &Cnpj, today: NaiveDate) -> Option<IllustrativeDataset> {
    if cnpj.digits() != AMBEV_CNPJ {
        return None;
    }

    let company = CompanyRecord {
        name: "Ambev S.A.".to_string(),
        cnpj: cnpj.clone(),
        cnpj_formatted: cnpj.formatted(),
        legal_nature: "Sociedade Anônima Aberta".to_string(),
        capital: Some(BigDecimal::from(57_899_000_000u64)),
        founding_date: Some(ymd(2005, 7, 8)),
        status: "Ativa".to_string(),
        address: Address {
            street: "Rua Dr. Renato Paes de Barros".to_string(),
            number: "1017".to_string(),
            complement: "4º andar".to_string(),
            neighborhood: "Itaim Bibi".to_string(),
            city: "São Paulo".to_string(),
            state: "SP".to_string(),
            zip_code: "04530-001".to_string(),
        },
        partners: Vec::new(),
        activities: vec![
            Activity {
                code: "1113-5/02".to_string(),
                description: "Fabricação de cervejas e chopes".to_string(),
                is_main: true,
            },
            Activity {
                code: "1122-4/99".to_string(),
                description: "Fabricação de outras bebidas não-alcoólicas".to_string(),
                is_main: false,
            },
        ],
        financial: Some(FinancialSnapshot {
            revenue: BigDecimal::from(75_800_000_000u64),
            profit: BigDecimal::from(12_500_000_000u64),
            employees: 30_000,
            last_update: today,
        }),
        partnerships: vec![Partnership {
            company: "Cervejaria Colorado".to_string(),
            kind: "Aquisição".to_string(),
            date: ymd(2015, 7, 1),
            description: "Aquisição da Cervejaria Colorado".to_string(),
        }],
    };

    let legal = LegalRecord {
        lawsuits: vec![Lawsuit {
            number: "1234567-89.2023.8.26.0100".to_string(),
            court: "TJSP".to_string(),
            kind: "Processo Civil".to_string(),
            status: "Em andamento".to_string(),
            date: days_before(today, 30),
            value: BigDecimal::from(100_000),
            parties: vec!["Consumidor".to_string(), "Ambev S.A.".to_string()],
        }],
        court_orders: Vec::new(),
        bankruptcy: None,
    };

    let mut rng = StdRng::seed_from_u64(cnpj.as_seed());
    let media = synthetic_media(&mut rng, &company.name, today);

    Some(IllustrativeDataset {
        company,
        legal,
        media,
    })
}

// ============ Synthetic templates ============

const CAPITALS: [u64; 5] = [100_000, 500_000, 1_000_000, 5_000_000, 10_000_000];

const ADDRESSES: [(&str, &str, &str, &str, &str, &str, &str); 3] = [
    ("Avenida Paulista", "1000", "Andar 10", "Bela Vista", "São Paulo", "SP", "01310-100"),
    ("Avenida Rio Branco", "156", "Sala 801", "Centro", "Rio de Janeiro", "RJ", "20040-901"),
    ("Avenida Getúlio Vargas", "1300", "Conjunto 1001", "Savassi", "Belo Horizonte", "MG", "30112-021"),
];

const POSITIVE_NEWS: [(&str, &str); 4] = [
    ("Empresa anuncia expansão e novos investimentos", "Planos de crescimento incluem abertura de novas unidades"),
    ("Resultados superam expectativas do mercado", "Lucro cresceu 25% em relação ao ano anterior"),
    ("Empresa recebe prêmio de inovação", "Reconhecimento por práticas sustentáveis e inovadoras"),
    ("Nova parceria estratégica anunciada", "Acordo promete impulsionar crescimento nos próximos anos"),
];

const NEGATIVE_NEWS: [(&str, &str); 3] = [
    ("Empresa enfrenta desafios no mercado", "Resultados abaixo das expectativas preocupam investidores"),
    ("Investigação apura irregularidades", "Órgãos reguladores iniciam averiguação de denúncias"),
    ("Queda nas vendas preocupa acionistas", "Empresa anuncia revisão de estratégia comercial"),
];

const NEUTRAL_NEWS: [(&str, &str); 3] = [
    ("Empresa anuncia mudanças na diretoria", "Novo CEO assume comando a partir do próximo mês"),
    ("Reestruturação organizacional em andamento", "Mudanças visam otimizar operações e reduzir custos"),
    ("Empresa revisa projeções para o próximo ano", "Ajustes consideram novo cenário econômico"),
];

const NEWS_SOURCES: [&str; 6] = [
    "Valor Econômico",
    "G1",
    "Estadão",
    "Folha de S.Paulo",
    "InfoMoney",
    "Reuters",
];

/// (platform, base count, spread multiplier)
const PLATFORMS: [(&str, u64, f64); 4] = [
    ("LinkedIn", 5_000, 2.0),
    ("Twitter", 10_000, 5.0),
    ("Instagram", 8_000, 3.0),
    ("Facebook", 15_000, 4.0),
];

const SENTIMENTS: [Sentiment; 3] = [Sentiment::Positive, Sentiment::Negative, Sentiment::Neutral];

/// Synthetic company record named from the well-known table when possible.
/// The financial snapshot is left empty.
pub fn synthetic_company<R: Rng + ?Sized>(rng: &mut R, cnpj: &Cnpj) -> CompanyRecord {
    let capital = CAPITALS.choose(rng).copied().unwrap_or(CAPITALS[0]);
    // 2000-01-01 ..= 2022-12-31
    let founded = ymd(2000, 1, 1).checked_add_days(Days::new(rng.gen_range(0..=8400)));
    let (street, number, complement, neighborhood, city, state, zip_code) =
        ADDRESSES.choose(rng).copied().unwrap_or(ADDRESSES[0]);

    CompanyRecord {
        name: display_name(cnpj),
        cnpj: cnpj.clone(),
        cnpj_formatted: cnpj.formatted(),
        legal_nature: "Sociedade Empresária Limitada".to_string(),
        capital: Some(BigDecimal::from(capital)),
        founding_date: founded,
        status: "Ativa".to_string(),
        address: Address {
            street: street.to_string(),
            number: number.to_string(),
            complement: complement.to_string(),
            neighborhood: neighborhood.to_string(),
            city: city.to_string(),
            state: state.to_string(),
            zip_code: zip_code.to_string(),
        },
        partners: vec![
            Partner {
                name: "João Silva".to_string(),
                document: "123.456.789-00".to_string(),
                role: "Sócio Administrador".to_string(),
            },
            Partner {
                name: "Maria Santos".to_string(),
                document: "987.654.321-00".to_string(),
                role: "Sócio".to_string(),
            },
        ],
        activities: vec![
            Activity {
                code: "6202-3/00".to_string(),
                description: "Desenvolvimento de software".to_string(),
                is_main: true,
            },
            Activity {
                code: "6311-9/00".to_string(),
                description: "Tratamento de dados e hospedagem".to_string(),
                is_main: false,
            },
            Activity {
                code: "7020-4/00".to_string(),
                description: "Consultoria empresarial".to_string(),
                is_main: false,
            },
        ],
        financial: None,
        partnerships: Vec::new(),
    }
}

/// Between 3 and 7 news items from the last 30 days.
pub fn synthetic_news<R: Rng + ?Sized>(rng: &mut R, today: NaiveDate) -> Vec<NewsItem> {
    let count = rng.gen_range(3..=7);
    (0..count)
        .map(|_| {
            let sentiment = if rng.gen::<f64>() > 0.7 {
                Sentiment::Negative
            } else if rng.gen::<f64>() > 0.5 {
                Sentiment::Neutral
            } else {
                Sentiment::Positive
            };
            let pool: &[(&str, &str)] = match sentiment {
                Sentiment::Positive => &POSITIVE_NEWS,
                Sentiment::Negative => &NEGATIVE_NEWS,
                Sentiment::Neutral => &NEUTRAL_NEWS,
            };
            let (title, summary) = pool.choose(rng).copied().unwrap_or(pool[0]);
            let source = NEWS_SOURCES.choose(rng).copied().unwrap_or(NEWS_SOURCES[0]);
            let days_ago = rng.gen_range(0..30);

            NewsItem {
                title: title.to_string(),
                source: source.to_string(),
                date: days_before(today, days_ago),
                url: format!("https://exemplo.com/noticias/{}", days_ago),
                summary: summary.to_string(),
                sentiment,
            }
        })
        .collect()
}

pub fn synthetic_social<R: Rng + ?Sized>(rng: &mut R, today: NaiveDate) -> Vec<SocialMention> {
    PLATFORMS
        .iter()
        .map(|(platform, base, spread)| {
            let factor = rng.gen::<f64>() * spread + 1.0;
            SocialMention {
                platform: platform.to_string(),
                mentions: (*base as f64 * factor).floor() as u64,
                sentiment: SENTIMENTS.choose(rng).copied().unwrap_or(Sentiment::Neutral),
                last_mention: days_before(today, rng.gen_range(0..7)),
            }
        })
        .collect()
}

fn complaint_status(resolution: u8) -> &'static str {
    if resolution >= 80 {
        "BOM"
    } else if resolution >= 70 {
        "REGULAR"
    } else {
        "RUIM"
    }
}

fn complaint_summary<R: Rng + ?Sized>(
    rng: &mut R,
    source: &str,
    base: u64,
    url: String,
    today: NaiveDate,
) -> ComplaintSummary {
    let total = (base as f64 * (rng.gen::<f64>() * 0.5 + 0.75)).floor() as u64;
    let resolution: u8 = rng.gen_range(60..90);
    let resolved = total * u64::from(resolution) / 100;
    let pending = ((total - resolved) as f64 * 0.6).floor() as u64;
    let hours = rng.gen_range(24..72);

    ComplaintSummary {
        source: source.to_string(),
        count: total,
        last_complaint: days_before(today, rng.gen_range(0..7)),
        url,
        status: complaint_status(resolution).to_string(),
        resolution,
        details: ComplaintBreakdown {
            resolved,
            pending,
            not_resolved: total - resolved - pending,
            average_response_time: format!("{}h", hours),
        },
    }
}

pub fn synthetic_complaints<R: Rng + ?Sized>(
    rng: &mut R,
    company_name: &str,
    today: NaiveDate,
) -> Vec<ComplaintSummary> {
    let slug = company_name
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-");
    vec![
        complaint_summary(
            rng,
            "Reclame Aqui",
            1000,
            format!("https://www.reclameaqui.com.br/empresa/{}", slug),
            today,
        ),
        complaint_summary(
            rng,
            "Consumidor.gov.br",
            500,
            "https://consumidor.gov.br".to_string(),
            today,
        ),
    ]
}

pub fn synthetic_media<R: Rng + ?Sized>(
    rng: &mut R,
    company_name: &str,
    today: NaiveDate,
) -> MediaRecord {
    MediaRecord {
        news: synthetic_news(rng, today),
        social_media: synthetic_social(rng, today),
        complaints: synthetic_complaints(rng, company_name, today),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    #[test]
    fn test_display_name() {
        let bradesco = Cnpj::parse("60746948000112").unwrap();
        assert_eq!(display_name(&bradesco), "Banco Bradesco S.A.");

        let unknown = Cnpj::parse("11222333000181").unwrap();
        assert_eq!(display_name(&unknown), "Empresa 11.222.333/0001-81");
    }

    #[test]
    fn test_well_known_table_holds_valid_cnpjs() {
        for (digits, _) in WELL_KNOWN {
            assert!(crate::cnpj::is_valid(digits), "{} should be valid", digits);
        }
    }

    #[test]
    fn test_illustrative_dataset_only_for_ambev() {
        let other = Cnpj::parse("60746948000112").unwrap();
        assert!(illustrative_dataset(&other, today()).is_none());
    }

    #[test]
    fn test_illustrative_dataset_is_fixed() {
        let ambev = Cnpj::parse(AMBEV_CNPJ).unwrap();
        let first = illustrative_dataset(&ambev, today()).unwrap();
        let second = illustrative_dataset(&ambev, today()).unwrap();
        assert_eq!(first, second);

        assert_eq!(first.company.name, "Ambev S.A.");
        assert_eq!(first.legal.lawsuits.len(), 1);
        assert_eq!(first.legal.lawsuits[0].date, NaiveDate::from_ymd_opt(2026, 9, 18).unwrap());
        assert_eq!(first.company.partnerships.len(), 1);
        let financial = first.company.financial.unwrap();
        assert_eq!(financial.employees, 30_000);
        assert_eq!(financial.revenue, BigDecimal::from(75_800_000_000u64));
    }

    #[test]
    fn test_synthetic_company_shape() {
        let cnpj = Cnpj::parse("11222333000181").unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        let company = synthetic_company(&mut rng, &cnpj);

        assert_eq!(company.name, "Empresa 11.222.333/0001-81");
        assert!(company.financial.is_none());
        assert_eq!(company.partners.len(), 2);
        assert_eq!(company.activities.iter().filter(|a| a.is_main).count(), 1);
        let founded = company.founding_date.unwrap();
        assert!(founded >= ymd(2000, 1, 1) && founded <= ymd(2022, 12, 31));
        assert!(CAPITALS.iter().any(|c| Some(BigDecimal::from(*c)) == company.capital));
    }

    #[test]
    fn test_synthetic_news_bounds() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..50 {
            let news = synthetic_news(&mut rng, today());
            assert!((3..=7).contains(&news.len()));
            for item in news {
                assert!(item.date <= today());
                assert!(item.date >= days_before(today(), 29));
            }
        }
    }

    #[test]
    fn test_synthetic_complaints_breakdown_adds_up() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..50 {
            for c in synthetic_complaints(&mut rng, "Acme Ltda", today()) {
                assert!((60..90).contains(&c.resolution));
                assert_eq!(
                    c.details.resolved + c.details.pending + c.details.not_resolved,
                    c.count
                );
                assert_eq!(c.status, complaint_status(c.resolution));
            }
        }
    }

    #[test]
    fn test_complaint_url_slug() {
        let mut rng = StdRng::seed_from_u64(1);
        let complaints = synthetic_complaints(&mut rng, "Banco  do Brasil", today());
        assert_eq!(complaints[0].url, "https://www.reclameaqui.com.br/empresa/banco-do-brasil");
        assert_eq!(complaints[1].source, "Consumidor.gov.br");
    }

    #[test]
    fn test_social_mentions_within_spread() {
        let mut rng = StdRng::seed_from_u64(9);
        let social = synthetic_social(&mut rng, today());
        assert_eq!(social.len(), 4);
        let linkedin = &social[0];
        assert_eq!(linkedin.platform, "LinkedIn");
        assert!(linkedin.mentions >= 5_000 && linkedin.mentions <= 15_000);
    }
}
