//! pt-BR display helpers for the rendered document.

use crate::models::Sentiment;
use bigdecimal::{BigDecimal, RoundingMode};
use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, Offset, Timelike, Utc};

const MONTHS: [&str; 12] = [
    "janeiro",
    "fevereiro",
    "março",
    "abril",
    "maio",
    "junho",
    "julho",
    "agosto",
    "setembro",
    "outubro",
    "novembro",
    "dezembro",
];

/// Brasília time (UTC-3, no daylight saving since 2019).
fn brasilia() -> FixedOffset {
    FixedOffset::west_opt(3 * 3600).unwrap_or_else(|| Utc.fix())
}

/// Groups a run of ASCII digits with `.` every three places.
fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push('.');
        }
        out.push(c);
    }
    out
}

/// `R$ 1.234.567,89`. Negative amounts render as `-R$ 1.234,00`.
pub fn format_brl(amount: &BigDecimal) -> String {
    let rounded = amount.with_scale_round(2, RoundingMode::HalfUp);
    let text = rounded.to_string();
    let (negative, text) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.as_str()),
    };
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text, "00"));
    let frac = format!("{:0<2}", frac_part);

    let body = format!("R$ {},{}", group_thousands(int_part), &frac[..2]);
    if negative && rounded != BigDecimal::from(0) {
        format!("-{}", body)
    } else {
        body
    }
}

/// `1.234.567`.
pub fn format_integer(value: u64) -> String {
    group_thousands(&value.to_string())
}

/// `dd/MM/yyyy`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Long form in Brasília time, e.g. `18 de outubro de 2026 às 14:05`.
pub fn format_datetime_long(at: DateTime<Utc>) -> String {
    let local = at.with_timezone(&brasilia());
    format!(
        "{} de {} de {} às {:02}:{:02}",
        local.day(),
        MONTHS[local.month0() as usize],
        local.year(),
        local.hour(),
        local.minute()
    )
}

pub fn sentiment_label(sentiment: Sentiment) -> &'static str {
    match sentiment {
        Sentiment::Positive => "Positivo",
        Sentiment::Negative => "Negativo",
        Sentiment::Neutral => "Neutro",
    }
}
