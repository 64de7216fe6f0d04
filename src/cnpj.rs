//! CNPJ normalization, check-digit validation and display formatting.
//!
//! A CNPJ is the 14-digit registry number of a Brazilian legal entity. The
//! last two digits are check digits computed from the first twelve with a
//! weighted sum modulo 11.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

/// Number of digits in a canonical CNPJ.
pub const CNPJ_LENGTH: usize = 14;

const FIRST_WEIGHTS: [u32; 12] = [5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];
const SECOND_WEIGHTS: [u32; 13] = [6, 5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];

static CNPJ_GROUPS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{2})(\d{3})(\d{3})(\d{4})(\d{2})$").expect("CNPJ group pattern is valid")
});

/// Reasons a CNPJ fails validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CnpjError {
    /// The input does not contain exactly 14 digits.
    WrongLength(usize),
    /// All 14 digits are the same (e.g. `00000000000000`).
    RepeatedDigits,
    /// The 13th digit does not match the computed check digit.
    FirstCheckDigit,
    /// The 14th digit does not match the computed check digit.
    SecondCheckDigit,
}

impl fmt::Display for CnpjError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CnpjError::WrongLength(len) => {
                write!(f, "CNPJ must have {} digits, got {}", CNPJ_LENGTH, len)
            }
            CnpjError::RepeatedDigits => write!(f, "CNPJ cannot be a single repeated digit"),
            CnpjError::FirstCheckDigit => write!(f, "CNPJ first check digit does not match"),
            CnpjError::SecondCheckDigit => write!(f, "CNPJ second check digit does not match"),
        }
    }
}

impl std::error::Error for CnpjError {}

/// Strips every non-digit character from the input.
pub fn normalize(input: &str) -> String {
    input.chars().filter(|c| c.is_ascii_digit()).collect()
}

fn to_digits(normalized: &str) -> Vec<u32> {
    normalized.chars().filter_map(|c| c.to_digit(10)).collect()
}

fn check_digit(digits: &[u32], weights: &[u32]) -> u32 {
    let sum: u32 = digits.iter().zip(weights).map(|(d, w)| d * w).sum();
    let digit = 11 - (sum % 11);
    if digit > 9 {
        0
    } else {
        digit
    }
}

/// Computes both check digits for a 12-digit base.
///
/// Returns `None` when the input does not normalize to exactly 12 digits.
pub fn check_digits(base: &str) -> Option<(u32, u32)> {
    let mut digits = to_digits(&normalize(base));
    if digits.len() != 12 {
        return None;
    }
    let first = check_digit(&digits, &FIRST_WEIGHTS);
    digits.push(first);
    let second = check_digit(&digits, &SECOND_WEIGHTS);
    Some((first, second))
}

/// Validates a CNPJ, reporting which rule failed.
pub fn validate(input: &str) -> Result<String, CnpjError> {
    let normalized = normalize(input);
    if normalized.len() != CNPJ_LENGTH {
        return Err(CnpjError::WrongLength(normalized.len()));
    }

    let digits = to_digits(&normalized);
    if digits.iter().all(|d| *d == digits[0]) {
        return Err(CnpjError::RepeatedDigits);
    }

    if check_digit(&digits[..12], &FIRST_WEIGHTS) != digits[12] {
        return Err(CnpjError::FirstCheckDigit);
    }
    if check_digit(&digits[..13], &SECOND_WEIGHTS) != digits[13] {
        return Err(CnpjError::SecondCheckDigit);
    }

    Ok(normalized)
}

/// Returns true when the input is a well-formed CNPJ with matching check digits.
pub fn is_valid(input: &str) -> bool {
    validate(input).is_ok()
}

/// Formats a CNPJ as `NN.NNN.NNN/NNNN-NN`.
///
/// Best-effort: when the input does not have 14 digits the normalized digits
/// are returned unformatted. No check-digit validation is performed.
pub fn format(input: &str) -> String {
    let digits = normalize(input);
    CNPJ_GROUPS
        .replace(&digits, "$1.$2.$3/$4-$5")
        .into_owned()
}

/// A CNPJ that passed validation, stored as its 14 canonical digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Cnpj(String);

impl Cnpj {
    /// Normalizes and validates the input.
    pub fn parse(input: &str) -> Result<Self, CnpjError> {
        validate(input).map(Cnpj)
    }

    /// The 14 canonical digits.
    pub fn digits(&self) -> &str {
        &self.0
    }

    /// The display form `NN.NNN.NNN/NNNN-NN`.
    pub fn formatted(&self) -> String {
        format(&self.0)
    }

    /// Numeric value of the digits, used to seed deterministic generators.
    pub fn as_seed(&self) -> u64 {
        self.0.parse().unwrap_or_default()
    }
}

impl fmt::Display for Cnpj {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.formatted())
    }
}

impl TryFrom<String> for Cnpj {
    type Error = CnpjError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Cnpj::parse(&value)
    }
}

impl From<Cnpj> for String {
    fn from(value: Cnpj) -> Self {
        value.0
    }
}
