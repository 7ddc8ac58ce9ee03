//! CPF/CNPJ identifier normalisation.
//!
//! Users type identifiers with or without punctuation. These helpers strip
//! everything but digits and reformat to the canonical punctuated form:
//!
//! - CPF (individual), 11 digits: `000.000.000-00`
//! - CNPJ (entity), 14 digits: `00.000.000/0000-00`
//!
//! Any other digit count is left as bare digits. Check digits are not
//! verified; the server is the authority on validity.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentifierKind {
    Cpf,
    Cnpj,
    Unknown,
}

impl IdentifierKind {
    /// Classify by digit count after stripping punctuation.
    pub fn of(raw: &str) -> Self {
        match digits_only(raw).len() {
            11 => Self::Cpf,
            14 => Self::Cnpj,
            _ => Self::Unknown,
        }
    }

    /// Display name of the kind.
    pub fn label(self) -> &'static str {
        match self {
            Self::Cpf => "CPF",
            Self::Cnpj => "CNPJ",
            Self::Unknown => "Desconhecido",
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum IdentifierError {
    #[error("identifier is empty")]
    Empty,
    #[error("expected 11 (CPF) or 14 (CNPJ) digits, got {0}")]
    DigitCount(usize),
}

/// Keep only ASCII digits.
pub fn digits_only(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Reformat an identifier to its canonical punctuated form.
///
/// Input: `"12345678901"`, `"123.456.789-01"`, `"12345678000199"`
/// Output: `"123.456.789-01"`, `"123.456.789-01"`, `"12.345.678/0001-99"`
pub fn mask_identifier(raw: &str) -> String {
    let d = digits_only(raw);
    match d.len() {
        11 => format!("{}.{}.{}-{}", &d[..3], &d[3..6], &d[6..9], &d[9..]),
        14 => format!(
            "{}.{}.{}/{}-{}",
            &d[..2],
            &d[2..5],
            &d[5..8],
            &d[8..12],
            &d[12..]
        ),
        _ => d,
    }
}

/// Check that an identifier has a CPF or CNPJ digit count.
///
/// Returns the kind on success so callers can log it.
pub fn validate_identifier(raw: &str) -> Result<IdentifierKind, IdentifierError> {
    let d = digits_only(raw);
    match IdentifierKind::of(&d) {
        IdentifierKind::Unknown if d.is_empty() => Err(IdentifierError::Empty),
        IdentifierKind::Unknown => Err(IdentifierError::DigitCount(d.len())),
        kind => Ok(kind),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masks_cpf() {
        assert_eq!(mask_identifier("12345678901"), "123.456.789-01");
    }

    #[test]
    fn masks_cnpj() {
        assert_eq!(mask_identifier("12345678000199"), "12.345.678/0001-99");
    }

    #[test]
    fn remask_is_stable() {
        let once = mask_identifier("123.456.789-01");
        assert_eq!(mask_identifier(&once), once);
        let once = mask_identifier("12.345.678/0001-99");
        assert_eq!(mask_identifier(&once), once);
    }

    #[test]
    fn other_lengths_become_bare_digits() {
        assert_eq!(mask_identifier("12-34"), "1234");
        assert_eq!(mask_identifier("abc"), "");
        assert_eq!(mask_identifier("1234567890123"), "1234567890123");
    }

    #[test]
    fn non_ascii_digits_are_dropped() {
        assert_eq!(digits_only("１２3 4"), "34");
    }

    #[test]
    fn kind_by_digit_count() {
        assert_eq!(IdentifierKind::of("123.456.789-01"), IdentifierKind::Cpf);
        assert_eq!(IdentifierKind::of("12.345.678/0001-99"), IdentifierKind::Cnpj);
        assert_eq!(IdentifierKind::of("123"), IdentifierKind::Unknown);
        assert_eq!(IdentifierKind::Cnpj.label(), "CNPJ");
    }

    #[test]
    fn validation() {
        assert_eq!(validate_identifier("12345678901"), Ok(IdentifierKind::Cpf));
        assert_eq!(validate_identifier(" .-/ "), Err(IdentifierError::Empty));
        assert_eq!(validate_identifier("1234"), Err(IdentifierError::DigitCount(4)));
    }
}
