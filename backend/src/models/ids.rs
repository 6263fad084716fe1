//! Catalog identifiers.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::define_id_type;

define_id_type!(TicId);
define_id_type!(PlanetNum);

static DIGITS_ONLY: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+$").expect("valid regex"));

/// Why a user-supplied TIC string was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TicParseError {
    #[error("TIC cannot be empty.")]
    Empty,
    #[error("Invalid TIC: {0}. Must be a positive integer.")]
    NotAPositiveInteger(String),
}

impl TicId {
    /// Parse a TIC from a query-string value.
    ///
    /// Surrounding whitespace is ignored. Anything other than plain decimal
    /// digits (signs, decimal points, exponents) is rejected, as is zero or a
    /// value that does not fit in an `i64`.
    pub fn parse(raw: &str) -> Result<Self, TicParseError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TicParseError::Empty);
        }
        if !DIGITS_ONLY.is_match(trimmed) {
            return Err(TicParseError::NotAPositiveInteger(trimmed.to_string()));
        }
        match trimmed.parse::<i64>() {
            Ok(v) if v > 0 => Ok(TicId(v)),
            _ => Err(TicParseError::NotAPositiveInteger(trimmed.to_string())),
        }
    }

    /// The TIC zero-padded to the 16 digits used in product filenames.
    pub fn zero_padded(&self) -> String {
        format!("{:016}", self.0)
    }
}

impl PlanetNum {
    /// Two-digit form used in per-planet product filenames (`dvs-01`).
    pub fn zero_padded(&self) -> String {
        format!("{:02}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_tic() {
        assert_eq!(TicId::parse("261136679"), Ok(TicId(261136679)));
        assert_eq!(TicId::parse("  42 "), Ok(TicId(42)));
    }

    #[test]
    fn test_parse_rejects_empty() {
        assert_eq!(TicId::parse(""), Err(TicParseError::Empty));
        assert_eq!(TicId::parse("   "), Err(TicParseError::Empty));
    }

    #[test]
    fn test_parse_rejects_non_numeric() {
        for raw in ["abc", "-5", "+5", "1.5", "1e3", "12a"] {
            assert!(
                matches!(TicId::parse(raw), Err(TicParseError::NotAPositiveInteger(_))),
                "{raw} should be rejected"
            );
        }
    }

    #[test]
    fn test_parse_rejects_zero_and_overflow() {
        assert!(TicId::parse("0").is_err());
        assert!(TicId::parse("0000").is_err());
        assert!(TicId::parse("99999999999999999999").is_err());
    }

    #[test]
    fn test_zero_padding() {
        assert_eq!(TicId(33979459).zero_padded(), "0000000033979459");
        assert_eq!(PlanetNum(1).zero_padded(), "01");
        assert_eq!(PlanetNum(12).zero_padded(), "12");
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(TicParseError::Empty.to_string(), "TIC cannot be empty.");
        assert_eq!(
            TicParseError::NotAPositiveInteger("x1".into()).to_string(),
            "Invalid TIC: x1. Must be a positive integer."
        );
    }
}
