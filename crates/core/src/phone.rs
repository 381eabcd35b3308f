//! Phone normalization and validation.

use std::fmt;

/// Digits-only phone string, 10 to 13 digits.
///
/// Invariant: never constructed from input that fails the digit/length
/// check; [`validate`] is the only constructor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NormalizedPhone(String);

impl NormalizedPhone {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Full dial string with the run-wide country prefix applied.
    pub fn dial_string(&self, country_code: &str) -> String {
        format!("{country_code}{}", self.0)
    }
}

impl fmt::Display for NormalizedPhone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Why a raw phone string was rejected. Kept distinct from the report-level
/// status so logs can say which check failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InvalidPhone {
    /// Non-digit characters remain after stripping `+`, spaces and hyphens.
    NonDigit,
    /// Digit count outside the accepted 10..=13 range.
    BadLength(usize),
}

impl fmt::Display for InvalidPhone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonDigit => f.write_str("contains non-digit characters"),
            Self::BadLength(len) => write!(f, "{len} digits, expected 10 to 13"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PhoneCheck {
    Valid(NormalizedPhone),
    Invalid(InvalidPhone),
}

/// Normalizes and validates a raw phone string.
///
/// Strips `+`, spaces and hyphens anywhere in the input; the result must be
/// all-digit with length in `[10, 13]`. No side effects.
pub fn validate(raw: &str) -> PhoneCheck {
    let stripped: String = raw
        .trim()
        .chars()
        .filter(|c| !matches!(c, '+' | ' ' | '-'))
        .collect();

    if stripped.is_empty() || !stripped.bytes().all(|b| b.is_ascii_digit()) {
        return PhoneCheck::Invalid(InvalidPhone::NonDigit);
    }

    let len = stripped.len();
    if !(10..=13).contains(&len) {
        return PhoneCheck::Invalid(InvalidPhone::BadLength(len));
    }

    PhoneCheck::Valid(NormalizedPhone(stripped))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid(raw: &str) -> NormalizedPhone {
        match validate(raw) {
            PhoneCheck::Valid(phone) => phone,
            PhoneCheck::Invalid(reason) => panic!("expected {raw:?} to be valid, got {reason}"),
        }
    }

    #[test]
    fn strips_separators_and_plus() {
        assert_eq!(valid("11 98888-7777").as_str(), "11988887777");
        assert_eq!(valid("+55 11 98888-7777").as_str(), "5511988887777");
    }

    #[test]
    fn rejects_non_digits() {
        assert_eq!(validate("abc"), PhoneCheck::Invalid(InvalidPhone::NonDigit));
        assert_eq!(validate(""), PhoneCheck::Invalid(InvalidPhone::NonDigit));
        assert_eq!(validate("11 9888a-7777"), PhoneCheck::Invalid(InvalidPhone::NonDigit));
    }

    #[test]
    fn rejects_out_of_range_lengths() {
        assert_eq!(validate("123456789"), PhoneCheck::Invalid(InvalidPhone::BadLength(9)));
        assert_eq!(
            validate("12345678901234"),
            PhoneCheck::Invalid(InvalidPhone::BadLength(14))
        );
    }

    #[test]
    fn boundary_lengths_are_accepted() {
        assert_eq!(valid("1234567890").as_str(), "1234567890");
        assert_eq!(valid("1234567890123").as_str(), "1234567890123");
    }

    #[test]
    fn dial_string_applies_country_prefix() {
        assert_eq!(valid("11999990000").dial_string("55"), "5511999990000");
    }
}
