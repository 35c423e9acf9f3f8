//! Company tax identifier (Brazilian CNPJ) with check-digit validation.
//!
//! A raw identifier is accepted with or without its usual punctuation
//! (`NN.NNN.NNN/NNNN-NN`). Parsing strips every character that is not an
//! ASCII digit, then requires exactly 14 digits whose last two digits match
//! the weighted modulo-11 check digits computed from the preceding digits.
//!
//! Validation is a pure function of the input. The validated value stores the
//! normalised 14 digits so that formatted and unformatted spellings of the same
//! identifier compare equal.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of digits in a normalised tax identifier.
pub const TAX_ID_LEN: usize = 14;

const FIRST_CHECK_WEIGHTS: [u32; 12] = [5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];
const SECOND_CHECK_WEIGHTS: [u32; 13] = [6, 5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];

/// Structural problem detected before the check digits are computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatIssue {
    /// The normalised identifier does not have exactly 14 characters.
    WrongLength {
        /// Length observed after normalisation.
        actual: usize,
    },
    /// The normalised identifier contains a character that is not a digit.
    ///
    /// Normalisation keeps digits only, so [`TaxId::parse`] never reports it.
    NonNumeric,
}

/// Validation failures returned by [`TaxId::parse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaxIdError {
    /// No value was supplied. Callers decide whether absence is acceptable.
    Empty,
    /// The identifier is not 14 digits once formatting is removed.
    InvalidFormat(FormatIssue),
    /// The trailing check digits do not match the computed ones.
    InvalidCheckDigit,
}

impl TaxIdError {
    /// Stable machine-readable reason code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Empty => "empty_tax_id",
            Self::InvalidFormat(FormatIssue::WrongLength { .. }) => "invalid_tax_id_length",
            Self::InvalidFormat(FormatIssue::NonNumeric) => "non_numeric_tax_id",
            Self::InvalidCheckDigit => "invalid_check_digit",
        }
    }
}

impl fmt::Display for TaxIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "tax id must not be empty"),
            Self::InvalidFormat(FormatIssue::WrongLength { actual }) => write!(
                f,
                "tax id must contain exactly {TAX_ID_LEN} digits, got {actual}"
            ),
            Self::InvalidFormat(FormatIssue::NonNumeric) => {
                write!(f, "tax id must contain only digits")
            }
            Self::InvalidCheckDigit => write!(f, "tax id check digits do not match"),
        }
    }
}

impl std::error::Error for TaxIdError {}

/// Validated company tax identifier holding its normalised digits.
///
/// # Examples
/// ```
/// use fleet_backend::domain::TaxId;
///
/// let tax_id = TaxId::parse("39.417.743/0001-05").expect("valid identifier");
/// assert_eq!(tax_id.as_ref(), "39417743000105");
/// assert_eq!(tax_id.formatted(), "39.417.743/0001-05");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TaxId(String);

impl TaxId {
    /// Normalise and validate a raw identifier.
    ///
    /// Empty or whitespace-only input yields [`TaxIdError::Empty`].
    pub fn parse(raw: &str) -> Result<Self, TaxIdError> {
        let digits = normalise(raw);
        if digits.is_empty() && raw.trim().is_empty() {
            return Err(TaxIdError::Empty);
        }

        let length = digits.chars().count();
        if length != TAX_ID_LEN {
            return Err(TaxIdError::InvalidFormat(FormatIssue::WrongLength {
                actual: length,
            }));
        }

        let values = digit_values(&digits)?;
        let [body @ .., first_check, second_check] = values.as_slice() else {
            return Err(TaxIdError::InvalidFormat(FormatIssue::WrongLength {
                actual: length,
            }));
        };
        let mut first_thirteen = body.to_vec();
        first_thirteen.push(*first_check);

        if check_digit(body, &FIRST_CHECK_WEIGHTS) != *first_check
            || check_digit(&first_thirteen, &SECOND_CHECK_WEIGHTS) != *second_check
        {
            return Err(TaxIdError::InvalidCheckDigit);
        }

        Ok(Self(digits))
    }

    /// Validate an identifier that may legitimately be absent.
    ///
    /// Empty input is treated as "no value" and skipped rather than rejected.
    ///
    /// # Examples
    /// ```
    /// use fleet_backend::domain::TaxId;
    ///
    /// assert_eq!(TaxId::parse_optional("").expect("empty is skipped"), None);
    /// assert!(TaxId::parse_optional("39417743000199").is_err());
    /// ```
    pub fn parse_optional(raw: &str) -> Result<Option<Self>, TaxIdError> {
        match Self::parse(raw) {
            Ok(tax_id) => Ok(Some(tax_id)),
            Err(TaxIdError::Empty) => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Render the identifier with its conventional punctuation.
    #[must_use]
    pub fn formatted(&self) -> String {
        let d = self.0.as_str();
        match (d.get(0..2), d.get(2..5), d.get(5..8), d.get(8..12), d.get(12..14)) {
            (Some(a), Some(b), Some(c), Some(branch), Some(check)) => {
                format!("{a}.{b}.{c}/{branch}-{check}")
            }
            _ => self.0.clone(),
        }
    }
}

fn normalise(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

fn digit_values(digits: &str) -> Result<Vec<u32>, TaxIdError> {
    digits
        .chars()
        .map(|c| {
            if c.is_ascii_digit() {
                c.to_digit(10)
                    .ok_or(TaxIdError::InvalidFormat(FormatIssue::NonNumeric))
            } else {
                Err(TaxIdError::InvalidFormat(FormatIssue::NonNumeric))
            }
        })
        .collect()
}

/// Weighted modulo-11 check digit: remainders below two map to zero.
fn check_digit(digits: &[u32], weights: &[u32]) -> u32 {
    let sum: u32 = digits.iter().zip(weights).map(|(d, w)| d * w).sum();
    let remainder = sum % 11;
    if remainder < 2 { 0 } else { 11 - remainder }
}

impl AsRef<str> for TaxId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for TaxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<TaxId> for String {
    fn from(value: TaxId) -> Self {
        value.0
    }
}

impl TryFrom<String> for TaxId {
    type Error = TaxIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("39.417.743/0001-05", "39417743000105")]
    #[case("99.750.592/0001-26", "99750592000126")]
    #[case("39417743000105", "39417743000105")]
    #[case("18.754.544/0001-04", "18754544000104")]
    #[case("08.607.145/0001-67", "08607145000167")]
    #[case("92.389.497/0001-08", "92389497000108")]
    #[case(" 94.243.181/0001-20 ", "94243181000120")]
    #[case("94 403 936 0001 07", "94403936000107")]
    #[case("CNPJ 39.417.743/0001-05", "39417743000105")]
    #[case("39.417.743/0001-05a", "39417743000105")]
    #[case("39_417_743_0001_05", "39417743000105")]
    fn accepts_valid_identifiers(#[case] raw: &str, #[case] normalised: &str) {
        let tax_id = TaxId::parse(raw).expect("valid tax id");
        assert_eq!(tax_id.as_ref(), normalised);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn empty_input_is_absent(#[case] raw: &str) {
        assert_eq!(TaxId::parse(raw), Err(TaxIdError::Empty));
        assert_eq!(TaxId::parse_optional(raw), Ok(None));
    }

    #[rstest]
    #[case("1", 1)]
    #[case("./-", 0)]
    #[case("3941774300010", 13)]
    #[case("394177430001055", 15)]
    #[case("39.417.743/0001-0", 13)]
    fn rejects_wrong_length(#[case] raw: &str, #[case] actual: usize) {
        assert_eq!(
            TaxId::parse(raw),
            Err(TaxIdError::InvalidFormat(FormatIssue::WrongLength { actual }))
        );
    }

    #[rstest]
    #[case("3941774300010A", 13)]
    #[case("AB.417.743/0001-05", 12)]
    #[case("39417743０00105", 13)]
    #[case("abc", 0)]
    fn letters_and_non_ascii_digits_are_stripped(#[case] raw: &str, #[case] actual: usize) {
        assert_eq!(
            TaxId::parse(raw),
            Err(TaxIdError::InvalidFormat(FormatIssue::WrongLength { actual }))
        );
    }

    #[rstest]
    #[case("3941774300010A")]
    #[case("39417743０00105")]
    fn digit_values_reject_non_digits(#[case] candidate: &str) {
        assert_eq!(
            digit_values(candidate),
            Err(TaxIdError::InvalidFormat(FormatIssue::NonNumeric))
        );
    }

    #[rstest]
    #[case("39417743000199")]
    #[case("39.417.743/0001-06")]
    #[case("99750592000127")]
    #[case("11111111111111")]
    fn rejects_mismatched_check_digits(#[case] raw: &str) {
        assert_eq!(TaxId::parse(raw), Err(TaxIdError::InvalidCheckDigit));
        assert_eq!(
            TaxId::parse_optional(raw),
            Err(TaxIdError::InvalidCheckDigit)
        );
    }

    #[rstest]
    #[case("39417743000105")]
    #[case("39417743000199")]
    #[case("1")]
    fn validation_is_idempotent(#[case] raw: &str) {
        assert_eq!(TaxId::parse(raw), TaxId::parse(raw));
    }

    #[rstest]
    fn remainder_below_two_yields_zero_check_digit() {
        // 00.000.000/0000-00 sums to zero for both digits.
        assert!(TaxId::parse("00000000000000").is_ok());
    }

    #[rstest]
    fn formatted_restores_punctuation() {
        let tax_id = TaxId::parse("99750592000126").expect("valid tax id");
        assert_eq!(tax_id.formatted(), "99.750.592/0001-26");
    }

    #[rstest]
    fn formatted_and_plain_spellings_are_equal() {
        let formatted = TaxId::parse("07.831.181/0001-47").expect("valid tax id");
        let plain = TaxId::parse("07831181000147").expect("valid tax id");
        assert_eq!(formatted, plain);
    }

    #[rstest]
    #[case(TaxIdError::Empty, "empty_tax_id")]
    #[case(
        TaxIdError::InvalidFormat(FormatIssue::WrongLength { actual: 3 }),
        "invalid_tax_id_length"
    )]
    #[case(TaxIdError::InvalidFormat(FormatIssue::NonNumeric), "non_numeric_tax_id")]
    #[case(TaxIdError::InvalidCheckDigit, "invalid_check_digit")]
    fn error_codes_are_stable(#[case] error: TaxIdError, #[case] code: &str) {
        assert_eq!(error.code(), code);
    }

    #[rstest]
    fn serde_round_trip_uses_normalised_digits() {
        let tax_id: TaxId =
            serde_json::from_str("\"17.939.227/0001-08\"").expect("deserialise tax id");
        assert_eq!(
            serde_json::to_string(&tax_id).expect("serialise tax id"),
            "\"17939227000108\""
        );
    }
}
