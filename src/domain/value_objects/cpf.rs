//! CPF (Cadastro de Pessoas Físicas) value object

use super::{all_digits_equal, mod11_check_digit, to_digit_vec};
use crate::domain::errors::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Brazilian individual taxpayer ID, stored as 11 bare digits
///
/// Parsing strips `.` and `-` and rejects anything that is not 11 digits or
/// whose digits are all identical. Check digits are not verified here; use
/// [`Cpf::has_valid_check_digits`] where that rigor is required.
///
/// # Examples
///
/// ```
/// use clinidata::domain::value_objects::Cpf;
///
/// let cpf = Cpf::parse("529.982.247-25").unwrap();
/// assert_eq!(cpf.as_str(), "52998224725");
/// assert_eq!(cpf.formatted(), "529.982.247-25");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Cpf(String);

impl Cpf {
    /// Number of digits in a CPF
    pub const LEN: usize = 11;

    /// Normalizes and validates a raw CPF string
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let digits: String = raw
            .trim()
            .chars()
            .filter(|c| *c != '.' && *c != '-')
            .collect();

        if !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(DomainError::InvalidCpf(
                "deve conter apenas dígitos, pontos e hífen".to_string(),
            ));
        }
        if digits.len() != Self::LEN {
            return Err(DomainError::InvalidCpf(format!(
                "deve conter {} dígitos, encontrados {}",
                Self::LEN,
                digits.len()
            )));
        }
        if all_digits_equal(&digits) {
            return Err(DomainError::InvalidCpf(
                "todos os dígitos são iguais".to_string(),
            ));
        }

        Ok(Self(digits))
    }

    /// Returns the 11 bare digits
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Masked form `###.###.###-##`
    pub fn formatted(&self) -> String {
        let d = &self.0;
        format!("{}.{}.{}-{}", &d[0..3], &d[3..6], &d[6..9], &d[9..11])
    }

    /// Verifies both modulo-11 check digits
    pub fn has_valid_check_digits(&self) -> bool {
        let digits = to_digit_vec(&self.0);
        let first = mod11_check_digit(&digits[..9], &[10, 9, 8, 7, 6, 5, 4, 3, 2]);
        let second = mod11_check_digit(&digits[..10], &[11, 10, 9, 8, 7, 6, 5, 4, 3, 2]);
        digits[9] == first && digits[10] == second
    }
}

impl fmt::Display for Cpf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Cpf {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Cpf {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Cpf> for String {
    fn from(cpf: Cpf) -> Self {
        cpf.0
    }
}

impl AsRef<str> for Cpf {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("52998224725" ; "bare digits")]
    #[test_case("529.982.247-25" ; "masked")]
    #[test_case("  529.982.247-25 " ; "surrounding whitespace")]
    #[test_case("12345678900" ; "invalid check digits still parse")]
    fn test_parse_accepts(raw: &str) {
        let cpf = Cpf::parse(raw).unwrap();
        assert_eq!(cpf.as_str().len(), Cpf::LEN);
    }

    #[test_case("" ; "empty")]
    #[test_case("1234567890" ; "ten digits")]
    #[test_case("123456789012" ; "twelve digits")]
    #[test_case("111.111.111-11" ; "repeated digits")]
    #[test_case("00000000000" ; "all zeros")]
    #[test_case("529/982/247-25" ; "unsupported separator")]
    #[test_case("5299822472a" ; "letter")]
    fn test_parse_rejects(raw: &str) {
        assert!(matches!(Cpf::parse(raw), Err(DomainError::InvalidCpf(_))));
    }

    #[test]
    fn test_any_non_repeating_eleven_digits_roundtrip() {
        for seed in [1u64, 7, 42, 9_999, 123_456_789, 98_765_432_109] {
            let digits = format!("{seed:011}");
            let cpf = Cpf::parse(&digits).unwrap();
            assert_eq!(cpf.as_str(), digits);
            assert_eq!(Cpf::parse(&cpf.formatted()).unwrap(), cpf);
        }
    }

    #[test]
    fn test_check_digits() {
        assert!(Cpf::parse("529.982.247-25").unwrap().has_valid_check_digits());
        assert!(!Cpf::parse("529.982.247-26").unwrap().has_valid_check_digits());
        assert!(!Cpf::parse("12345678900").unwrap().has_valid_check_digits());
    }

    #[test]
    fn test_serde_roundtrip_through_string() {
        let cpf: Cpf = serde_json::from_str("\"529.982.247-25\"").unwrap();
        assert_eq!(serde_json::to_string(&cpf).unwrap(), "\"52998224725\"");
        assert!(serde_json::from_str::<Cpf>("\"123\"").is_err());
    }
}
