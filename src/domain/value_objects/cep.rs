//! CEP (Código de Endereçamento Postal) value object

use crate::domain::errors::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Brazilian postal code, stored as 8 bare digits
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Cep(String);

impl Cep {
    /// Number of digits in a CEP
    pub const LEN: usize = 8;

    /// Strips every non-digit and requires exactly 8 digits
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
        if digits.len() != Self::LEN {
            return Err(DomainError::InvalidCep(format!(
                "deve conter {} dígitos, encontrados {}",
                Self::LEN,
                digits.len()
            )));
        }
        Ok(Self(digits))
    }

    /// Returns the 8 bare digits
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Masked form `#####-###`
    pub fn formatted(&self) -> String {
        format!("{}-{}", &self.0[..5], &self.0[5..])
    }
}

impl fmt::Display for Cep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.formatted())
    }
}

impl FromStr for Cep {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Cep {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Cep> for String {
    fn from(cep: Cep) -> Self {
        cep.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("01310-100", "01310100" ; "masked")]
    #[test_case("01310100", "01310100" ; "bare")]
    #[test_case("01.310-100", "01310100" ; "dotted")]
    #[test_case(" 01310 100 ", "01310100" ; "spaces")]
    fn test_parse_strips_non_digits(raw: &str, expected: &str) {
        assert_eq!(Cep::parse(raw).unwrap().as_str(), expected);
    }

    #[test_case("" ; "empty")]
    #[test_case("0131010" ; "seven digits")]
    #[test_case("013101000" ; "nine digits")]
    #[test_case("abcde-fgh" ; "letters only")]
    fn test_parse_rejects(raw: &str) {
        assert!(matches!(Cep::parse(raw), Err(DomainError::InvalidCep(_))));
    }

    #[test]
    fn test_formatted_mask() {
        let cep = Cep::parse("01310100").unwrap();
        assert_eq!(cep.formatted(), "01310-100");
        assert_eq!(cep.to_string(), "01310-100");
    }
}
