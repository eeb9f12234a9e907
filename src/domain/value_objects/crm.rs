//! CRM (Conselho Regional de Medicina) license value object

use super::uf::Uf;
use crate::domain::errors::DomainError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

fn crm_regex() -> &'static Regex {
    static CRM_REGEX: OnceLock<Regex> = OnceLock::new();
    CRM_REGEX.get_or_init(|| {
        Regex::new(r"^([0-9]{4,6})[/\s-]?([A-Za-z]{2})$").expect("CRM pattern is a valid regex")
    })
}

/// Medical license number tied to a federative unit
///
/// Accepts `NUMBER[/ -]UF` with 4 to 6 digits, in any letter case, and
/// stores the canonical form `NUMBER/UF`. Parsing the canonical form yields
/// the same value, so normalization is idempotent.
///
/// # Examples
///
/// ```
/// use clinidata::domain::value_objects::{Crm, Uf};
///
/// let crm = Crm::parse("123456 sp").unwrap();
/// assert_eq!(crm.as_str(), "123456/SP");
/// assert_eq!(crm.uf(), Uf::SP);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Crm {
    canonical: String,
    uf: Uf,
}

impl Crm {
    /// Normalizes and validates a raw CRM string
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let trimmed = raw.trim();
        let captures = crm_regex().captures(trimmed).ok_or_else(|| {
            DomainError::InvalidCrm(format!(
                "'{trimmed}' não está no formato NÚMERO/UF (4 a 6 dígitos)"
            ))
        })?;

        let numero = &captures[1];
        let uf = Uf::parse(&captures[2])
            .map_err(|_| DomainError::InvalidCrm(format!("UF desconhecida em '{trimmed}'")))?;

        Ok(Self {
            canonical: format!("{numero}/{uf}"),
            uf,
        })
    }

    /// Canonical `NUMBER/UF` form
    pub fn as_str(&self) -> &str {
        &self.canonical
    }

    /// Federative unit that issued the license
    pub fn uf(&self) -> Uf {
        self.uf
    }
}

impl fmt::Display for Crm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical)
    }
}

impl FromStr for Crm {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Crm {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Crm> for String {
    fn from(crm: Crm) -> Self {
        crm.canonical
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("123456/SP", "123456/SP" ; "canonical")]
    #[test_case("123456SP", "123456/SP" ; "no separator")]
    #[test_case("1234-rj", "1234/RJ" ; "hyphen and lower case")]
    #[test_case(" 98765 mg ", "98765/MG" ; "space separator")]
    fn test_parse_normalizes(raw: &str, expected: &str) {
        assert_eq!(Crm::parse(raw).unwrap().as_str(), expected);
    }

    #[test_case("" ; "empty")]
    #[test_case("123/SP" ; "too few digits")]
    #[test_case("1234567/SP" ; "too many digits")]
    #[test_case("123456/XX" ; "unknown uf")]
    #[test_case("123456//SP" ; "double separator")]
    #[test_case("CRM 123456/SP" ; "prefix")]
    fn test_parse_rejects(raw: &str) {
        assert!(matches!(Crm::parse(raw), Err(DomainError::InvalidCrm(_))));
    }

    #[test]
    fn test_normalization_is_idempotent() {
        for raw in ["123456sp", "1234 ba", "55555-rs", "000123/df"] {
            let once = Crm::parse(raw).unwrap();
            let twice = Crm::parse(once.as_str()).unwrap();
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_uf() {
        let crm = Crm::parse("45678-pe").unwrap();
        assert_eq!(crm.uf(), Uf::PE);
    }
}
