//! Brazilian federative units

use crate::domain::errors::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Closed set of the 27 Brazilian federative units (26 states + DF)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Uf {
    AC,
    AL,
    AP,
    AM,
    BA,
    CE,
    DF,
    ES,
    GO,
    MA,
    MT,
    MS,
    MG,
    PA,
    PB,
    PR,
    PE,
    PI,
    RJ,
    RN,
    RS,
    RO,
    RR,
    SC,
    SP,
    SE,
    TO,
}

impl Uf {
    /// All federative units in alphabetical order of their names
    pub const ALL: [Uf; 27] = [
        Uf::AC,
        Uf::AL,
        Uf::AP,
        Uf::AM,
        Uf::BA,
        Uf::CE,
        Uf::DF,
        Uf::ES,
        Uf::GO,
        Uf::MA,
        Uf::MT,
        Uf::MS,
        Uf::MG,
        Uf::PA,
        Uf::PB,
        Uf::PR,
        Uf::PE,
        Uf::PI,
        Uf::RJ,
        Uf::RN,
        Uf::RS,
        Uf::RO,
        Uf::RR,
        Uf::SC,
        Uf::SP,
        Uf::SE,
        Uf::TO,
    ];

    /// Parses a two-letter abbreviation, case-insensitively
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let normalized = raw.trim().to_ascii_uppercase();
        Self::ALL
            .iter()
            .copied()
            .find(|uf| uf.as_str() == normalized)
            .ok_or_else(|| DomainError::InvalidUf(raw.trim().to_string()))
    }

    /// Upper-case two-letter abbreviation
    pub fn as_str(&self) -> &'static str {
        match self {
            Uf::AC => "AC",
            Uf::AL => "AL",
            Uf::AP => "AP",
            Uf::AM => "AM",
            Uf::BA => "BA",
            Uf::CE => "CE",
            Uf::DF => "DF",
            Uf::ES => "ES",
            Uf::GO => "GO",
            Uf::MA => "MA",
            Uf::MT => "MT",
            Uf::MS => "MS",
            Uf::MG => "MG",
            Uf::PA => "PA",
            Uf::PB => "PB",
            Uf::PR => "PR",
            Uf::PE => "PE",
            Uf::PI => "PI",
            Uf::RJ => "RJ",
            Uf::RN => "RN",
            Uf::RS => "RS",
            Uf::RO => "RO",
            Uf::RR => "RR",
            Uf::SC => "SC",
            Uf::SP => "SP",
            Uf::SE => "SE",
            Uf::TO => "TO",
        }
    }
}

impl fmt::Display for Uf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Uf {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Uf {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Uf> for String {
    fn from(uf: Uf) -> Self {
        uf.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("SP", Uf::SP ; "upper case")]
    #[test_case("rj", Uf::RJ ; "lower case")]
    #[test_case(" Df ", Uf::DF ; "mixed case with spaces")]
    fn test_parse_valid(raw: &str, expected: Uf) {
        assert_eq!(Uf::parse(raw).unwrap(), expected);
    }

    #[test_case("" ; "empty")]
    #[test_case("XX" ; "unknown")]
    #[test_case("SPX" ; "too long")]
    fn test_parse_invalid(raw: &str) {
        assert!(matches!(Uf::parse(raw), Err(DomainError::InvalidUf(_))));
    }

    #[test]
    fn test_every_uf_roundtrips_through_its_abbreviation() {
        for uf in Uf::ALL {
            assert_eq!(Uf::parse(uf.as_str()).unwrap(), uf);
        }
    }

    #[test]
    fn test_serde_uses_abbreviation() {
        let json = serde_json::to_string(&Uf::MG).unwrap();
        assert_eq!(json, "\"MG\"");
        let parsed: Uf = serde_json::from_str("\"ba\"").unwrap();
        assert_eq!(parsed, Uf::BA);
        assert!(serde_json::from_str::<Uf>("\"ZZ\"").is_err());
    }
}
