//! E-mail address value object

use crate::domain::errors::DomainError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

const MAX_LOCAL_LEN: usize = 64;
const MAX_TOTAL_LEN: usize = 254;
const MAX_LABEL_LEN: usize = 63;

fn email_regex() -> &'static Regex {
    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[a-z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-z0-9-]+(\.[a-z0-9-]+)+$")
            .expect("e-mail pattern is a valid regex")
    })
}

/// E-mail address, trimmed and lower-cased
///
/// Validation is a regex pass followed by a structural parse into local part
/// and domain labels. The address rendered back from the parsed parts must
/// equal the normalized input, so two inputs differing only in case compare
/// equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Normalizes and validates a raw e-mail string
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let normalized = raw.trim().to_lowercase();
        if normalized.is_empty() {
            return Err(DomainError::InvalidEmail("não informado".to_string()));
        }
        if normalized.len() > MAX_TOTAL_LEN {
            return Err(DomainError::InvalidEmail(format!(
                "excede {MAX_TOTAL_LEN} caracteres"
            )));
        }
        if !email_regex().is_match(&normalized) {
            return Err(DomainError::InvalidEmail(format!(
                "'{normalized}' não é um endereço válido"
            )));
        }

        let (local, domain) = parse_address(&normalized)?;
        let rendered = format!("{local}@{}", domain.join("."));
        if rendered != normalized {
            return Err(DomainError::InvalidEmail(format!(
                "'{normalized}' não é um endereço válido"
            )));
        }

        Ok(Self(normalized))
    }

    /// Returns the normalized address
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Part after the `@`
    pub fn domain(&self) -> &str {
        self.0.split_once('@').map(|(_, d)| d).unwrap_or("")
    }
}

/// Splits an address into its local part and domain labels
fn parse_address(address: &str) -> Result<(&str, Vec<&str>), DomainError> {
    let invalid = |reason: &str| DomainError::InvalidEmail(reason.to_string());

    let (local, domain) = address
        .split_once('@')
        .ok_or_else(|| invalid("falta o '@'"))?;
    if domain.contains('@') {
        return Err(invalid("contém mais de um '@'"));
    }

    if local.is_empty() || local.len() > MAX_LOCAL_LEN {
        return Err(invalid("parte local vazia ou longa demais"));
    }
    if local.starts_with('.') || local.ends_with('.') || local.contains("..") {
        return Err(invalid("pontos mal posicionados na parte local"));
    }

    let labels: Vec<&str> = domain.split('.').collect();
    for label in &labels {
        if label.is_empty() || label.len() > MAX_LABEL_LEN {
            return Err(invalid("domínio com rótulo vazio ou longo demais"));
        }
        if label.starts_with('-') || label.ends_with('-') {
            return Err(invalid("rótulo de domínio começa ou termina com hífen"));
        }
    }

    Ok((local, labels))
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Email {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Email {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Email> for String {
    fn from(email: Email) -> Self {
        email.0
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("maria@clinica.com.br", "maria@clinica.com.br" ; "plain")]
    #[test_case("  Maria.Silva@Clinica.COM ", "maria.silva@clinica.com" ; "trimmed and lowered")]
    #[test_case(
        "joao+consultas@hospital-central.org",
        "joao+consultas@hospital-central.org" ;
        "plus and hyphen"
    )]
    fn test_parse_normalizes(raw: &str, expected: &str) {
        assert_eq!(Email::parse(raw).unwrap().as_str(), expected);
    }

    #[test_case("" ; "empty")]
    #[test_case("maria" ; "no at sign")]
    #[test_case("maria@" ; "no domain")]
    #[test_case("@clinica.com" ; "no local part")]
    #[test_case("maria@clinica" ; "single label domain")]
    #[test_case("maria@@clinica.com" ; "double at")]
    #[test_case("maria..silva@clinica.com" ; "consecutive dots")]
    #[test_case(".maria@clinica.com" ; "leading dot")]
    #[test_case("maria@-clinica.com" ; "label starts with hyphen")]
    #[test_case("maria@clinica..com" ; "empty label")]
    #[test_case("maria silva@clinica.com" ; "space")]
    fn test_parse_rejects(raw: &str) {
        assert!(matches!(Email::parse(raw), Err(DomainError::InvalidEmail(_))));
    }

    #[test]
    fn test_equality_is_case_insensitive() {
        let a = Email::parse("Dr.House@Hospital.org").unwrap();
        let b = Email::parse("dr.house@hospital.ORG").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_domain() {
        let email = Email::parse("ana@Clinica.com.br").unwrap();
        assert_eq!(email.domain(), "clinica.com.br");
    }

    #[test]
    fn test_local_part_length_limit() {
        let local = "a".repeat(65);
        assert!(Email::parse(&format!("{local}@clinica.com")).is_err());
        let local = "a".repeat(64);
        assert!(Email::parse(&format!("{local}@clinica.com")).is_ok());
    }
}
