//! CNPJ (Cadastro Nacional da Pessoa Jurídica) value object

use super::{all_digits_equal, mod11_check_digit, to_digit_vec};
use crate::domain::errors::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Brazilian company taxpayer ID, stored as 14 bare digits
///
/// Same leniency as [`Cpf`](super::Cpf): punctuation is stripped and the
/// shape is checked, check digits are verified only on request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Cnpj(String);

impl Cnpj {
    /// Number of digits in a CNPJ
    pub const LEN: usize = 14;

    const FIRST_WEIGHTS: [u32; 12] = [5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];
    const SECOND_WEIGHTS: [u32; 13] = [6, 5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];

    /// Normalizes and validates a raw CNPJ string
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let digits: String = raw
            .trim()
            .chars()
            .filter(|c| !matches!(c, '.' | '/' | '-'))
            .collect();

        if !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(DomainError::InvalidCnpj(
                "deve conter apenas dígitos, pontos, barra e hífen".to_string(),
            ));
        }
        if digits.len() != Self::LEN {
            return Err(DomainError::InvalidCnpj(format!(
                "deve conter {} dígitos, encontrados {}",
                Self::LEN,
                digits.len()
            )));
        }
        if all_digits_equal(&digits) {
            return Err(DomainError::InvalidCnpj(
                "todos os dígitos são iguais".to_string(),
            ));
        }

        Ok(Self(digits))
    }

    /// Returns the 14 bare digits
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Masked form `##.###.###/####-##`
    pub fn formatted(&self) -> String {
        let d = &self.0;
        format!(
            "{}.{}.{}/{}-{}",
            &d[0..2],
            &d[2..5],
            &d[5..8],
            &d[8..12],
            &d[12..14]
        )
    }

    /// Verifies both modulo-11 check digits
    pub fn has_valid_check_digits(&self) -> bool {
        let digits = to_digit_vec(&self.0);
        let first = mod11_check_digit(&digits[..12], &Self::FIRST_WEIGHTS);
        let second = mod11_check_digit(&digits[..13], &Self::SECOND_WEIGHTS);
        digits[12] == first && digits[13] == second
    }
}

impl fmt::Display for Cnpj {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Cnpj {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Cnpj {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Cnpj> for String {
    fn from(cnpj: Cnpj) -> Self {
        cnpj.0
    }
}
