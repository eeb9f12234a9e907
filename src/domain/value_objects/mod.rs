//! Value objects
//!
//! Every value object has exactly one constructor path, `parse`, which
//! normalizes the raw input once and either returns the canonical value or a
//! [`DomainError`](crate::domain::DomainError). `FromStr`, `TryFrom<String>`
//! and serde deserialization all delegate to it.

pub mod cep;
pub mod cnpj;
pub mod cpf;
pub mod crm;
pub mod email;
pub mod endereco;
pub mod uf;

pub use cep::Cep;
pub use cnpj::Cnpj;
pub use cpf::Cpf;
pub use crm::Crm;
pub use email::Email;
pub use endereco::{Endereco, EnderecoBuilder};
pub use uf::Uf;

/// True when every character of `digits` is the same
fn all_digits_equal(digits: &str) -> bool {
    let mut chars = digits.chars();
    match chars.next() {
        Some(first) => chars.all(|c| c == first),
        None => true,
    }
}

/// Modulo-11 check digit over `digits` with the given weights
///
/// Shared by CPF and CNPJ: a remainder below 2 yields 0, otherwise `11 - r`.
fn mod11_check_digit(digits: &[u32], weights: &[u32]) -> u32 {
    let sum: u32 = digits.iter().zip(weights).map(|(d, w)| d * w).sum();
    let remainder = sum % 11;
    if remainder < 2 {
        0
    } else {
        11 - remainder
    }
}

fn to_digit_vec(digits: &str) -> Vec<u32> {
    digits.chars().filter_map(|c| c.to_digit(10)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_digits_equal() {
        assert!(all_digits_equal("11111111111"));
        assert!(!all_digits_equal("11111111112"));
        assert!(all_digits_equal(""));
    }

    #[test]
    fn test_mod11_check_digit() {
        // First CPF check digit of 529.982.247-25
        let digits = to_digit_vec("529982247");
        assert_eq!(mod11_check_digit(&digits, &[10, 9, 8, 7, 6, 5, 4, 3, 2]), 2);
    }
}
