//! Result type alias for CliniData
//!
//! This module provides a convenient Result type alias that uses ClinidataError
//! as the error type.

use super::errors::ClinidataError;

/// Result type alias for CliniData operations
///
/// # Examples
///
/// ```
/// use clinidata::domain::result::Result;
/// use clinidata::domain::errors::ClinidataError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(ClinidataError::Conflict("CPF já cadastrado".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, ClinidataError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::DomainError;

    #[test]
    fn test_result_with_question_mark() -> Result<()> {
        fn inner() -> Result<i32> {
            Ok(42)
        }

        let value = inner()?;
        assert_eq!(value, 42);
        Ok(())
    }

    #[test]
    fn test_domain_error_propagates_with_question_mark() {
        fn inner() -> Result<()> {
            Err(DomainError::DataNascimentoFutura)?
        }

        assert!(inner().is_err());
    }
}
