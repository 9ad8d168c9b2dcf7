//! Core identifier types with validation.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation errors for core types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The provided value was empty.
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },

    /// The token was not a 4-digit numeric code.
    #[error("token ID must be exactly 4 digits, got {value:?}")]
    InvalidToken { value: String },

    /// The employee ID did not match `S` + 4 digits.
    #[error("employee ID must be 'S' followed by 4 digits, got {value:?}")]
    InvalidEmployeeId { value: String },
}

/// A validated badge token identifier.
///
/// Tokens are the 4-digit numeric codes printed on identity badges. They are
/// the join key between scan events, attendance records, and the roster.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TokenId(String);

impl TokenId {
    /// Creates a new token ID after validation.
    pub fn new(token: impl Into<String>) -> Result<Self, ValidationError> {
        let token = token.into();
        if token.is_empty() {
            return Err(ValidationError::Empty { field: "token ID" });
        }
        if token.len() != 4 || !token.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ValidationError::InvalidToken { value: token });
        }
        Ok(Self(token))
    }

    /// Returns the token as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A validated employee identifier.
///
/// Employee IDs are `S` followed by 4 digits. A lowercase `s` is normalized
/// to uppercase on construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmployeeId(String);

impl EmployeeId {
    /// Creates a new employee ID after validation and case normalization.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.is_empty() {
            return Err(ValidationError::Empty {
                field: "employee ID",
            });
        }
        let normalized = id.to_ascii_uppercase();
        let digits = normalized.strip_prefix('S').ok_or_else(|| {
            ValidationError::InvalidEmployeeId { value: id.clone() }
        })?;
        if digits.len() != 4 || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ValidationError::InvalidEmployeeId { value: id });
        }
        Ok(Self(normalized))
    }

    /// Returns the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

macro_rules! impl_id_traits {
    ($name:ident) => {
        impl TryFrom<String> for $name {
            type Error = ValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl std::str::FromStr for $name {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

impl_id_traits!(TokenId);
impl_id_traits!(EmployeeId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_id_accepts_four_digits() {
        assert!(TokenId::new("1234").is_ok());
        assert!(TokenId::new("0001").is_ok());
    }

    #[test]
    fn token_id_rejects_bad_input() {
        assert!(TokenId::new("").is_err());
        assert!(TokenId::new("123").is_err());
        assert!(TokenId::new("12345").is_err());
        assert!(TokenId::new("12a4").is_err());
        assert!(TokenId::new("-123").is_err());
    }

    #[test]
    fn employee_id_accepts_s_plus_four_digits() {
        assert_eq!(EmployeeId::new("S0001").unwrap().as_str(), "S0001");
    }

    #[test]
    fn employee_id_normalizes_lowercase() {
        assert_eq!(EmployeeId::new("s1234").unwrap().as_str(), "S1234");
    }

    #[test]
    fn employee_id_rejects_bad_input() {
        assert!(EmployeeId::new("").is_err());
        assert!(EmployeeId::new("0001").is_err());
        assert!(EmployeeId::new("S001").is_err());
        assert!(EmployeeId::new("S00011").is_err());
        assert!(EmployeeId::new("T0001").is_err());
        assert!(EmployeeId::new("Sabcd").is_err());
    }

    #[test]
    fn token_id_serde_roundtrip() {
        let token = TokenId::new("4321").unwrap();
        let json = serde_json::to_string(&token).unwrap();
        assert_eq!(json, "\"4321\"");
        let parsed: TokenId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, token);
    }

    #[test]
    fn token_id_serde_rejects_invalid() {
        let result: Result<TokenId, _> = serde_json::from_str("\"12\"");
        assert!(result.is_err());
    }
}
