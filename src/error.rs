//! Error type shared by the address engine.

use thiserror::Error;

/// Result alias used throughout the engine.
pub type Result<T> = std::result::Result<T, CalcError>;

/// Validation failures reported by the engine.
///
/// Every variant keeps the offending input text next to the reason, so a
/// single `to_string()` is enough for a user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalcError {
    /// Malformed dotted-quad, wrong octet count or out-of-range octet.
    #[error("Invalid address '{input}': {reason}")]
    InvalidAddress { input: String, reason: String },
    /// Prefix outside 0-32 or a mask with non-contiguous bits.
    #[error("Invalid prefix or mask '{input}': {reason}")]
    InvalidPrefix { input: String, reason: String },
    /// Non-positive or unsatisfiable host/subnet count.
    #[error("Invalid requirement '{input}': {reason}")]
    InvalidRequirement { input: String, reason: String },
    /// Range start after range end, or nothing to build a range from.
    #[error("Invalid range '{input}': {reason}")]
    InvalidRange { input: String, reason: String },
}

impl CalcError {
    pub fn address(input: impl ToString, reason: impl Into<String>) -> Self {
        CalcError::InvalidAddress {
            input: input.to_string(),
            reason: reason.into(),
        }
    }

    pub fn prefix(input: impl ToString, reason: impl Into<String>) -> Self {
        CalcError::InvalidPrefix {
            input: input.to_string(),
            reason: reason.into(),
        }
    }

    pub fn requirement(input: impl ToString, reason: impl Into<String>) -> Self {
        CalcError::InvalidRequirement {
            input: input.to_string(),
            reason: reason.into(),
        }
    }

    pub fn range(input: impl ToString, reason: impl Into<String>) -> Self {
        CalcError::InvalidRange {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_embeds_input_and_reason() {
        let err = CalcError::address("10.0.0.256", "octet 256 is out of range");
        assert_eq!(
            err.to_string(),
            "Invalid address '10.0.0.256': octet 256 is out of range"
        );
    }

    #[test]
    fn test_variants_compare_by_value() {
        assert_eq!(
            CalcError::prefix(33, "too long"),
            CalcError::InvalidPrefix {
                input: "33".to_string(),
                reason: "too long".to_string()
            }
        );
        assert_ne!(CalcError::range("a", "b"), CalcError::requirement("a", "b"));
    }
}
