//! Two-variant result wrapper for expected business rejections.
//!
//! Core write operations return `Result<Outcome<T>, E>`: the outer `Result`
//! carries unexpected faults (storage unavailable, I/O errors) that must
//! surface as server-class failures, while `Outcome::Failure` carries
//! expected, caller-actionable rejections (invalid reference, duplicate
//! resource) that surface as client-class failures. The two channels are
//! never conflated.

use serde::Serialize;

/// Result of an operation that may fail for business reasons.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome<T> {
    /// The operation succeeded with a value.
    Success {
        /// The produced value.
        value: T,
    },
    /// The operation was rejected by a business rule.
    Failure {
        /// Human-readable rejection reason.
        reason: String,
    },
}

impl<T> Outcome<T> {
    /// Wraps a value in a successful outcome.
    #[must_use]
    pub const fn success(value: T) -> Self {
        Self::Success { value }
    }

    /// Creates a failed outcome with a rejection reason.
    #[must_use]
    pub fn failure(reason: impl Into<String>) -> Self {
        Self::Failure {
            reason: reason.into(),
        }
    }

    /// Returns `true` if this outcome is a failure.
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::Failure { .. })
    }

    /// Returns `true` if this outcome is a success.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Returns a reference to the value, if this outcome is a success.
    #[must_use]
    pub const fn value(&self) -> Option<&T> {
        match self {
            Self::Success { value } => Some(value),
            Self::Failure { .. } => None,
        }
    }

    /// Consumes the outcome, returning the value if it is a success.
    #[must_use]
    pub fn into_success(self) -> Option<T> {
        match self {
            Self::Success { value } => Some(value),
            Self::Failure { .. } => None,
        }
    }

    /// Returns the rejection reason, if this outcome is a failure.
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { reason } => Some(reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_accessors() {
        let outcome = Outcome::success(42);
        assert!(outcome.is_success());
        assert!(!outcome.is_failure());
        assert_eq!(outcome.value(), Some(&42));
        assert_eq!(outcome.reason(), None);
        assert_eq!(outcome.into_success(), Some(42));
    }

    #[test]
    fn test_failure_accessors() {
        let outcome: Outcome<i32> = Outcome::failure("nope");
        assert!(outcome.is_failure());
        assert!(!outcome.is_success());
        assert_eq!(outcome.value(), None);
        assert_eq!(outcome.reason(), Some("nope"));
        assert_eq!(outcome.into_success(), None);
    }

    #[test]
    fn test_serializes_with_status_tag() {
        let success = serde_json::to_value(Outcome::success(1)).unwrap();
        assert_eq!(success["status"], "success");
        assert_eq!(success["value"], 1);

        let failure = serde_json::to_value(Outcome::<i32>::failure("bad ref")).unwrap();
        assert_eq!(failure["status"], "failure");
        assert_eq!(failure["reason"], "bad ref");
    }
}
