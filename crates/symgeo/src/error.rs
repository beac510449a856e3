//! Error taxonomy shared by every layer.
//!
//! - `Argument`: malformed input (dimension mismatch, bad interval, division or
//!   multiplicative inversion by the additive identity).
//! - `Unsupported`: an ordering or metric operation on a field lacking it.
//! - `Deferred`: raised by a `Throwing` scalar when (and only when) evaluated.
//! - `State`: a geometric analytic that is undefined for the current
//!   configuration (slope of a vertical line, ...).
//!
//! All failures are synchronous; nothing retries.

use thiserror::Error;

/// Capability a field may or may not provide.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Capability {
    Ordering,
    Metric,
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Capability::Ordering => f.write_str("ordering"),
            Capability::Metric => f.write_str("metric"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("invalid argument: {0}")]
    Argument(String),

    #[error("field `{field}` does not support {capability}")]
    Unsupported {
        capability: Capability,
        field: String,
    },

    #[error("deferred violation: {0}")]
    Deferred(Box<Error>),

    #[error("undefined in current state: {0}")]
    State(String),
}

impl Error {
    pub fn argument(reason: impl Into<String>) -> Self {
        Self::Argument(reason.into())
    }

    pub fn state(reason: impl Into<String>) -> Self {
        Self::State(reason.into())
    }

    pub fn unsupported(capability: Capability, field: impl Into<String>) -> Self {
        Self::Unsupported {
            capability,
            field: field.into(),
        }
    }

    /// Shorthand for the dimension-mismatch flavour of `Argument`.
    pub fn dimension(expected: usize, found: usize) -> Self {
        Self::Argument(format!("dimension mismatch: expected {expected}, found {found}"))
    }

    /// Innermost error behind any number of `Deferred` wrappers.
    pub fn root(&self) -> &Error {
        match self {
            Error::Deferred(inner) => inner.root(),
            other => other,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_descriptive() {
        let e = Error::dimension(2, 3);
        assert_eq!(
            e.to_string(),
            "invalid argument: dimension mismatch: expected 2, found 3"
        );
        let u = Error::unsupported(Capability::Ordering, "GF(7)");
        assert_eq!(u.to_string(), "field `GF(7)` does not support ordering");
    }

    #[test]
    fn root_unwraps_nested_deferrals() {
        let inner = Error::state("vertical line has no slope");
        let wrapped = Error::Deferred(Box::new(Error::Deferred(Box::new(inner.clone()))));
        assert_eq!(wrapped.root(), &inner);
        assert!(wrapped.to_string().starts_with("deferred violation"));
    }
}
