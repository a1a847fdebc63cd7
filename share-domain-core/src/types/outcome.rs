//! Fail-soft result type

use serde::{Deserialize, Serialize};

/// A value that is always usable, tagged with whether it is the real answer
/// or a degraded stand-in produced after a failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum Outcome<T> {
    Success { value: T },
    Fallback { value: T, reason: String },
}

impl<T> Outcome<T> {
    #[must_use]
    pub fn success(value: T) -> Self {
        Self::Success { value }
    }

    #[must_use]
    pub fn fallback(value: T, reason: impl Into<String>) -> Self {
        Self::Fallback {
            value,
            reason: reason.into(),
        }
    }

    pub fn value(&self) -> &T {
        match self {
            Self::Success { value } | Self::Fallback { value, .. } => value,
        }
    }

    pub fn into_value(self) -> T {
        match self {
            Self::Success { value } | Self::Fallback { value, .. } => value,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }

    /// Failure description, if this is a fallback
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Success { .. } => None,
            Self::Fallback { reason, .. } => Some(reason),
        }
    }

    /// Maps the carried value, keeping the success/fallback tag.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Self::Success { value } => Outcome::Success { value: f(value) },
            Self::Fallback { value, reason } => Outcome::Fallback {
                value: f(value),
                reason,
            },
        }
    }
}
