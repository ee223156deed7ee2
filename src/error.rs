/// Error taxonomy for the generation path
///
/// Every failure that can reach the user carries its human-readable
/// message in the variant itself, so `Display` is the message and the
/// variant tag is what callers branch on. All payloads are `String`s
/// (never transport error types) so the value stays `Clone` and can
/// travel inside an application message.

use thiserror::Error;

/// What the provider told us went wrong, when it told us anything structured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderErrorKind {
    /// Account has no credits left
    InsufficientCredits,
    /// Too many requests in a window
    RateLimited,
    /// The configured credential was rejected
    InvalidCredential,
    /// Anything else the provider reported
    Other,
}

/// A failure anywhere on the generate path
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerateError {
    /// Missing or unusable provider credential; raised before any network call
    #[error("{0}")]
    Config(String),

    /// Rejected locally, before any network call (e.g. empty prompt)
    #[error("{0}")]
    Validation(String),

    /// The provider returned a non-success status with a recognizable body
    #[error("{message}")]
    Provider {
        kind: ProviderErrorKind,
        message: String,
    },

    /// The provider returned success but the body was not usable
    #[error("{0}")]
    Protocol(String),

    /// Transport-level failure (DNS, TLS, connection, body read)
    #[error("{0}")]
    Network(String),

    /// Local persistence failure; absorbed by the history store, never shown
    #[error("{0}")]
    Storage(String),
}

impl GenerateError {
    /// The provider kind, when this is a provider error
    pub fn provider_kind(&self) -> Option<ProviderErrorKind> {
        match self {
            GenerateError::Provider { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_the_message() {
        let err = GenerateError::Provider {
            kind: ProviderErrorKind::RateLimited,
            message: "Rate limit exceeded. Please try again in a moment.".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Rate limit exceeded. Please try again in a moment."
        );
    }

    #[test]
    fn test_provider_kind_accessor() {
        let err = GenerateError::Provider {
            kind: ProviderErrorKind::InsufficientCredits,
            message: "out of credits".to_string(),
        };
        assert_eq!(
            err.provider_kind(),
            Some(ProviderErrorKind::InsufficientCredits)
        );

        let err = GenerateError::Validation("Please enter a prompt".to_string());
        assert_eq!(err.provider_kind(), None);
    }
}
