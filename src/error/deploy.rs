//! Deployment errors

use super::GemstageError;

/// Creates the verification failure raised when a body lacks `expected`
pub fn missing_expected(expected: impl Into<String>, url: impl Into<String>) -> GemstageError {
    GemstageError::MissingExpectedString {
        expected: expected.into(),
        url: url.into(),
    }
}

/// Creates a server control error
pub fn server_control_failed(
    server: impl Into<String>,
    action: impl Into<String>,
    reason: impl Into<String>,
) -> GemstageError {
    GemstageError::ServerControlFailed {
        server: server.into(),
        action: action.into(),
        reason: reason.into(),
    }
}
