//! Configuration errors

use super::GemstageError;

/// Creates a config not found error
pub fn not_found(path: impl Into<String>) -> GemstageError {
    GemstageError::ConfigNotFound { path: path.into() }
}

/// Creates a config parse failed error
pub fn parse_failed(path: impl Into<String>, reason: impl Into<String>) -> GemstageError {
    GemstageError::ConfigParseFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates an invalid config error
pub fn invalid(message: impl Into<String>) -> GemstageError {
    GemstageError::ConfigInvalid {
        message: message.into(),
    }
}

/// Creates a config read failed error
pub fn read_failed(path: impl Into<String>, reason: impl Into<String>) -> GemstageError {
    GemstageError::ConfigReadFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

pub fn undefined_property(name: impl Into<String>) -> GemstageError {
    GemstageError::UndefinedProperty { name: name.into() }
}
