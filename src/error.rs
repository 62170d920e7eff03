//! Errors raised by the mock backend.

use std::fmt;

/// Errors raised by the mock backend.
///
/// Every variant except [`MockError::Pipeline`] is detected synchronously,
/// before any update id is allocated or any event is fed — a failed call
/// leaves the simulation state untouched.
#[derive(Debug)]
pub enum MockError {
    /// Malformed construction input (identity mismatch, message without a
    /// keyboard when a click is attempted).
    Validation(String),
    /// A button selector matched zero buttons or more than one.
    AmbiguousSelection(String),
    /// Lookup miss on history, a callback answer, or another keyed record
    /// that was expected to exist.
    NotFound(String),
    /// The update pipeline returned an error while processing a fed event.
    Pipeline(Box<dyn std::error::Error + Send + Sync>),
}

impl fmt::Display for MockError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation(msg) => write!(f, "validation error: {msg}"),
            Self::AmbiguousSelection(msg) => write!(f, "ambiguous selection: {msg}"),
            Self::NotFound(msg) => write!(f, "not found: {msg}"),
            Self::Pipeline(source) => write!(f, "pipeline error: {source}"),
        }
    }
}

impl std::error::Error for MockError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Pipeline(source) => Some(source.as_ref()),
            _ => None,
        }
    }
}
