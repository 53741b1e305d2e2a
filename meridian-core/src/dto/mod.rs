//! Request bodies for create/update operations
//!
//! Each request type carries a `validate()` implementing the constraints the
//! services enforce server-side, so callers can reject bad input before
//! spending a round trip.

pub mod pipeline;
pub mod policy;
pub mod run;
pub mod template;
pub mod trigger;

/// A request field that failed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid {}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}
