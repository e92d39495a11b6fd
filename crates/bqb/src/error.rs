//! Error types for bqb

use thiserror::Error;

/// Result type alias for bqb operations
pub type BqbResult<T> = Result<T, BqbError>;

/// Error types for query construction and finalization
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BqbError {
    /// Query shape is invalid (source count, limit count, empty select, stray fragments)
    #[error("Structural error: {0}")]
    Structural(String),

    /// An identifier failed the character allow-list
    #[error("Sanitization error: {0}")]
    Sanitization(String),

    /// A subquery predicate template does not have exactly one `%s` slot
    #[error("Template error: {0}")]
    Template(String),

    /// Distinct placeholders in the text and supplied params disagree in number
    #[error("Parameter mismatch: {found} params found in query but {provided} params provided")]
    ParamCount { found: usize, provided: usize },

    /// A supplied param has no matching placeholder in the text
    #[error("Parameter mismatch: param not found in query: {0}")]
    UnknownParam(String),

    /// The execution client rejected the finalized query
    #[error("Client error: {0}")]
    Client(String),
}

impl BqbError {
    /// Create a structural error
    pub fn structural(message: impl Into<String>) -> Self {
        Self::Structural(message.into())
    }

    /// Create a sanitization error
    pub fn sanitization(message: impl Into<String>) -> Self {
        Self::Sanitization(message.into())
    }

    /// Create a template error
    pub fn template(message: impl Into<String>) -> Self {
        Self::Template(message.into())
    }

    /// Check if this is a structural error
    pub fn is_structural(&self) -> bool {
        matches!(self, Self::Structural(_))
    }

    /// Check if this is a sanitization error
    pub fn is_sanitization(&self) -> bool {
        matches!(self, Self::Sanitization(_))
    }

    /// Check if this is a template error
    pub fn is_template(&self) -> bool {
        matches!(self, Self::Template(_))
    }

    /// Check if the supplied params do not line up with the query's placeholders
    pub fn is_param_mismatch(&self) -> bool {
        matches!(self, Self::ParamCount { .. } | Self::UnknownParam(_))
    }
}
