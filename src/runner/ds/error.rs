use thiserror::Error;

/// Failure raised while resolving or assigning a path segment.
///
/// Every variant is terminal. A resolver that returns one of these has claimed
/// the segment, so the chain stops searching and the error reaches the caller.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ResolveError {
    /// The owning namespace recognised the identifier but the entity does not exist.
    #[error("property not found: {0}")]
    PropertyNotFound(String),

    /// The target can be read but cannot be assigned.
    #[error("property not writable: {0}")]
    PropertyNotWritable(String),

    #[error("syntax error: {0}")]
    Syntax(String),

    #[error("function not found: {prefix}:{name}")]
    FunctionNotFound { prefix: String, name: String },

    #[error("invocation failed: {0}")]
    Invocation(String),
}

impl ResolveError {
    pub fn not_found(message: impl Into<String>) -> Self {
        ResolveError::PropertyNotFound(message.into())
    }

    pub fn not_writable(message: impl Into<String>) -> Self {
        ResolveError::PropertyNotWritable(message.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ResolveError::PropertyNotFound(_))
    }

    pub fn is_not_writable(&self) -> bool {
        matches!(self, ResolveError::PropertyNotWritable(_))
    }
}
