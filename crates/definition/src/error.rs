//! Error types for model definitions and relationships
//!
//! Definition building and relation construction are synchronous, so every
//! failure surfaces directly from the call that triggered it.

use thiserror::Error;

/// Result type alias for model operations
pub type ModelResult<T> = Result<T, ModelError>;

/// Error types for definition and relationship operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    /// Invalid model or relationship configuration
    #[error("Configuration error: {0}")]
    Configuration(String),
    /// Relationship resolution failed
    #[error("Relationship error: {0}")]
    Relationship(String),
    /// Query building error
    #[error("Query error: {0}")]
    Query(String),
    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
    /// Invalid key error
    #[error("Invalid key error: {0}")]
    InvalidKey(String),
    /// Definition could not be built
    #[error("Definition error: {0}")]
    Definition(String),
}

impl ModelError {
    /// Returns true for configuration errors
    pub fn is_configuration(&self) -> bool {
        matches!(self, ModelError::Configuration(_))
    }
}

impl From<serde_json::Error> for ModelError {
    fn from(err: serde_json::Error) -> Self {
        ModelError::Serialization(err.to_string())
    }
}

/// Error types for relationship operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RelationshipError {
    /// Relationship not found
    #[error("Relationship not found: {0}")]
    NotFound(String),
    /// Invalid relationship configuration
    #[error("Invalid relationship configuration: {0}")]
    InvalidConfiguration(String),
    /// Polymorphic discriminator has no mapped model
    #[error("Unresolved morph type: {0}")]
    UnresolvedMorphType(String),
}

impl From<RelationshipError> for ModelError {
    fn from(err: RelationshipError) -> Self {
        match err {
            RelationshipError::InvalidConfiguration(msg) => ModelError::Configuration(msg),
            other => ModelError::Relationship(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ModelError::Configuration("missing relation type".to_string());
        assert_eq!(err.to_string(), "Configuration error: missing relation type");
    }

    #[test]
    fn test_relationship_error_conversion() {
        let err: ModelError = RelationshipError::InvalidConfiguration("bad".to_string()).into();
        assert!(err.is_configuration());

        let err: ModelError = RelationshipError::NotFound("author".to_string()).into();
        assert_eq!(
            err,
            ModelError::Relationship("Relationship not found: author".to_string())
        );
    }

    #[test]
    fn test_serde_error_conversion() {
        let parse: Result<serde_json::Value, _> = serde_json::from_str("{not json");
        let err: ModelError = parse.unwrap_err().into();
        assert!(matches!(err, ModelError::Serialization(_)));
    }
}
