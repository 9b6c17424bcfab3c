//! Definition builder configuration

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, ModelResult};

/// Name of the identity property injected when a model declares none
pub const DEFAULT_ID_NAME: &str = "id";

/// Suffix appended to snake cased model names for inferred keys
pub const DEFAULT_FOREIGN_KEY_SUFFIX: &str = "_id";

/// Configuration for building model definitions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefinitionConfig {
    /// Default identity property name
    pub id_property: String,
    /// Column set when a record is created (auto timestamps)
    pub created_at: String,
    /// Column set when a record is updated (auto timestamps)
    pub updated_at: String,
    /// Column set when a record is soft deleted
    pub deleted_at: String,
    /// Validation rule spec attached to timestamp columns
    pub timestamp_validation: String,
    /// Suffix appended to snake cased model names for inferred keys
    pub foreign_key_suffix: String,
}

impl Default for DefinitionConfig {
    fn default() -> Self {
        Self {
            id_property: DEFAULT_ID_NAME.to_string(),
            created_at: "created_at".to_string(),
            updated_at: "updated_at".to_string(),
            deleted_at: "deleted_at".to_string(),
            timestamp_validation: "timestamp|db_timestamp".to_string(),
            foreign_key_suffix: DEFAULT_FOREIGN_KEY_SUFFIX.to_string(),
        }
    }
}

impl DefinitionConfig {
    /// Load a configuration from a JSON document. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> ModelResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> ModelResult<()> {
        let names = [
            ("id_property", &self.id_property),
            ("created_at", &self.created_at),
            ("updated_at", &self.updated_at),
            ("deleted_at", &self.deleted_at),
            ("foreign_key_suffix", &self.foreign_key_suffix),
        ];

        for (field, value) in names {
            if value.trim().is_empty() {
                return Err(ModelError::Configuration(format!(
                    "Definition config field '{}' cannot be empty",
                    field
                )));
            }
        }

        if self.created_at == self.updated_at
            || self.created_at == self.deleted_at
            || self.updated_at == self.deleted_at
        {
            return Err(ModelError::Configuration(
                "Timestamp column names must be distinct".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = DefinitionConfig::default();
        assert_eq!(config.id_property, "id");
        assert_eq!(config.timestamp_validation, "timestamp|db_timestamp");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_json_keeps_defaults() {
        let config = DefinitionConfig::from_json(r#"{"deleted_at": "removed_at"}"#).unwrap();
        assert_eq!(config.deleted_at, "removed_at");
        assert_eq!(config.created_at, "created_at");
        assert_eq!(config.foreign_key_suffix, "_id");
    }

    #[test]
    fn test_rejects_duplicate_timestamp_columns() {
        let err = DefinitionConfig::from_json(r#"{"updated_at": "created_at"}"#).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_rejects_empty_names() {
        let config = DefinitionConfig {
            id_property: " ".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
