//! Relationship Metadata - the closed set of relation kinds

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Defines the type of relationship between models
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum RelationType {
    /// Many-to-one relationship, the local model holds the key
    BelongsTo,
    /// One-to-one relationship, the related model holds the key
    HasOne,
    /// One-to-many relationship, the related models hold the key
    HasMany,
    /// Many-to-many relationship through a pivot table
    BelongsToMany,
    /// Relationship whose related model is chosen by a stored discriminator
    Polymorphic,
}

impl RelationType {
    pub const ALL: [RelationType; 5] = [
        RelationType::BelongsTo,
        RelationType::HasOne,
        RelationType::HasMany,
        RelationType::BelongsToMany,
        RelationType::Polymorphic,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RelationType::BelongsTo => "belongs_to",
            RelationType::HasOne => "has_one",
            RelationType::HasMany => "has_many",
            RelationType::BelongsToMany => "belongs_to_many",
            RelationType::Polymorphic => "polymorphic",
        }
    }

    /// Returns true if this relationship returns a collection
    pub fn is_collection(self) -> bool {
        matches!(self, Self::HasMany | Self::BelongsToMany)
    }

    /// Returns true if this relationship requires a pivot table
    pub fn requires_pivot(self) -> bool {
        matches!(self, Self::BelongsToMany)
    }

    /// Returns true if the related model is resolved at runtime
    pub fn is_polymorphic(self) -> bool {
        matches!(self, Self::Polymorphic)
    }
}

impl FromStr for RelationType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RelationType::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| {
                ModelError::Configuration(format!("Relationship type not supported: {}", s))
            })
    }
}

impl TryFrom<String> for RelationType {
    type Error = ModelError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<RelationType> for String {
    fn from(kind: RelationType) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for RelationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relation_type_properties() {
        assert!(RelationType::HasMany.is_collection());
        assert!(RelationType::BelongsToMany.is_collection());
        assert!(!RelationType::HasOne.is_collection());

        assert!(RelationType::BelongsToMany.requires_pivot());
        assert!(!RelationType::HasMany.requires_pivot());

        assert!(RelationType::Polymorphic.is_polymorphic());
    }

    #[test]
    fn test_relation_type_round_trips_names() {
        for kind in RelationType::ALL {
            assert_eq!(kind.as_str().parse::<RelationType>().unwrap(), kind);
        }
    }

    #[test]
    fn test_unknown_relation_type_is_configuration_error() {
        let err = "has_some".parse::<RelationType>().unwrap_err();
        assert!(err.is_configuration());

        let parsed: Result<RelationType, _> = serde_json::from_str(r#""morph_many""#);
        assert!(parsed.is_err());
    }
}
