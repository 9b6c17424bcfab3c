//! Property Declarations - the raw, user supplied description of a model's properties
//!
//! A declaration is what a model writes down; the definition builder expands
//! it into a [`Property`](super::Property). Relationship shortcuts are a closed
//! set of variants, so a declaration carries at most one.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::error::Category;
use serde_json::Value;

use super::types::{Mutability, PropertyType, ValidationRules};
use crate::error::{ModelError, ModelResult};
use crate::model::ModelRef;
use crate::relationships::RelationType;

/// Declarations keyed by property name
pub type PropertyDeclarations = BTreeMap<String, PropertyDeclaration>;

/// Parse a JSON object of property declarations
pub fn parse_declarations(json: &str) -> ModelResult<PropertyDeclarations> {
    serde_json::from_str(json).map_err(|err| match err.classify() {
        Category::Data => ModelError::Configuration(err.to_string()),
        _ => ModelError::from(err),
    })
}

/// Shorthand relationship declaration, expanded at build time
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelationShortcut {
    BelongsTo(ModelRef),
    BelongsToMany(ModelRef),
    HasOne(ModelRef),
    HasMany(ModelRef),
}

impl RelationShortcut {
    pub fn relation_type(&self) -> RelationType {
        match self {
            RelationShortcut::BelongsTo(_) => RelationType::BelongsTo,
            RelationShortcut::BelongsToMany(_) => RelationType::BelongsToMany,
            RelationShortcut::HasOne(_) => RelationType::HasOne,
            RelationShortcut::HasMany(_) => RelationType::HasMany,
        }
    }

    /// The related model
    pub fn model(&self) -> &ModelRef {
        match self {
            RelationShortcut::BelongsTo(model)
            | RelationShortcut::BelongsToMany(model)
            | RelationShortcut::HasOne(model)
            | RelationShortcut::HasMany(model) => model,
        }
    }
}

/// A single property declaration
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(try_from = "RawDeclaration")]
pub struct PropertyDeclaration {
    pub property_type: Option<PropertyType>,
    pub mutable: Option<Mutability>,
    pub nullable: Option<bool>,
    pub persisted: Option<bool>,
    pub validate: ValidationRules,
    pub default: Option<Value>,
    pub in_array: Option<bool>,
    /// Related model for explicit and legacy relationship declarations
    pub relation: Option<ModelRef>,
    pub relation_type: Option<RelationType>,
    pub shortcut: Option<RelationShortcut>,
    pub foreign_key: Option<String>,
    pub local_key: Option<String>,
    pub pivot_tablename: Option<String>,
    pub morphs_to: BTreeMap<String, ModelRef>,
    /// Unrecognized keys, preserved verbatim
    pub extra: BTreeMap<String, Value>,
}

impl PropertyDeclaration {
    /// Empty declaration: untyped, mutable, persisted
    pub fn new() -> Self {
        Self::default()
    }

    /// Declaration with a storage type
    pub fn typed(property_type: PropertyType) -> Self {
        Self {
            property_type: Some(property_type),
            ..Self::default()
        }
    }

    pub fn mutability(mut self, mutable: Mutability) -> Self {
        self.mutable = Some(mutable);
        self
    }

    pub fn immutable(self) -> Self {
        self.mutability(Mutability::Immutable)
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = Some(true);
        self
    }

    pub fn persisted(mut self, persisted: bool) -> Self {
        self.persisted = Some(persisted);
        self
    }

    pub fn not_persisted(self) -> Self {
        self.persisted(false)
    }

    pub fn hidden(mut self) -> Self {
        self.in_array = Some(false);
        self
    }

    /// Attach a `|` separated validation rule spec
    pub fn validate(mut self, spec: &str) -> Self {
        self.validate = ValidationRules::parse(spec);
        self
    }

    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Legacy belongs-to: the property itself stores the related id
    pub fn relation(mut self, model: ModelRef) -> Self {
        self.relation = Some(model);
        self
    }

    /// Explicit relationship type, without shortcut expansion
    pub fn relation_type(mut self, relation_type: RelationType) -> Self {
        self.relation_type = Some(relation_type);
        self
    }

    pub fn belongs_to(self, model: ModelRef) -> Self {
        self.shortcut(RelationShortcut::BelongsTo(model))
    }

    pub fn belongs_to_many(self, model: ModelRef) -> Self {
        self.shortcut(RelationShortcut::BelongsToMany(model))
    }

    pub fn has_one(self, model: ModelRef) -> Self {
        self.shortcut(RelationShortcut::HasOne(model))
    }

    pub fn has_many(self, model: ModelRef) -> Self {
        self.shortcut(RelationShortcut::HasMany(model))
    }

    pub fn shortcut(mut self, shortcut: RelationShortcut) -> Self {
        self.shortcut = Some(shortcut);
        self
    }

    pub fn foreign_key(mut self, key: &str) -> Self {
        self.foreign_key = Some(key.to_string());
        self
    }

    pub fn local_key(mut self, key: &str) -> Self {
        self.local_key = Some(key.to_string());
        self
    }

    pub fn pivot_tablename(mut self, table: &str) -> Self {
        self.pivot_tablename = Some(table.to_string());
        self
    }

    /// Map a discriminator value to a model for polymorphic relations
    pub fn morphs_to(mut self, discriminator: &str, model: ModelRef) -> Self {
        self.morphs_to.insert(discriminator.to_string(), model);
        self
    }

    pub fn extra(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.extra.insert(key.to_string(), value.into());
        self
    }
}

/// Wire form of a declaration, using the declaration key names
#[derive(Deserialize)]
struct RawDeclaration {
    #[serde(rename = "type")]
    property_type: Option<PropertyType>,
    mutable: Option<Mutability>,
    #[serde(rename = "null")]
    nullable: Option<bool>,
    persisted: Option<bool>,
    validate: Option<ValidationRules>,
    default: Option<Value>,
    in_array: Option<bool>,
    relation: Option<ModelRef>,
    relation_type: Option<RelationType>,
    belongs_to: Option<ModelRef>,
    belongs_to_many: Option<ModelRef>,
    has_one: Option<ModelRef>,
    has_many: Option<ModelRef>,
    foreign_key: Option<String>,
    local_key: Option<String>,
    pivot_tablename: Option<String>,
    #[serde(default)]
    morphs_to: BTreeMap<String, ModelRef>,
    #[serde(flatten)]
    extra: BTreeMap<String, Value>,
}

impl TryFrom<RawDeclaration> for PropertyDeclaration {
    type Error = ModelError;

    fn try_from(raw: RawDeclaration) -> Result<Self, Self::Error> {
        let mut shortcuts: Vec<RelationShortcut> = [
            raw.belongs_to.map(RelationShortcut::BelongsTo),
            raw.belongs_to_many.map(RelationShortcut::BelongsToMany),
            raw.has_one.map(RelationShortcut::HasOne),
            raw.has_many.map(RelationShortcut::HasMany),
        ]
        .into_iter()
        .flatten()
        .collect();

        if shortcuts.len() > 1 {
            let kinds: Vec<&str> = shortcuts
                .iter()
                .map(|shortcut| shortcut.relation_type().as_str())
                .collect();
            return Err(ModelError::Configuration(format!(
                "Declaration uses more than one relationship shortcut: {}",
                kinds.join(", ")
            )));
        }

        Ok(Self {
            property_type: raw.property_type,
            mutable: raw.mutable,
            nullable: raw.nullable,
            persisted: raw.persisted,
            validate: raw.validate.unwrap_or_default(),
            default: raw.default,
            in_array: raw.in_array,
            relation: raw.relation,
            relation_type: raw.relation_type,
            shortcut: shortcuts.pop(),
            foreign_key: raw.foreign_key,
            local_key: raw.local_key,
            pivot_tablename: raw.pivot_tablename,
            morphs_to: raw.morphs_to,
            extra: raw.extra,
        })
    }
}
