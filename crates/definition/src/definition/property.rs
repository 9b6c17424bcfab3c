//! Property - immutable metadata for one model attribute

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use super::declaration::PropertyDeclaration;
use super::types::{Mutability, PropertyType, ValidationRule, ValidationRules};
use crate::model::ModelRef;
use crate::relationships::RelationType;

/// A fully resolved model property
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Property {
    name: String,
    #[serde(rename = "type")]
    property_type: Option<PropertyType>,
    mutable: Mutability,
    nullable: bool,
    persisted: bool,
    validation_rules: ValidationRules,
    default: Option<Value>,
    in_array: bool,
    relation_type: Option<RelationType>,
    foreign_model: Option<ModelRef>,
    local_key: Option<String>,
    foreign_key: Option<String>,
    pivot_tablename: Option<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    morphs_to: BTreeMap<String, ModelRef>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    extra: BTreeMap<String, Value>,
}

impl Property {
    /// Wrap an already expanded declaration
    pub fn from_declaration(name: &str, declaration: PropertyDeclaration) -> Self {
        Self {
            name: name.to_string(),
            property_type: declaration.property_type,
            mutable: declaration.mutable.unwrap_or_default(),
            nullable: declaration.nullable.unwrap_or(false),
            persisted: declaration.persisted.unwrap_or(true),
            validation_rules: declaration.validate,
            default: declaration.default,
            in_array: declaration.in_array.unwrap_or(true),
            relation_type: declaration.relation_type,
            foreign_model: declaration.relation,
            local_key: declaration.local_key,
            foreign_key: declaration.foreign_key,
            pivot_tablename: declaration.pivot_tablename,
            morphs_to: declaration.morphs_to,
            extra: declaration.extra,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn property_type(&self) -> Option<&PropertyType> {
        self.property_type.as_ref()
    }

    pub fn mutability(&self) -> Mutability {
        self.mutable
    }

    pub fn is_mutable(&self) -> bool {
        self.mutable.is_mutable()
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    pub fn is_persisted(&self) -> bool {
        self.persisted
    }

    pub fn in_array(&self) -> bool {
        self.in_array
    }

    pub fn validation_rules(&self) -> &[ValidationRule] {
        self.validation_rules.rules()
    }

    pub fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    pub fn relation_type(&self) -> Option<RelationType> {
        self.relation_type
    }

    /// Returns true if this property represents a relationship
    pub fn is_relationship(&self) -> bool {
        self.relation_type.is_some()
    }

    pub fn foreign_model(&self) -> Option<&ModelRef> {
        self.foreign_model.as_ref()
    }

    pub fn local_key(&self) -> Option<&str> {
        self.local_key.as_deref()
    }

    pub fn foreign_key(&self) -> Option<&str> {
        self.foreign_key.as_deref()
    }

    pub fn pivot_tablename(&self) -> Option<&str> {
        self.pivot_tablename.as_deref()
    }

    pub fn morphs_to(&self) -> &BTreeMap<String, ModelRef> {
        &self.morphs_to
    }

    pub fn extra(&self) -> &BTreeMap<String, Value> {
        &self.extra
    }
}
