//! Polymorphic Relationship - the foreign model is chosen by a stored discriminator
//!
//! The local model stores two columns derived from the relation's local key:
//! `<key>_type` holds a discriminator mapped through `morphs_to` to a model,
//! and `<key>_id` holds the foreign model's key.
//!
//! This is the morph-to direction: the discriminator lives on the local model
//! and only selects which foreign model to query. The foreign table has no
//! discriminator column, so the query filters on the foreign key alone and
//! adds no type condition.

use std::collections::BTreeMap;

use serde_json::Value;

use super::metadata::RelationType;
use super::traits::{constrain_key, Relation};
use crate::error::{ModelResult, RelationshipError};
use crate::model::{Model, ModelRef};
use crate::query::QueryBuilder;

/// Polymorphic relationship - local model references one of several model types
#[derive(Debug)]
pub struct Polymorphic<'a, M: Model> {
    local: &'a M,
    local_key: &'a str,
    local_type_key: String,
    local_id_key: String,
    morphs_to: &'a BTreeMap<String, ModelRef>,
    foreign_key: &'a str,
}

impl<'a, M: Model> Polymorphic<'a, M> {
    pub fn new(
        local: &'a M,
        local_key: &'a str,
        morphs_to: &'a BTreeMap<String, ModelRef>,
        foreign_key: &'a str,
    ) -> Self {
        Self {
            local,
            local_key,
            local_type_key: format!("{}_type", local_key),
            local_id_key: format!("{}_id", local_key),
            morphs_to,
            foreign_key,
        }
    }

    /// Local column holding the discriminator
    pub fn local_type_key(&self) -> &str {
        &self.local_type_key
    }

    /// Local column holding the foreign model's key
    pub fn local_id_key(&self) -> &str {
        &self.local_id_key
    }

    /// Discriminator values and the models they map to
    pub fn morphs_to(&self) -> &BTreeMap<String, ModelRef> {
        self.morphs_to
    }

    /// Discriminator value currently stored on the local model
    pub fn discriminator(&self) -> Option<String> {
        match self.local.field(&self.local_type_key) {
            Some(Value::String(value)) => Some(value),
            _ => None,
        }
    }
}

impl<M: Model> Relation<M> for Polymorphic<'_, M> {
    fn kind(&self) -> RelationType {
        RelationType::Polymorphic
    }

    fn local_model(&self) -> &M {
        self.local
    }

    fn local_key(&self) -> &str {
        self.local_key
    }

    fn foreign_model(&self) -> ModelResult<&ModelRef> {
        let discriminator = self.discriminator().ok_or_else(|| {
            RelationshipError::UnresolvedMorphType(format!(
                "{}.{} has no value",
                M::model_name(),
                self.local_type_key
            ))
        })?;

        self.morphs_to.get(&discriminator).ok_or_else(|| {
            RelationshipError::UnresolvedMorphType(format!(
                "\"{}\" is not mapped by {}.{}",
                discriminator,
                M::model_name(),
                self.local_key
            ))
            .into()
        })
    }

    fn foreign_key(&self) -> &str {
        self.foreign_key
    }

    fn query(&self) -> ModelResult<QueryBuilder> {
        let foreign_model = self.foreign_model()?;
        Ok(constrain_key(
            QueryBuilder::for_model(foreign_model),
            &foreign_model.column(self.foreign_key),
            self.local.field(&self.local_id_key),
        ))
    }
}
