//! HasMany Relationship - foreign models hold the local model's key

use super::metadata::RelationType;
use super::traits::{constrain_key, Relation};
use crate::error::ModelResult;
use crate::model::{Model, ModelRef};
use crate::query::QueryBuilder;

/// HasMany relationship - local model owns many foreign models
#[derive(Debug)]
pub struct HasMany<'a, M: Model> {
    local: &'a M,
    local_key: &'a str,
    foreign_model: &'a ModelRef,
    foreign_key: &'a str,
}

impl<'a, M: Model> HasMany<'a, M> {
    pub fn new(
        local: &'a M,
        local_key: &'a str,
        foreign_model: &'a ModelRef,
        foreign_key: &'a str,
    ) -> Self {
        Self {
            local,
            local_key,
            foreign_model,
            foreign_key,
        }
    }
}

impl<M: Model> Relation<M> for HasMany<'_, M> {
    fn kind(&self) -> RelationType {
        RelationType::HasMany
    }

    fn local_model(&self) -> &M {
        self.local
    }

    fn local_key(&self) -> &str {
        self.local_key
    }

    fn foreign_model(&self) -> ModelResult<&ModelRef> {
        Ok(self.foreign_model)
    }

    fn foreign_key(&self) -> &str {
        self.foreign_key
    }

    fn query(&self) -> ModelResult<QueryBuilder> {
        Ok(constrain_key(
            QueryBuilder::for_model(self.foreign_model),
            &self.foreign_model.column(self.foreign_key),
            self.local.field(self.local_key),
        ))
    }
}
