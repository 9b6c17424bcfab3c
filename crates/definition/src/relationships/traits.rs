//! Relationship Traits - the capability shared by every relation kind

use serde_json::Value;

use super::metadata::RelationType;
use crate::error::ModelResult;
use crate::model::{Model, ModelRef};
use crate::query::QueryBuilder;

/// A relation between one local model instance and a foreign model type
pub trait Relation<M: Model> {
    /// Kind of this relation
    fn kind(&self) -> RelationType;

    /// The local model instance the relation starts from
    fn local_model(&self) -> &M;

    /// Key column on the local side of the join
    fn local_key(&self) -> &str;

    /// The related model type. Fails for a polymorphic relation whose
    /// discriminator does not map to a model.
    fn foreign_model(&self) -> ModelResult<&ModelRef>;

    /// Key column on the foreign side of the join
    fn foreign_key(&self) -> &str;

    /// Build a fresh query constrained to this relation's join condition
    fn query(&self) -> ModelResult<QueryBuilder>;

    /// Build the relation query and apply further filtering to it
    fn constrain<F>(&self, f: F) -> ModelResult<QueryBuilder>
    where
        F: FnOnce(QueryBuilder) -> QueryBuilder,
        Self: Sized,
    {
        self.query().map(f)
    }

    /// Build the relation query with an extra equality condition
    fn where_eq<T: Into<Value>>(&self, column: &str, value: T) -> ModelResult<QueryBuilder>
    where
        Self: Sized,
    {
        self.constrain(|query| query.where_eq(column, value))
    }
}

/// Constrain `column` to the local join value. A missing or null value gives
/// a query that matches nothing.
pub(crate) fn constrain_key(query: QueryBuilder, column: &str, value: Option<Value>) -> QueryBuilder {
    match value {
        Some(value) if !value.is_null() => query.where_eq(column, value),
        _ => {
            tracing::debug!(column, "Local key has no value, relation matches nothing");
            query.where_eq(column, Value::Null).none()
        }
    }
}
