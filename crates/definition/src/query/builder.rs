//! Query Builder - the query a relation hands to the persistence layer

use super::types::{JoinClause, OrderDirection, WhereCondition};
use crate::model::ModelRef;

/// SELECT query against one model's table
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryBuilder {
    pub(crate) model: Option<ModelRef>,
    pub(crate) select_fields: Vec<String>,
    pub(crate) from_table: Option<String>,
    pub(crate) joins: Vec<JoinClause>,
    pub(crate) where_conditions: Vec<WhereCondition>,
    pub(crate) order_by: Vec<(String, OrderDirection)>,
    pub(crate) limit_count: Option<i64>,
    pub(crate) offset_value: Option<i64>,
    pub(crate) matches_nothing: bool,
}

impl QueryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Query selecting rows of a model's table
    pub fn for_model(model: &ModelRef) -> Self {
        Self {
            model: Some(model.clone()),
            from_table: Some(model.table().to_string()),
            ..Self::default()
        }
    }

    /// The model this query fetches, if known
    pub fn model(&self) -> Option<&ModelRef> {
        self.model.as_ref()
    }

    /// Columns to select, comma separated. Nothing selected means `*`.
    pub fn select(mut self, fields: &str) -> Self {
        self.select_fields.extend(
            fields
                .split(',')
                .map(str::trim)
                .filter(|field| !field.is_empty())
                .map(str::to_string),
        );
        self
    }

    pub fn from(mut self, table: &str) -> Self {
        self.from_table = Some(table.to_string());
        self
    }

    /// INNER JOIN `table` on `left = right`
    pub fn join(mut self, table: &str, left: &str, right: &str) -> Self {
        self.joins.push(JoinClause {
            table: table.to_string(),
            left: left.to_string(),
            right: right.to_string(),
        });
        self
    }

    /// WHERE conditions in the order they were added
    pub fn where_conditions(&self) -> &[WhereCondition] {
        &self.where_conditions
    }

    pub fn joins(&self) -> &[JoinClause] {
        &self.joins
    }

    pub fn limit_count(&self) -> Option<i64> {
        self.limit_count
    }

    /// Mark the query as matching no rows, e.g. when a relation's local key
    /// has no value yet
    pub fn none(mut self) -> Self {
        self.matches_nothing = true;
        self
    }

    /// Returns true if the query is known to match no rows
    pub fn is_none(&self) -> bool {
        self.matches_nothing
    }
}
