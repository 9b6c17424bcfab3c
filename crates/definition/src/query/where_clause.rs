//! Query Builder WHERE conditions

use serde_json::Value;

use super::builder::QueryBuilder;
use super::types::{QueryOperator, WhereCondition};

impl QueryBuilder {
    fn push_condition(mut self, column: &str, operator: QueryOperator, values: Vec<Value>) -> Self {
        self.where_conditions
            .push(WhereCondition::new(column, operator, values));
        self
    }

    /// `column = value`. A null value compares with IS NULL.
    pub fn where_eq<T: Into<Value>>(self, column: &str, value: T) -> Self {
        self.push_condition(column, QueryOperator::Equal, vec![value.into()])
    }

    /// `column != value`. A null value compares with IS NOT NULL.
    pub fn where_ne<T: Into<Value>>(self, column: &str, value: T) -> Self {
        self.push_condition(column, QueryOperator::NotEqual, vec![value.into()])
    }

    /// `column IN (values)`. An empty set matches nothing.
    pub fn where_in<T: Into<Value>>(self, column: &str, values: Vec<T>) -> Self {
        let values = values.into_iter().map(Into::into).collect();
        self.push_condition(column, QueryOperator::In, values)
    }

    /// `column IS NULL`
    pub fn where_null(self, column: &str) -> Self {
        self.push_condition(column, QueryOperator::IsNull, Vec::new())
    }
}
