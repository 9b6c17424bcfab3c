//! Query Builder Types - conditions, joins and ordering

use std::fmt;

use serde_json::Value;

/// Comparison a WHERE condition makes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryOperator {
    Equal,
    NotEqual,
    In,
    IsNull,
}

impl fmt::Display for QueryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            QueryOperator::Equal => "=",
            QueryOperator::NotEqual => "!=",
            QueryOperator::In => "IN",
            QueryOperator::IsNull => "IS NULL",
        })
    }
}

/// One WHERE condition. Comparisons carry one value, `In` carries the set.
#[derive(Debug, Clone, PartialEq)]
pub struct WhereCondition {
    column: String,
    operator: QueryOperator,
    values: Vec<Value>,
}

impl WhereCondition {
    pub(crate) fn new(column: &str, operator: QueryOperator, values: Vec<Value>) -> Self {
        Self {
            column: column.to_string(),
            operator,
            values,
        }
    }

    pub fn column(&self) -> &str {
        &self.column
    }

    pub fn operator(&self) -> QueryOperator {
        self.operator
    }

    /// The compared value of an `Equal`/`NotEqual` condition
    pub fn value(&self) -> Option<&Value> {
        self.values.first()
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }
}

/// INNER JOIN of `table` on `left = right`
#[derive(Debug, Clone, PartialEq)]
pub struct JoinClause {
    pub table: String,
    pub left: String,
    pub right: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderDirection {
    Asc,
    Desc,
}

impl fmt::Display for OrderDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OrderDirection::Asc => "ASC",
            OrderDirection::Desc => "DESC",
        })
    }
}
