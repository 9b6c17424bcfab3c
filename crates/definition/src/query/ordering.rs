//! Query Builder ordering and row windows

use super::builder::QueryBuilder;
use super::types::OrderDirection;

impl QueryBuilder {
    /// Order by a column, ascending
    pub fn order_by(mut self, column: &str) -> Self {
        self.order_by.push((column.to_string(), OrderDirection::Asc));
        self
    }

    /// Order by a column, descending
    pub fn order_by_desc(mut self, column: &str) -> Self {
        self.order_by.push((column.to_string(), OrderDirection::Desc));
        self
    }

    pub fn limit(mut self, count: i64) -> Self {
        self.limit_count = Some(count);
        self
    }

    pub fn offset(mut self, count: i64) -> Self {
        self.offset_value = Some(count);
        self
    }
}
