//! Query Builder SQL generation

use serde_json::Value;

use super::builder::QueryBuilder;
use super::types::{QueryOperator, WhereCondition};

/// How values are written into the SQL text
enum Render<'a> {
    /// `$n` placeholders, values collected in order
    Params(&'a mut Vec<Value>),
    /// Values written as SQL literals
    Inline,
}

impl Render<'_> {
    fn value(&mut self, value: &Value) -> String {
        match self {
            Render::Params(params) => {
                params.push(value.clone());
                format!("${}", params.len())
            }
            Render::Inline => literal(value),
        }
    }

    fn condition(&mut self, condition: &WhereCondition) -> String {
        let column = condition.column();
        match (condition.operator(), condition.value()) {
            (QueryOperator::IsNull, _) | (QueryOperator::Equal, None | Some(Value::Null)) => {
                format!("{} IS NULL", column)
            }
            (QueryOperator::NotEqual, None | Some(Value::Null)) => {
                format!("{} IS NOT NULL", column)
            }
            (QueryOperator::In, _) if condition.values().is_empty() => "1 = 0".to_string(),
            (QueryOperator::In, _) => {
                let values: Vec<String> =
                    condition.values().iter().map(|value| self.value(value)).collect();
                format!("{} IN ({})", column, values.join(", "))
            }
            (operator, Some(value)) => format!("{} {} {}", column, operator, self.value(value)),
        }
    }
}

impl QueryBuilder {
    /// SQL with `$n` placeholders, and the values bound to them
    pub fn to_sql_with_params(&self) -> (String, Vec<Value>) {
        let mut params = Vec::new();
        let sql = self.render(&mut Render::Params(&mut params));
        (sql, params)
    }

    /// SQL with values written inline (for logging and tests)
    pub fn to_sql(&self) -> String {
        self.render(&mut Render::Inline)
    }

    fn render(&self, render: &mut Render<'_>) -> String {
        let mut sql = String::from("SELECT ");

        if self.select_fields.is_empty() {
            sql.push('*');
        } else {
            sql.push_str(&self.select_fields.join(", "));
        }

        if let Some(table) = &self.from_table {
            sql.push_str(" FROM ");
            sql.push_str(table);
        }

        for join in &self.joins {
            sql.push_str(&format!(" INNER JOIN {} ON {} = {}", join.table, join.left, join.right));
        }

        let mut clauses = Vec::new();
        if self.matches_nothing {
            clauses.push("1 = 0".to_string());
        }
        clauses.extend(
            self.where_conditions
                .iter()
                .map(|condition| render.condition(condition)),
        );
        if !clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }

        if !self.order_by.is_empty() {
            let order: Vec<String> = self
                .order_by
                .iter()
                .map(|(column, direction)| format!("{} {}", column, direction))
                .collect();
            sql.push_str(" ORDER BY ");
            sql.push_str(&order.join(", "));
        }

        if let Some(limit) = self.limit_count {
            sql.push_str(&format!(" LIMIT {}", limit));
        }
        if let Some(offset) = self.offset_value {
            sql.push_str(&format!(" OFFSET {}", offset));
        }

        sql
    }
}

/// SQL literal for a JSON value
fn literal(value: &Value) -> String {
    match value {
        Value::Null => "NULL".to_string(),
        Value::Bool(b) => b.to_string().to_uppercase(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => format!("'{}'", s.replace('\'', "''")),
        other => format!("'{}'", other.to_string().replace('\'', "''")),
    }
}
