//! Query Builder Module - fluent SELECT builder produced by relations
//!
//! Queries are built here and executed by the persistence layer.

pub mod builder;
pub mod ordering;
pub mod sql_generation;
pub mod types;
pub mod where_clause;

pub use builder::QueryBuilder;
pub use types::{JoinClause, OrderDirection, QueryOperator, WhereCondition};
