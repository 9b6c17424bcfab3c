//! # elif-definition: Model Definitions for elif.rs
//!
//! Builds the canonical property schema of each model type from its
//! declarations and turns relationship properties into query-building
//! relation objects.
//!
//! - `definition`: declarations, shortcut expansion, the builder and the
//!   per type registry of built definitions
//! - `relationships`: relation kinds and the `Relationship::make` factory
//! - `query`: the select query builder relations produce
//! - `model`: the `Model` trait definitions and relations are built for

pub mod config;
pub mod definition;
pub mod error;
pub mod model;
pub mod query;
pub mod relationships;


// Re-export core traits and types
pub use config::DefinitionConfig;
pub use definition::{
    parse_declarations, Definition, DefinitionBuilder, DefinitionRegistry, Mutability, Property,
    PropertyDeclaration, PropertyDeclarations, PropertyType, RelationShortcut, ValidationRule,
};
pub use error::{ModelError, ModelResult, RelationshipError};
pub use model::{Model, ModelDescriptor, ModelRef, ModelRelations};
pub use query::QueryBuilder;
pub use relationships::{AnyRelation, Relation, RelationType, Relationship};
