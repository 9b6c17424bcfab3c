//! Runtime references to model types

use serde::{Deserialize, Serialize};

use crate::config::DEFAULT_ID_NAME;
use crate::definition::naming;

/// Identifies a model type by name and table
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "ModelRefRepr")]
pub struct ModelRef {
    name: String,
    table: String,
}

/// Accepted forms for a related model in declarations
#[derive(Deserialize)]
#[serde(untagged)]
enum ModelRefRepr {
    Name(String),
    Full { name: String, table: Option<String> },
}

impl From<ModelRefRepr> for ModelRef {
    fn from(repr: ModelRefRepr) -> Self {
        match repr {
            ModelRefRepr::Name(name) => ModelRef::named(name),
            ModelRefRepr::Full { name, table: Some(table) } => ModelRef::new(name, table),
            ModelRefRepr::Full { name, table: None } => ModelRef::named(name),
        }
    }
}

impl ModelRef {
    /// Create a reference with an explicit table name
    pub fn new(name: impl Into<String>, table: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            table: table.into(),
        }
    }

    /// Create a reference whose table is inferred from the model name
    pub fn named(name: impl Into<String>) -> Self {
        let name = name.into();
        let table = naming::table_name_for(&name);
        Self { name, table }
    }

    /// Reference to a concrete model type
    pub fn of<M: crate::model::Model>() -> Self {
        M::model_ref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    /// Qualify a column with this model's table
    pub fn column(&self, column: &str) -> String {
        format!("{}.{}", self.table, column)
    }
}

impl std::fmt::Display for ModelRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// The model type information consumed by the definition builder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelDescriptor {
    pub model: ModelRef,
    pub id_properties: Vec<String>,
}

impl ModelDescriptor {
    pub fn new(model: ModelRef, id_properties: Vec<String>) -> Self {
        Self {
            model,
            id_properties,
        }
    }

    /// Descriptor with the single default identity property
    pub fn with_default_id(model: ModelRef) -> Self {
        Self::new(model, vec![DEFAULT_ID_NAME.to_string()])
    }

    /// Model type name
    pub fn name(&self) -> &str {
        self.model.name()
    }
}
