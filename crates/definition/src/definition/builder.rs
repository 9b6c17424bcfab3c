//! Definition Builder - expands raw declarations into a canonical Definition

use std::collections::BTreeMap;

use super::declaration::{PropertyDeclaration, PropertyDeclarations};
use super::model_definition::Definition;
use super::property::Property;
use super::shortcuts::{expand, ExpansionContext};
use super::types::PropertyType;
use crate::config::DefinitionConfig;
use crate::error::ModelResult;
use crate::model::{Model, ModelDescriptor};

/// Builds definitions from property declarations
#[derive(Debug, Clone, Default)]
pub struct DefinitionBuilder {
    config: DefinitionConfig,
}

impl DefinitionBuilder {
    /// Create a builder with a validated configuration
    pub fn new(config: DefinitionConfig) -> ModelResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &DefinitionConfig {
        &self.config
    }

    /// Build the definition of a model type from its own declarations
    pub fn build_model<M: Model>(&self) -> ModelResult<Definition> {
        self.build(
            M::declare_properties(),
            &M::descriptor(),
            M::uses_timestamps(),
            M::uses_soft_deletes(),
        )
    }

    /// Build a definition from raw declarations.
    ///
    /// Injected defaults (identity, timestamps, soft delete, foreign key
    /// columns) never replace a property the model declared itself.
    pub fn build(
        &self,
        mut declarations: PropertyDeclarations,
        model: &ModelDescriptor,
        auto_timestamps: bool,
        soft_delete: bool,
    ) -> ModelResult<Definition> {
        let id_name = &self.config.id_property;
        if !declarations.contains_key(id_name) && model.id_properties == [id_name.as_str()] {
            declarations.insert(id_name.clone(), self.id_declaration());
        }

        if auto_timestamps {
            for name in [&self.config.created_at, &self.config.updated_at] {
                declarations
                    .entry(name.clone())
                    .or_insert_with(|| self.timestamp_declaration());
            }
        }

        if soft_delete {
            declarations
                .entry(self.config.deleted_at.clone())
                .or_insert_with(|| self.timestamp_declaration().nullable());
        }

        let ctx = ExpansionContext::new(&self.config, model);
        let mut properties: BTreeMap<String, Property> = BTreeMap::new();
        let mut injected: Vec<Property> = Vec::new();

        for (name, declaration) in declarations {
            let expansion = expand(&name, declaration, &ctx)?;
            injected.extend(expansion.injected);
            properties.insert(name, expansion.property);
        }

        let mut injected_count = 0;
        for property in injected {
            if !properties.contains_key(property.name()) {
                injected_count += 1;
                properties.insert(property.name().to_string(), property);
            }
        }

        tracing::debug!(
            model = model.name(),
            properties = properties.len(),
            injected = injected_count,
            "Built model definition"
        );

        Ok(Definition::new(properties.into_values()))
    }

    fn id_declaration(&self) -> PropertyDeclaration {
        PropertyDeclaration::typed(PropertyType::Integer).immutable()
    }

    fn timestamp_declaration(&self) -> PropertyDeclaration {
        PropertyDeclaration::typed(PropertyType::Date).validate(&self.config.timestamp_validation)
    }
}
