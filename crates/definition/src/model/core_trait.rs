//! Core Model Trait - what the definition layer needs to know about a model type
//!
//! Defines the model name, table name, identity properties, the property
//! declaration callback and field access for instances.

use std::collections::HashMap;
use std::fmt::Debug;

use serde_json::Value;

use super::model_ref::{ModelDescriptor, ModelRef};
use crate::config::DEFAULT_ID_NAME;
use crate::definition::{Definition, DefinitionBuilder, PropertyDeclarations};
use crate::error::ModelResult;

/// Core trait for models described by a definition
pub trait Model: Send + Sync + Debug {
    /// Model type name used for key inference and pivot naming
    fn model_name() -> &'static str
    where
        Self: Sized,
    {
        let type_name = std::any::type_name::<Self>();
        let path = type_name.split('<').next().unwrap_or(type_name);
        path.rsplit("::").next().unwrap_or(path)
    }

    /// Table name for this model
    fn table_name() -> &'static str
    where
        Self: Sized;

    /// Identity property names, in order
    fn id_properties() -> Vec<String>
    where
        Self: Sized,
    {
        vec![DEFAULT_ID_NAME.to_string()]
    }

    /// Raw property declarations for this model
    fn declare_properties() -> PropertyDeclarations
    where
        Self: Sized;

    /// Check if this model gets created_at/updated_at columns
    fn uses_timestamps() -> bool
    where
        Self: Sized,
    {
        false
    }

    /// Check if this model gets a deleted_at column
    fn uses_soft_deletes() -> bool
    where
        Self: Sized,
    {
        false
    }

    /// Convert model to field-value pairs
    fn to_fields(&self) -> HashMap<String, Value>;

    /// Get a single field value
    fn field(&self, name: &str) -> Option<Value> {
        self.to_fields().remove(name)
    }

    /// Reference to this model type
    fn model_ref() -> ModelRef
    where
        Self: Sized,
    {
        ModelRef::new(Self::model_name(), Self::table_name())
    }

    /// Descriptor handed to the definition builder
    fn descriptor() -> ModelDescriptor
    where
        Self: Sized,
    {
        ModelDescriptor::new(Self::model_ref(), Self::id_properties())
    }

    /// Build a fresh definition for this model with the default builder.
    /// Use a `DefinitionRegistry` to get the cached definition instead.
    fn build_definition() -> ModelResult<Definition>
    where
        Self: Sized,
    {
        DefinitionBuilder::default().build_model::<Self>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::PropertyDeclaration;
    use crate::tests::User;

    #[derive(Debug)]
    struct Wrapper<T> {
        inner: T,
    }

    impl<T: Model> Model for Wrapper<T> {
        fn table_name() -> &'static str {
            "wrappers"
        }

        fn declare_properties() -> PropertyDeclarations {
            let mut declarations = PropertyDeclarations::new();
            declarations.insert(
                "owner".to_string(),
                PropertyDeclaration::new().belongs_to(ModelRef::of::<T>()),
            );
            declarations
        }

        fn to_fields(&self) -> HashMap<String, Value> {
            self.inner.to_fields()
        }
    }

    #[test]
    fn test_model_name_is_last_path_segment() {
        assert_eq!(User::model_name(), "User");
        assert_eq!(User::model_ref(), ModelRef::new("User", "users"));
    }

    #[test]
    fn test_model_name_drops_generic_arguments() {
        assert_eq!(Wrapper::<User>::model_name(), "Wrapper");
        assert_eq!(Wrapper::<Wrapper<User>>::model_name(), "Wrapper");
    }

    #[test]
    fn test_generic_model_definition() {
        let definition = Wrapper::<User>::build_definition().unwrap();

        assert_eq!(definition.get("owner").unwrap().local_key(), Some("user_id"));
        assert!(definition.has("user_id"));

        let wrapper = Wrapper {
            inner: User::new(2, "Ada"),
        };
        assert_eq!(wrapper.field("name"), Some(serde_json::json!("Ada")));
    }
}
