//! Definition - the immutable, name sorted property set of one model type

use std::collections::BTreeMap;

use serde::Serialize;

use super::property::Property;

/// Canonical property schema for a model type.
///
/// Properties are kept sorted by name so iteration order depends only on the
/// set of names, never on declaration order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Definition {
    properties: BTreeMap<String, Property>,
}

impl Definition {
    pub fn new(properties: impl IntoIterator<Item = Property>) -> Self {
        Self {
            properties: properties
                .into_iter()
                .map(|property| (property.name().to_string(), property))
                .collect(),
        }
    }

    /// Get a property by name
    pub fn get(&self, name: &str) -> Option<&Property> {
        self.properties.get(name)
    }

    /// Check if a property exists
    pub fn has(&self, name: &str) -> bool {
        self.properties.contains_key(name)
    }

    /// Iterate over all properties in name order
    pub fn iter(&self) -> impl Iterator<Item = &Property> {
        self.properties.values()
    }

    /// All property names in order
    pub fn names(&self) -> Vec<&str> {
        self.properties.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Properties stored in a physical column
    pub fn persisted(&self) -> impl Iterator<Item = &Property> {
        self.iter().filter(|property| property.is_persisted())
    }

    /// Properties that may change after creation
    pub fn mutable(&self) -> impl Iterator<Item = &Property> {
        self.iter().filter(|property| property.is_mutable())
    }

    /// Properties describing a relationship
    pub fn relationships(&self) -> impl Iterator<Item = &Property> {
        self.iter().filter(|property| property.is_relationship())
    }

    /// Properties included in array output
    pub fn in_array(&self) -> impl Iterator<Item = &Property> {
        self.iter().filter(|property| property.in_array())
    }
}

impl<'a> IntoIterator for &'a Definition {
    type Item = &'a Property;
    type IntoIter = std::collections::btree_map::Values<'a, String, Property>;

    fn into_iter(self) -> Self::IntoIter {
        self.properties.values()
    }
}
