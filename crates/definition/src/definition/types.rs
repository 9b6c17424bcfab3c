//! Property Types - storage types, mutability and validation rule references

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Storage type of a property
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PropertyType {
    Integer,
    Float,
    String,
    Boolean,
    Date,
    Array,
    Object,
    /// Application defined type, kept by name
    Custom(String),
}

impl PropertyType {
    pub fn as_str(&self) -> &str {
        match self {
            PropertyType::Integer => "integer",
            PropertyType::Float => "float",
            PropertyType::String => "string",
            PropertyType::Boolean => "boolean",
            PropertyType::Date => "date",
            PropertyType::Array => "array",
            PropertyType::Object => "object",
            PropertyType::Custom(name) => name,
        }
    }
}

impl FromStr for PropertyType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_lowercase().as_str() {
            "integer" | "int" => PropertyType::Integer,
            "float" | "number" => PropertyType::Float,
            "string" => PropertyType::String,
            "boolean" | "bool" => PropertyType::Boolean,
            "date" | "timestamp" => PropertyType::Date,
            "array" => PropertyType::Array,
            "object" => PropertyType::Object,
            _ => PropertyType::Custom(s.to_string()),
        })
    }
}

impl From<String> for PropertyType {
    fn from(s: String) -> Self {
        match s.parse() {
            Ok(property_type) => property_type,
            Err(never) => match never {},
        }
    }
}

impl From<PropertyType> for String {
    fn from(property_type: PropertyType) -> Self {
        property_type.as_str().to_string()
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// When a property value may be written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mutability {
    /// Writable at any time
    #[default]
    Mutable,
    /// Writable only when the record is created
    MutableCreateOnly,
    /// Set once by the storage layer and never written again
    Immutable,
}

impl Mutability {
    /// Returns true if the value may change after creation
    pub fn is_mutable(self) -> bool {
        matches!(self, Self::Mutable)
    }

    /// Returns true if the value may be supplied on create
    pub fn settable_on_create(self) -> bool {
        !matches!(self, Self::Immutable)
    }
}

/// A reference to a rule in the validation rule library
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ValidationRule {
    pub name: String,
    pub options: Vec<String>,
}

impl FromStr for ValidationRule {
    type Err = std::convert::Infallible;

    /// Parses `name:opt1:opt2`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.trim().split(':');
        let name = parts.next().unwrap_or_default().to_string();
        let options = parts.map(|part| part.to_string()).collect();
        Ok(Self { name, options })
    }
}

impl fmt::Display for ValidationRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        for option in &self.options {
            write!(f, ":{}", option)?;
        }
        Ok(())
    }
}

/// Ordered validation rules attached to a property
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "RulesRepr")]
pub struct ValidationRules(Vec<ValidationRule>);

#[derive(Deserialize)]
#[serde(untagged)]
enum RulesRepr {
    Spec(String),
    List(Vec<String>),
}

impl From<RulesRepr> for ValidationRules {
    fn from(repr: RulesRepr) -> Self {
        match repr {
            RulesRepr::Spec(spec) => ValidationRules::parse(&spec),
            RulesRepr::List(rules) => ValidationRules(
                rules
                    .iter()
                    .flat_map(|rule| ValidationRules::parse(rule).0)
                    .collect(),
            ),
        }
    }
}

impl ValidationRules {
    /// Parse a `|` separated rule spec (`required|string:1:255`)
    pub fn parse(spec: &str) -> Self {
        let rules = spec
            .split('|')
            .map(str::trim)
            .filter(|rule| !rule.is_empty())
            .filter_map(|rule| rule.parse().ok())
            .collect();
        Self(rules)
    }

    pub fn rules(&self) -> &[ValidationRule] {
        &self.0
    }

    pub fn names(&self) -> Vec<&str> {
        self.0.iter().map(|rule| rule.name.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for ValidationRules {
    fn from(spec: &str) -> Self {
        Self::parse(spec)
    }
}
