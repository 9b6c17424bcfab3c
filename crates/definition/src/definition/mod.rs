//! Model Definitions - property metadata and the builder that produces it
//!
//! - `declaration`: raw property declarations, including relationship shortcuts
//! - `shortcuts`: expansion of shortcuts into resolved relationship metadata
//! - `builder`: declarations plus model flags into a `Definition`
//! - `registry`: per model type cache of built definitions

pub mod builder;
pub mod declaration;
pub mod model_definition;
pub mod naming;
pub mod property;
pub mod registry;
pub mod shortcuts;
pub mod types;

pub use builder::DefinitionBuilder;
pub use declaration::{parse_declarations, PropertyDeclaration, PropertyDeclarations, RelationShortcut};
pub use model_definition::Definition;
pub use property::Property;
pub use registry::DefinitionRegistry;
pub use shortcuts::{expand, Expansion, ExpansionContext};
pub use types::{Mutability, PropertyType, ValidationRule, ValidationRules};
