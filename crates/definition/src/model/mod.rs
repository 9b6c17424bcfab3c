//! Model System - the model type collaborator consumed by definitions and relations
//!
//! - `core_trait`: the `Model` trait implemented by application models
//! - `model_ref`: runtime references to model types
//! - `extensions`: relation access helpers for model instances

pub mod core_trait;
pub mod extensions;
pub mod model_ref;

pub use core_trait::Model;
pub use extensions::ModelRelations;
pub use model_ref::{ModelDescriptor, ModelRef};
