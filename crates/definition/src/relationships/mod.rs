//! Relationships - runtime relation objects built from relationship properties
//!
//! A relation borrows the local model instance and the resolved property; it
//! performs no key inference of its own and only turns the keys into a query.

pub mod belongs_to;
pub mod belongs_to_many;
pub mod factory;
pub mod has_many;
pub mod has_one;
pub mod metadata;
pub mod polymorphic;
pub mod traits;

pub use belongs_to::BelongsTo;
pub use belongs_to_many::BelongsToMany;
pub use factory::{AnyRelation, Relationship};
pub use has_many::HasMany;
pub use has_one::HasOne;
pub use metadata::RelationType;
pub use polymorphic::Polymorphic;
pub use traits::Relation;
