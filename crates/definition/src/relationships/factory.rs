//! Relationship Factory - turns a resolved relationship property into a relation
//!
//! All key inference happened when the definition was built; `make` only
//! dispatches on the relation kind and forwards the property's keys.

use super::belongs_to::BelongsTo;
use super::belongs_to_many::BelongsToMany;
use super::has_many::HasMany;
use super::has_one::HasOne;
use super::metadata::RelationType;
use super::polymorphic::Polymorphic;
use super::traits::Relation;
use crate::definition::Property;
use crate::error::{ModelResult, RelationshipError};
use crate::model::{Model, ModelRef};
use crate::query::QueryBuilder;

/// Any relation kind, as produced by [`Relationship::make`]
#[derive(Debug)]
pub enum AnyRelation<'a, M: Model> {
    BelongsTo(BelongsTo<'a, M>),
    HasOne(HasOne<'a, M>),
    HasMany(HasMany<'a, M>),
    BelongsToMany(BelongsToMany<'a, M>),
    Polymorphic(Polymorphic<'a, M>),
}

macro_rules! dispatch {
    ($relation:expr, $inner:ident => $call:expr) => {
        match $relation {
            AnyRelation::BelongsTo($inner) => $call,
            AnyRelation::HasOne($inner) => $call,
            AnyRelation::HasMany($inner) => $call,
            AnyRelation::BelongsToMany($inner) => $call,
            AnyRelation::Polymorphic($inner) => $call,
        }
    };
}

impl<M: Model> Relation<M> for AnyRelation<'_, M> {
    fn kind(&self) -> RelationType {
        dispatch!(self, relation => relation.kind())
    }

    fn local_model(&self) -> &M {
        dispatch!(self, relation => relation.local_model())
    }

    fn local_key(&self) -> &str {
        dispatch!(self, relation => relation.local_key())
    }

    fn foreign_model(&self) -> ModelResult<&ModelRef> {
        dispatch!(self, relation => relation.foreign_model())
    }

    fn foreign_key(&self) -> &str {
        dispatch!(self, relation => relation.foreign_key())
    }

    fn query(&self) -> ModelResult<QueryBuilder> {
        dispatch!(self, relation => relation.query())
    }
}

/// Relation factory
pub struct Relationship;

impl Relationship {
    /// Build the relation a property describes, starting from `model`
    pub fn make<'a, M: Model>(
        model: &'a M,
        property: &'a Property,
    ) -> ModelResult<AnyRelation<'a, M>> {
        let kind = property.relation_type().ok_or_else(|| {
            RelationshipError::InvalidConfiguration(format!(
                "Property \"{}\" of {} is not a relationship",
                property.name(),
                M::model_name()
            ))
        })?;

        let local_key = required(property, "local_key", property.local_key())?;
        let foreign_key = required(property, "foreign_key", property.foreign_key())?;

        let relation = match kind {
            RelationType::BelongsTo => AnyRelation::BelongsTo(BelongsTo::new(
                model,
                local_key,
                foreign_model(property)?,
                foreign_key,
            )),
            RelationType::HasOne => AnyRelation::HasOne(HasOne::new(
                model,
                local_key,
                foreign_model(property)?,
                foreign_key,
            )),
            RelationType::HasMany => AnyRelation::HasMany(HasMany::new(
                model,
                local_key,
                foreign_model(property)?,
                foreign_key,
            )),
            RelationType::BelongsToMany => AnyRelation::BelongsToMany(BelongsToMany::new(
                model,
                local_key,
                required(property, "pivot_tablename", property.pivot_tablename())?,
                foreign_model(property)?,
                foreign_key,
            )),
            RelationType::Polymorphic => AnyRelation::Polymorphic(Polymorphic::new(
                model,
                local_key,
                property.morphs_to(),
                foreign_key,
            )),
        };

        tracing::debug!(
            model = M::model_name(),
            property = property.name(),
            relation = %kind,
            "Made relation"
        );

        Ok(relation)
    }
}

fn required<'a>(property: &Property, key: &str, value: Option<&'a str>) -> ModelResult<&'a str> {
    value.ok_or_else(|| {
        RelationshipError::InvalidConfiguration(format!(
            "Relationship property \"{}\" has no {}",
            property.name(),
            key
        ))
        .into()
    })
}

fn foreign_model(property: &Property) -> ModelResult<&ModelRef> {
    property.foreign_model().ok_or_else(|| {
        RelationshipError::InvalidConfiguration(format!(
            "Relationship property \"{}\" has no related model",
            property.name()
        ))
        .into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::{PropertyDeclaration, PropertyType};
    use crate::tests::{Post, User};
    use serde_json::json;

    fn property(name: &str, declaration: PropertyDeclaration) -> Property {
        Property::from_declaration(name, declaration)
    }

    #[test]
    fn test_has_many_dispatch() {
        let post = Post::new(11, Some(1), "Hello");
        let comments = property(
            "comments",
            PropertyDeclaration::new()
                .relation_type(RelationType::HasMany)
                .relation(ModelRef::named("Comment"))
                .local_key("id")
                .foreign_key("post_id"),
        );

        let relation = Relationship::make(&post, &comments).unwrap();
        assert!(matches!(relation, AnyRelation::HasMany(_)));
        assert_eq!(relation.kind(), RelationType::HasMany);
        assert_eq!(relation.foreign_model().unwrap().name(), "Comment");
        assert_eq!(relation.local_key(), "id");
        assert_eq!(relation.foreign_key(), "post_id");

        let query = relation.query().unwrap();
        assert_eq!(query.model().map(ModelRef::name), Some("Comment"));
        let condition = &query.where_conditions()[0];
        assert_eq!(condition.column(), "comments.post_id");
        assert_eq!(condition.value(), Some(&json!(11)));
    }

    #[test]
    fn test_non_relationship_is_configuration_error() {
        let user = User::new(1, "Ada");
        let name = property("name", PropertyDeclaration::typed(PropertyType::String));

        let err = Relationship::make(&user, &name).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_missing_keys_are_configuration_errors() {
        let user = User::new(1, "Ada");
        let posts = property(
            "posts",
            PropertyDeclaration::new()
                .relation_type(RelationType::HasMany)
                .relation(ModelRef::named("Post"))
                .local_key("id"),
        );
        assert!(Relationship::make(&user, &posts).unwrap_err().is_configuration());

        let roles = property(
            "roles",
            PropertyDeclaration::new()
                .relation_type(RelationType::BelongsToMany)
                .relation(ModelRef::named("Role"))
                .local_key("role_id")
                .foreign_key("id"),
        );
        let err = Relationship::make(&user, &roles).unwrap_err();
        assert!(err.to_string().contains("pivot_tablename"));

        let owner = property(
            "owner",
            PropertyDeclaration::new()
                .relation_type(RelationType::BelongsTo)
                .local_key("owner_id")
                .foreign_key("id"),
        );
        assert!(Relationship::make(&user, &owner).unwrap_err().is_configuration());
    }

    #[test]
    fn test_polymorphic_dispatch() {
        let user = User::new(1, "Ada");
        let subject = property(
            "subject",
            PropertyDeclaration::new()
                .relation_type(RelationType::Polymorphic)
                .morphs_to("post", ModelRef::named("Post"))
                .local_key("subject")
                .foreign_key("id"),
        );

        match Relationship::make(&user, &subject).unwrap() {
            AnyRelation::Polymorphic(relation) => {
                assert_eq!(relation.local_type_key(), "subject_type");
                assert_eq!(relation.local_id_key(), "subject_id");
                assert_eq!(relation.morphs_to().len(), 1);
            }
            other => panic!("expected polymorphic relation, got {:?}", other.kind()),
        }
    }
}
