//! Relationship Shortcuts - expansion of shorthand relationship declarations
//!
//! Expansion is a pure function of one declaration: it returns the resolved
//! property plus any sibling properties the shortcut requires (the foreign key
//! column of a `belongs_to`). The builder decides how injected properties merge
//! with the explicit ones.

use super::declaration::{PropertyDeclaration, RelationShortcut};
use super::naming;
use super::property::Property;
use super::types::PropertyType;
use crate::config::DefinitionConfig;
use crate::error::{ModelError, ModelResult};
use crate::model::ModelDescriptor;
use crate::relationships::RelationType;

/// What expansion needs to know about the declaring model
#[derive(Debug, Clone, Copy)]
pub struct ExpansionContext<'a> {
    pub config: &'a DefinitionConfig,
    pub model: &'a ModelDescriptor,
}

impl<'a> ExpansionContext<'a> {
    pub fn new(config: &'a DefinitionConfig, model: &'a ModelDescriptor) -> Self {
        Self { config, model }
    }

    fn id_name(&self) -> String {
        self.config.id_property.clone()
    }

    fn key_for(&self, model_name: &str) -> String {
        naming::foreign_key_for(model_name, &self.config.foreign_key_suffix)
    }
}

/// Result of expanding one declaration
#[derive(Debug, Clone, PartialEq)]
pub struct Expansion {
    pub property: Property,
    pub injected: Vec<Property>,
}

/// Expand a declaration into a property and the properties it injects
pub fn expand(
    name: &str,
    mut declaration: PropertyDeclaration,
    ctx: &ExpansionContext<'_>,
) -> ModelResult<Expansion> {
    let mut injected = Vec::new();

    match declaration.shortcut.take() {
        Some(shortcut) => {
            check_shortcut_conflicts(name, &shortcut, &declaration)?;

            let kind = shortcut.relation_type();
            let related = shortcut.model().clone();
            declaration.relation_type = Some(kind);
            declaration.relation = Some(related);
            declaration.persisted = Some(false);
            apply_key_defaults(name, kind, &mut declaration, ctx);

            if kind == RelationType::BelongsTo {
                if let Some(local_key) = declaration.local_key.as_deref() {
                    injected.push(foreign_key_column(local_key));
                }
            }
        }
        None => match declaration.relation_type {
            None if declaration.relation.is_some() => expand_legacy(name, &mut declaration, ctx),
            None => {}
            Some(kind) => apply_key_defaults(name, kind, &mut declaration, ctx),
        },
    }

    tracing::trace!(
        model = ctx.model.name(),
        property = name,
        relation = ?declaration.relation_type,
        injected = injected.len(),
        "Expanded property declaration"
    );

    Ok(Expansion {
        property: Property::from_declaration(name, declaration),
        injected,
    })
}

/// A shortcut fixes the relation type and related model, so an explicit
/// declaration of either must agree with it.
fn check_shortcut_conflicts(
    name: &str,
    shortcut: &RelationShortcut,
    declaration: &PropertyDeclaration,
) -> ModelResult<()> {
    if let Some(explicit) = declaration.relation_type {
        return Err(ModelError::Configuration(format!(
            "Property \"{}\" declares a {} shortcut and an explicit relation_type \"{}\"",
            name,
            shortcut.relation_type(),
            explicit
        )));
    }

    if let Some(relation) = &declaration.relation {
        if relation != shortcut.model() {
            return Err(ModelError::Configuration(format!(
                "Property \"{}\" declares a {} shortcut to {} but relation {}",
                name,
                shortcut.relation_type(),
                shortcut.model(),
                relation
            )));
        }
    }

    Ok(())
}

/// Older declarations only knew belongs-to relations written as a bare
/// `relation`, where the property itself stores the related id.
fn expand_legacy(name: &str, declaration: &mut PropertyDeclaration, ctx: &ExpansionContext<'_>) {
    declaration.relation_type = Some(RelationType::BelongsTo);
    declaration.local_key.get_or_insert_with(|| name.to_string());
    declaration.foreign_key.get_or_insert_with(|| ctx.id_name());
}

/// Fill in the keys a relation of this kind needs when they were not declared
fn apply_key_defaults(
    name: &str,
    kind: RelationType,
    declaration: &mut PropertyDeclaration,
    ctx: &ExpansionContext<'_>,
) {
    let related_key = declaration
        .relation
        .as_ref()
        .map(|related| ctx.key_for(related.name()));

    match kind {
        RelationType::BelongsTo => {
            declaration.foreign_key.get_or_insert_with(|| ctx.id_name());
            if declaration.local_key.is_none() {
                declaration.local_key = related_key;
            }
        }
        RelationType::BelongsToMany => {
            declaration.foreign_key.get_or_insert_with(|| ctx.id_name());
            if declaration.local_key.is_none() {
                declaration.local_key = related_key;
            }
            if declaration.pivot_tablename.is_none() {
                declaration.pivot_tablename = declaration
                    .relation
                    .as_ref()
                    .map(|related| naming::pivot_table_name(ctx.model.name(), related.name()));
            }
        }
        RelationType::HasOne | RelationType::HasMany => {
            declaration
                .foreign_key
                .get_or_insert_with(|| ctx.key_for(ctx.model.name()));
            declaration.local_key.get_or_insert_with(|| ctx.id_name());
        }
        RelationType::Polymorphic => {
            declaration.local_key.get_or_insert_with(|| name.to_string());
            declaration.foreign_key.get_or_insert_with(|| ctx.id_name());
        }
    }
}

/// The persisted integer column holding a belongs-to relation's key
fn foreign_key_column(local_key: &str) -> Property {
    Property::from_declaration(local_key, PropertyDeclaration::typed(PropertyType::Integer))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ModelRef;

    fn expand_on(model: &str, name: &str, declaration: PropertyDeclaration) -> ModelResult<Expansion> {
        let config = DefinitionConfig::default();
        let descriptor = ModelDescriptor::with_default_id(ModelRef::named(model));
        expand(name, declaration, &ExpansionContext::new(&config, &descriptor))
    }

    #[test]
    fn test_plain_declaration_is_untouched() {
        let expansion = expand_on(
            "User",
            "email",
            PropertyDeclaration::typed(PropertyType::String),
        )
        .unwrap();

        assert!(!expansion.property.is_relationship());
        assert!(expansion.property.is_persisted());
        assert!(expansion.injected.is_empty());
    }

    #[test]
    fn test_legacy_belongs_to() {
        let expansion = expand_on(
            "Post",
            "author",
            PropertyDeclaration::typed(PropertyType::Integer).relation(ModelRef::named("User")),
        )
        .unwrap();
        let property = expansion.property;

        assert_eq!(property.relation_type(), Some(RelationType::BelongsTo));
        assert_eq!(property.local_key(), Some("author"));
        assert_eq!(property.foreign_key(), Some("id"));
        assert!(property.is_persisted());
        assert!(expansion.injected.is_empty());
    }

    #[test]
    fn test_belongs_to_injects_key_column() {
        let expansion = expand_on(
            "Post",
            "role",
            PropertyDeclaration::new().belongs_to(ModelRef::named("Role")),
        )
        .unwrap();
        let property = &expansion.property;

        assert_eq!(property.relation_type(), Some(RelationType::BelongsTo));
        assert_eq!(property.foreign_model(), Some(&ModelRef::named("Role")));
        assert_eq!(property.local_key(), Some("role_id"));
        assert_eq!(property.foreign_key(), Some("id"));
        assert!(!property.is_persisted());

        assert_eq!(expansion.injected.len(), 1);
        let column = &expansion.injected[0];
        assert_eq!(column.name(), "role_id");
        assert_eq!(column.property_type(), Some(&PropertyType::Integer));
        assert!(column.is_persisted());
    }

    #[test]
    fn test_belongs_to_respects_explicit_keys() {
        let expansion = expand_on(
            "Post",
            "author",
            PropertyDeclaration::new()
                .belongs_to(ModelRef::named("User"))
                .local_key("written_by")
                .foreign_key("uuid"),
        )
        .unwrap();

        assert_eq!(expansion.property.local_key(), Some("written_by"));
        assert_eq!(expansion.property.foreign_key(), Some("uuid"));
        assert_eq!(expansion.injected[0].name(), "written_by");
    }

    #[test]
    fn test_belongs_to_many_defaults() {
        let expansion = expand_on(
            "User",
            "roles",
            PropertyDeclaration::new().belongs_to_many(ModelRef::named("Role")),
        )
        .unwrap();
        let property = expansion.property;

        assert_eq!(property.relation_type(), Some(RelationType::BelongsToMany));
        assert_eq!(property.local_key(), Some("role_id"));
        assert_eq!(property.foreign_key(), Some("id"));
        assert_eq!(property.pivot_tablename(), Some("RoleUser"));
        assert!(!property.is_persisted());
        assert!(expansion.injected.is_empty());
    }

    #[test]
    fn test_has_many_defaults() {
        let expansion = expand_on(
            "BlogPost",
            "comments",
            PropertyDeclaration::new().has_many(ModelRef::named("Comment")),
        )
        .unwrap();
        let property = expansion.property;

        assert_eq!(property.relation_type(), Some(RelationType::HasMany));
        assert_eq!(property.foreign_key(), Some("blog_post_id"));
        assert_eq!(property.local_key(), Some("id"));
        assert!(!property.is_persisted());
    }

    #[test]
    fn test_has_one_defaults() {
        let expansion = expand_on(
            "User",
            "profile",
            PropertyDeclaration::new().has_one(ModelRef::named("Profile")),
        )
        .unwrap();

        assert_eq!(expansion.property.relation_type(), Some(RelationType::HasOne));
        assert_eq!(expansion.property.foreign_key(), Some("user_id"));
        assert_eq!(expansion.property.local_key(), Some("id"));
    }

    #[test]
    fn test_explicit_polymorphic_defaults() {
        let expansion = expand_on(
            "Attachment",
            "parent",
            PropertyDeclaration::new()
                .not_persisted()
                .relation_type(RelationType::Polymorphic)
                .morphs_to("post", ModelRef::named("Post")),
        )
        .unwrap();
        let property = expansion.property;

        assert_eq!(property.local_key(), Some("parent"));
        assert_eq!(property.foreign_key(), Some("id"));
        assert_eq!(property.morphs_to().len(), 1);
        assert!(property.foreign_model().is_none());
    }

    #[test]
    fn test_explicit_relation_does_not_inject() {
        let expansion = expand_on(
            "Post",
            "author",
            PropertyDeclaration::new()
                .relation_type(RelationType::BelongsTo)
                .relation(ModelRef::named("User")),
        )
        .unwrap();

        assert_eq!(expansion.property.local_key(), Some("user_id"));
        assert!(expansion.property.is_persisted());
        assert!(expansion.injected.is_empty());
    }

    #[test]
    fn test_shortcut_with_explicit_relation_type_is_rejected() {
        let err = expand_on(
            "Post",
            "author",
            PropertyDeclaration::new()
                .belongs_to(ModelRef::named("User"))
                .relation_type(RelationType::HasOne),
        )
        .unwrap_err();

        assert!(err.is_configuration());
    }

    #[test]
    fn test_shortcut_with_conflicting_relation_is_rejected() {
        let err = expand_on(
            "Post",
            "author",
            PropertyDeclaration::new()
                .has_one(ModelRef::named("User"))
                .relation(ModelRef::named("Person")),
        )
        .unwrap_err();

        assert!(err.is_configuration());
    }
}
