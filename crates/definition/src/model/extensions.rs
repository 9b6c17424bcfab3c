//! Model Extensions - relation access on model instances

use crate::definition::Definition;
use crate::error::{ModelResult, RelationshipError};
use crate::model::Model;
use crate::relationships::{AnyRelation, Relationship};

/// Relation access for any model with a definition
pub trait ModelRelations: Model + Sized {
    /// Build the relation declared by the property `name`
    fn relation<'a>(
        &'a self,
        definition: &'a Definition,
        name: &str,
    ) -> ModelResult<AnyRelation<'a, Self>> {
        let property = definition.get(name).ok_or_else(|| {
            RelationshipError::NotFound(format!("{}.{}", Self::model_name(), name))
        })?;
        Relationship::make(self, property)
    }

    /// Build every relation in the definition, in property name order
    fn relations<'a>(
        &'a self,
        definition: &'a Definition,
    ) -> ModelResult<Vec<(&'a str, AnyRelation<'a, Self>)>> {
        definition
            .relationships()
            .map(|property| {
                Relationship::make(self, property).map(|relation| (property.name(), relation))
            })
            .collect()
    }
}

impl<M: Model> ModelRelations for M {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ModelError;
    use crate::relationships::{Relation, RelationType};
    use crate::tests::Post;

    #[test]
    fn test_relation_by_name() {
        let definition = Post::build_definition().unwrap();
        let post = Post::new(3, Some(1), "Hello");

        let author = post.relation(&definition, "user").unwrap();
        assert_eq!(author.kind(), RelationType::BelongsTo);
        assert_eq!(
            author.query().unwrap().to_sql(),
            "SELECT * FROM users WHERE users.id = 1"
        );
    }

    #[test]
    fn test_unknown_relation_name() {
        let definition = Post::build_definition().unwrap();
        let post = Post::new(3, Some(1), "Hello");

        let err = post.relation(&definition, "tags").unwrap_err();
        assert_eq!(
            err,
            ModelError::Relationship("Relationship not found: Post.tags".to_string())
        );
    }

    #[test]
    fn test_all_relations() {
        let definition = Post::build_definition().unwrap();
        let post = Post::new(3, Some(1), "Hello");

        let names: Vec<&str> = post
            .relations(&definition)
            .unwrap()
            .into_iter()
            .map(|(name, _)| name)
            .collect();
        assert_eq!(names, vec!["comments", "user"]);
    }
}
