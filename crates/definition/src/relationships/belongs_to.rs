//! BelongsTo Relationship - the local model holds the foreign model's key

use super::metadata::RelationType;
use super::traits::{constrain_key, Relation};
use crate::error::ModelResult;
use crate::model::{Model, ModelRef};
use crate::query::QueryBuilder;

/// BelongsTo relationship - local model references one foreign model
#[derive(Debug)]
pub struct BelongsTo<'a, M: Model> {
    local: &'a M,
    local_key: &'a str,
    foreign_model: &'a ModelRef,
    foreign_key: &'a str,
}

impl<'a, M: Model> BelongsTo<'a, M> {
    pub fn new(
        local: &'a M,
        local_key: &'a str,
        foreign_model: &'a ModelRef,
        foreign_key: &'a str,
    ) -> Self {
        Self {
            local,
            local_key,
            foreign_model,
            foreign_key,
        }
    }
}

impl<M: Model> Relation<M> for BelongsTo<'_, M> {
    fn kind(&self) -> RelationType {
        RelationType::BelongsTo
    }

    fn local_model(&self) -> &M {
        self.local
    }

    fn local_key(&self) -> &str {
        self.local_key
    }

    fn foreign_model(&self) -> ModelResult<&ModelRef> {
        Ok(self.foreign_model)
    }

    fn foreign_key(&self) -> &str {
        self.foreign_key
    }

    fn query(&self) -> ModelResult<QueryBuilder> {
        Ok(constrain_key(
            QueryBuilder::for_model(self.foreign_model),
            &self.foreign_model.column(self.foreign_key),
            self.local.field(self.local_key),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::Post;

    #[test]
    fn test_query_constrains_foreign_identity() {
        let post = Post::new(7, Some(3), "Hello");
        let user = ModelRef::new("User", "users");
        let relation = BelongsTo::new(&post, "user_id", &user, "id");

        let (sql, params) = relation.query().unwrap().to_sql_with_params();
        assert_eq!(sql, "SELECT * FROM users WHERE users.id = $1");
        assert_eq!(params, vec![serde_json::json!(3)]);
        assert_eq!(relation.local_model().id, Some(7));
    }

    #[test]
    fn test_missing_key_matches_nothing() {
        let post = Post::new(7, None, "Orphan");
        let user = ModelRef::new("User", "users");
        let query = BelongsTo::new(&post, "user_id", &user, "id").query().unwrap();

        assert!(query.is_none());
        assert_eq!(
            query.to_sql(),
            "SELECT * FROM users WHERE 1 = 0 AND users.id IS NULL"
        );
    }
}
