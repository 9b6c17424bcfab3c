//! BelongsToMany Relationship - many-to-many through a pivot table

use super::metadata::RelationType;
use super::traits::{constrain_key, Relation};
use crate::config::DEFAULT_FOREIGN_KEY_SUFFIX;
use crate::definition::naming;
use crate::error::ModelResult;
use crate::model::{Model, ModelRef};
use crate::query::QueryBuilder;

/// BelongsToMany relationship - local and foreign models linked by pivot rows
///
/// The pivot table holds `local_key` (the foreign model's key) and a column
/// named after the local model (`user_id` for `User`) holding the local
/// model's identity.
#[derive(Debug)]
pub struct BelongsToMany<'a, M: Model> {
    local: &'a M,
    local_key: &'a str,
    pivot_tablename: &'a str,
    foreign_model: &'a ModelRef,
    foreign_key: &'a str,
}

impl<'a, M: Model> BelongsToMany<'a, M> {
    pub fn new(
        local: &'a M,
        local_key: &'a str,
        pivot_tablename: &'a str,
        foreign_model: &'a ModelRef,
        foreign_key: &'a str,
    ) -> Self {
        Self {
            local,
            local_key,
            pivot_tablename,
            foreign_model,
            foreign_key,
        }
    }

    pub fn pivot_tablename(&self) -> &str {
        self.pivot_tablename
    }

    /// Pivot column holding the local model's identity
    pub fn pivot_local_key(&self) -> String {
        naming::foreign_key_for(M::model_name(), DEFAULT_FOREIGN_KEY_SUFFIX)
    }

    fn pivot_column(&self, column: &str) -> String {
        format!("{}.{}", self.pivot_tablename, column)
    }
}

impl<M: Model> Relation<M> for BelongsToMany<'_, M> {
    fn kind(&self) -> RelationType {
        RelationType::BelongsToMany
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
        let local_id = M::id_properties()
            .first()
            .and_then(|id| self.local.field(id));

        let query = QueryBuilder::for_model(self.foreign_model)
            .select(&self.foreign_model.column("*"))
            .join(
                self.pivot_tablename,
                &self.pivot_column(self.local_key),
                &self.foreign_model.column(self.foreign_key),
            );

        Ok(constrain_key(
            query,
            &self.pivot_column(&self.pivot_local_key()),
            local_id,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::User;

    #[test]
    fn test_query_goes_through_pivot() {
        let user = User::new(9, "Grace");
        let roles = ModelRef::named("Role");
        let relation = BelongsToMany::new(&user, "role_id", "RoleUser", &roles, "id");

        assert_eq!(relation.pivot_local_key(), "user_id");
        assert_eq!(
            relation.query().unwrap().to_sql(),
            "SELECT roles.* FROM roles INNER JOIN RoleUser ON RoleUser.role_id = roles.id \
             WHERE RoleUser.user_id = 9"
        );
    }

    #[test]
    fn test_unsaved_local_model_matches_nothing() {
        let user = User::unsaved("Grace");
        let roles = ModelRef::named("Role");
        let relation = BelongsToMany::new(&user, "role_id", "RoleUser", &roles, "id");

        assert!(relation.query().unwrap().is_none());
    }
}
