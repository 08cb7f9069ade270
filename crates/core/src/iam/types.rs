use std::sync::Arc;

use serde_json::json;

use crate::synth::{attr, Resource, Synthesize};

#[derive(Debug)]
struct RoleInner {
    logical_id: String,
    name: String,
    assumed_by: String,
}

/// An access role handle.
///
/// Roles are minted by the identity pool that federates callers onto
/// them; everything else receives the handle by explicit injection and
/// may clone it freely. Clones share identity — use [`Role::same_handle`]
/// to check whether two handles refer to the same declaration.
#[derive(Debug, Clone)]
pub struct Role(Arc<RoleInner>);

impl Role {
    pub(crate) fn new(
        logical_id: impl Into<String>,
        name: impl Into<String>,
        assumed_by: impl Into<String>,
    ) -> Self {
        Self(Arc::new(RoleInner {
            logical_id: logical_id.into(),
            name: name.into(),
            assumed_by: assumed_by.into(),
        }))
    }

    pub fn logical_id(&self) -> &str {
        &self.0.logical_id
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// Token for the role's unique resource name, resolved at deploy time.
    pub fn arn(&self) -> String {
        attr(self.logical_id(), "Arn")
    }

    /// True when both handles point at the same role declaration.
    pub fn same_handle(a: &Role, b: &Role) -> bool {
        Arc::ptr_eq(&a.0, &b.0)
    }
}

impl Synthesize for Role {
    fn render(&self) -> Resource {
        Resource {
            logical_id: self.logical_id().to_string(),
            kind: "Iam::Role",
            properties: json!({
                "RoleName": self.name(),
                "AssumedBy": self.0.assumed_by,
            }),
        }
    }
}

/// A one-directional permission edge from a role to operations on a
/// resource. Grants are created once at definition time and are not
/// revocable within this model.
#[derive(Debug, Clone)]
pub struct Grant {
    logical_id: String,
    role: Role,
    actions: Vec<String>,
    resources: Vec<String>,
}

impl Grant {
    pub fn new(
        logical_id: impl Into<String>,
        role: &Role,
        actions: Vec<String>,
        resources: Vec<String>,
    ) -> Self {
        Self {
            logical_id: logical_id.into(),
            role: role.clone(),
            actions,
            resources,
        }
    }

    pub fn logical_id(&self) -> &str {
        &self.logical_id
    }

    pub fn role(&self) -> &Role {
        &self.role
    }

    pub fn actions(&self) -> &[String] {
        &self.actions
    }

    pub fn resources(&self) -> &[String] {
        &self.resources
    }
}

impl Synthesize for Grant {
    fn render(&self) -> Resource {
        Resource {
            logical_id: self.logical_id.clone(),
            kind: "Iam::Policy",
            properties: json!({
                "Roles": [self.role.logical_id()],
                "Statement": [{
                    "Effect": "Allow",
                    "Action": self.actions,
                    "Resource": self.resources,
                }],
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn role() -> Role {
        Role::new("PoolUnauthenticatedRole", "pool-unauthenticated", "${Pool.IdentityPoolId}")
    }

    #[test]
    fn test_clones_share_identity() {
        let a = role();
        let b = a.clone();

        assert!(Role::same_handle(&a, &b));
    }

    #[test]
    fn test_distinct_roles_have_distinct_identity() {
        let a = role();
        let b = role();

        assert!(!Role::same_handle(&a, &b));
    }

    #[test]
    fn test_role_arn_token() {
        assert_eq!(role().arn(), "${PoolUnauthenticatedRole.Arn}");
    }

    #[test]
    fn test_role_render() {
        let rendered = role().render();

        assert_eq!(rendered.kind, "Iam::Role");
        assert_eq!(rendered.logical_id, "PoolUnauthenticatedRole");
        assert_eq!(rendered.properties["RoleName"], "pool-unauthenticated");
        assert_eq!(rendered.properties["AssumedBy"], "${Pool.IdentityPoolId}");
    }

    #[test]
    fn test_grant_render() {
        let role = role();
        let grant = Grant::new(
            "ApiUnauthenticatedQuery",
            &role,
            vec!["graphql:Query".to_string()],
            vec!["${Api.Arn}/types/Query/fields/getSampleTodoIAM".to_string()],
        );

        let rendered = grant.render();

        assert_eq!(rendered.kind, "Iam::Policy");
        assert_eq!(rendered.properties["Roles"][0], "PoolUnauthenticatedRole");
        assert_eq!(rendered.properties["Statement"][0]["Action"][0], "graphql:Query");
        assert_eq!(
            rendered.properties["Statement"][0]["Resource"][0],
            "${Api.Arn}/types/Query/fields/getSampleTodoIAM"
        );
    }
}
