use serde_json::json;

use crate::iam::Role;
use crate::synth::{attr, Resource, Synthesize};

use super::{UserPool, UserPoolClient};

/// One authentication provider entry: a user pool plus the client
/// registration callers authenticate through.
#[derive(Debug, Clone)]
pub struct UserPoolProvider {
    pub user_pool: UserPool,
    pub client: UserPoolClient,
}

/// A federated identity pool declaration.
///
/// Building the pool mints exactly two [`Role`] handles — authenticated
/// and unauthenticated. Every role referenced elsewhere in a deployment
/// must originate from this one pool instance; the composition enforces
/// that by passing the handles explicitly.
#[derive(Debug, Clone)]
pub struct IdentityPool {
    logical_id: String,
    name: String,
    allow_unauthenticated_identities: bool,
    providers: Vec<UserPoolProvider>,
    authenticated_role: Role,
    unauthenticated_role: Role,
}

impl IdentityPool {
    /// Starts building an identity pool named by its construct name.
    pub fn builder(name: impl Into<String>) -> IdentityPoolBuilder {
        IdentityPoolBuilder {
            name: name.into(),
            allow_unauthenticated_identities: false,
            providers: Vec::new(),
        }
    }

    pub fn logical_id(&self) -> &str {
        &self.logical_id
    }

    /// Token for the pool id, resolved at deploy time.
    pub fn id_token(&self) -> String {
        attr(&self.logical_id, "IdentityPoolId")
    }

    /// Role assumed by callers holding valid directory credentials.
    pub fn authenticated_role(&self) -> &Role {
        &self.authenticated_role
    }

    /// Role assumed by anonymous callers, when the pool allows them.
    pub fn unauthenticated_role(&self) -> &Role {
        &self.unauthenticated_role
    }
}

impl Synthesize for IdentityPool {
    fn render(&self) -> Resource {
        let providers: Vec<_> = self
            .providers
            .iter()
            .map(|p| {
                json!({
                    "UserPoolId": p.user_pool.id_token(),
                    "ClientId": p.client.id_token(),
                })
            })
            .collect();
        Resource {
            logical_id: self.logical_id.clone(),
            kind: "Identity::IdentityPool",
            properties: json!({
                "IdentityPoolName": self.name,
                "AllowUnauthenticatedIdentities": self.allow_unauthenticated_identities,
                "AuthenticationProviders": providers,
            }),
        }
    }
}

/// Builder for [`IdentityPool`].
#[derive(Debug)]
pub struct IdentityPoolBuilder {
    name: String,
    allow_unauthenticated_identities: bool,
    providers: Vec<UserPoolProvider>,
}

impl IdentityPoolBuilder {
    pub fn allow_unauthenticated_identities(mut self, allow: bool) -> Self {
        self.allow_unauthenticated_identities = allow;
        self
    }

    pub fn authentication_provider(mut self, provider: UserPoolProvider) -> Self {
        self.providers.push(provider);
        self
    }

    pub fn build(self) -> IdentityPool {
        let logical_id = self.name.clone();
        let pool_token = attr(&logical_id, "IdentityPoolId");
        let authenticated_role = Role::new(
            format!("{logical_id}AuthenticatedRole"),
            format!("{}-authenticated", self.name),
            pool_token.clone(),
        );
        let unauthenticated_role = Role::new(
            format!("{logical_id}UnauthenticatedRole"),
            format!("{}-unauthenticated", self.name),
            pool_token,
        );
        IdentityPool {
            logical_id,
            name: self.name,
            allow_unauthenticated_identities: self.allow_unauthenticated_identities,
            providers: self.providers,
            authenticated_role,
            unauthenticated_role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool() -> IdentityPool {
        let user_pool = UserPool::builder("SampleUserPool").build();
        let client = UserPoolClient::new("SampleUserPoolClient", &user_pool);
        IdentityPool::builder("SampleIdentityPool")
            .allow_unauthenticated_identities(true)
            .authentication_provider(UserPoolProvider { user_pool, client })
            .build()
    }

    #[test]
    fn test_build_mints_two_distinct_roles() {
        let pool = pool();

        assert!(!Role::same_handle(
            pool.authenticated_role(),
            pool.unauthenticated_role()
        ));
        assert_eq!(
            pool.authenticated_role().logical_id(),
            "SampleIdentityPoolAuthenticatedRole"
        );
        assert_eq!(
            pool.unauthenticated_role().logical_id(),
            "SampleIdentityPoolUnauthenticatedRole"
        );
    }

    #[test]
    fn test_role_accessors_return_same_handle() {
        let pool = pool();

        assert!(Role::same_handle(
            pool.authenticated_role(),
            &pool.authenticated_role().clone()
        ));
    }

    #[test]
    fn test_render_includes_providers() {
        let rendered = pool().render();

        assert_eq!(rendered.kind, "Identity::IdentityPool");
        assert_eq!(rendered.properties["AllowUnauthenticatedIdentities"], true);
        assert_eq!(
            rendered.properties["AuthenticationProviders"][0]["UserPoolId"],
            "${SampleUserPool.UserPoolId}"
        );
        assert_eq!(
            rendered.properties["AuthenticationProviders"][0]["ClientId"],
            "${SampleUserPoolClient.ClientId}"
        );
    }

    #[test]
    fn test_roles_assumed_by_pool() {
        let rendered = pool().authenticated_role().render();

        assert_eq!(
            rendered.properties["AssumedBy"],
            "${SampleIdentityPool.IdentityPoolId}"
        );
    }
}
