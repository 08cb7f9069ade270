use cirrus_core::iam::Role;
use cirrus_core::identity::{
    AccountRecovery, IdentityPool, StandardAttribute, UserPool, UserPoolClient, UserPoolGroup,
    UserPoolProvider, VerificationStyle,
};
use cirrus_core::synth::Stack;

use super::ComposeError;

/// Configuration for the auth stack.
#[derive(Debug, Clone)]
pub struct AuthStackProps<'a> {
    pub stage: &'a str,
    pub user_pool_name: &'a str,
    pub create_groups: bool,
    pub group_names: &'a [String],
    pub identity_pool_name: &'a str,
}

/// Identity directory, client registration and federated identity pool.
///
/// Leaf stack: takes nothing from other stacks and exposes the handles
/// everything downstream wires against.
#[derive(Debug)]
pub struct AuthStack {
    pub stack: Stack,
    pub user_pool: UserPool,
    pub authenticated_role: Role,
    pub unauthenticated_role: Role,
}

impl AuthStack {
    pub fn new(props: AuthStackProps<'_>) -> Result<Self, ComposeError> {
        let mut stack = Stack::new("AuthStack");

        let user_pool = UserPool::builder(props.user_pool_name)
            .self_sign_up_enabled(true)
            .account_recovery(AccountRecovery::PhoneAndEmail)
            .verification_style(VerificationStyle::Code)
            .auto_verify_email(true)
            .email_attribute(StandardAttribute {
                required: true,
                mutable: true,
            })
            .build();
        stack.add(&user_pool)?;

        if props.create_groups {
            // No ordering dependency between groups; duplicate names are
            // the platform's problem, not pre-validated here.
            for group_name in props.group_names {
                let group = UserPoolGroup::new(
                    format!("{}{group_name}Group", props.user_pool_name),
                    &user_pool,
                    group_name.as_str(),
                );
                stack.add(&group)?;
            }
        }

        let client = UserPoolClient::new(format!("{}Client", props.user_pool_name), &user_pool);
        stack.add(&client)?;

        // Unauthenticated identities are allowed on purpose: the API
        // stack later grants the unauthenticated role one query field.
        let identity_pool = IdentityPool::builder(props.identity_pool_name)
            .allow_unauthenticated_identities(true)
            .authentication_provider(UserPoolProvider {
                user_pool: user_pool.clone(),
                client: client.clone(),
            })
            .build();
        stack.add(&identity_pool)?;
        stack.add(identity_pool.authenticated_role())?;
        stack.add(identity_pool.unauthenticated_role())?;

        stack.output("UserPoolId", user_pool.id_token())?;
        stack.output("UserPoolClientId", client.id_token())?;
        stack.output("IdentityPoolId", identity_pool.id_token())?;

        tracing::debug!(
            stage = props.stage,
            user_pool = props.user_pool_name,
            identity_pool = props.identity_pool_name,
            "auth stack evaluated"
        );

        Ok(Self {
            user_pool,
            authenticated_role: identity_pool.authenticated_role().clone(),
            unauthenticated_role: identity_pool.unauthenticated_role().clone(),
            stack,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn props(group_names: &[String]) -> AuthStackProps<'_> {
        AuthStackProps {
            stage: "dev",
            user_pool_name: "SampleUserPool",
            create_groups: true,
            group_names,
            identity_pool_name: "SampleIdentityPool",
        }
    }

    #[test]
    fn test_declares_pool_client_and_identity_pool_once() {
        let groups = vec![];
        let auth = AuthStack::new(AuthStackProps {
            create_groups: false,
            ..props(&groups)
        })
        .unwrap();

        let kinds: Vec<_> = auth.stack.resources().iter().map(|r| r.kind).collect();

        assert_eq!(
            kinds.iter().filter(|&&k| k == "Identity::UserPool").count(),
            1
        );
        assert_eq!(
            kinds
                .iter()
                .filter(|&&k| k == "Identity::UserPoolClient")
                .count(),
            1
        );
        assert_eq!(
            kinds
                .iter()
                .filter(|&&k| k == "Identity::IdentityPool")
                .count(),
            1
        );
        assert_eq!(kinds.iter().filter(|&&k| k == "Iam::Role").count(), 2);
    }

    #[test]
    fn test_declares_one_group_per_name() {
        let groups = vec!["admin".to_string()];
        let auth = AuthStack::new(props(&groups)).unwrap();

        let group_resources: Vec<_> = auth
            .stack
            .resources()
            .iter()
            .filter(|r| r.kind == "Identity::UserPoolGroup")
            .collect();

        assert_eq!(group_resources.len(), 1);
        assert_eq!(group_resources[0].properties["GroupName"], "admin");
        assert_eq!(
            group_resources[0].properties["UserPoolId"],
            "${SampleUserPool.UserPoolId}"
        );
    }

    #[test]
    fn test_group_flag_disables_group_declarations() {
        let groups = vec!["admin".to_string()];
        let auth = AuthStack::new(AuthStackProps {
            create_groups: false,
            ..props(&groups)
        })
        .unwrap();

        assert!(auth
            .stack
            .resources()
            .iter()
            .all(|r| r.kind != "Identity::UserPoolGroup"));
    }

    #[test]
    fn test_exposes_two_distinct_roles() {
        let groups = vec![];
        let auth = AuthStack::new(props(&groups)).unwrap();

        assert!(!Role::same_handle(
            &auth.authenticated_role,
            &auth.unauthenticated_role
        ));
    }

    #[test]
    fn test_emits_three_informational_outputs() {
        let groups = vec![];
        let auth = AuthStack::new(props(&groups)).unwrap();

        for name in ["UserPoolId", "UserPoolClientId", "IdentityPoolId"] {
            let value = auth.stack.output_value(name).unwrap();
            assert!(!value.is_empty());
        }
    }
}
