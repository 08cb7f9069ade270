use std::path::Path;

use chrono::{Duration, Utc};
use cirrus_core::database::Table;
use cirrus_core::graphql::{
    AuthorizationMode, FieldLogLevel, GraphqlApi, MappingTemplate, PrimaryKey, ResolverProps,
    SchemaAsset, Values,
};
use cirrus_core::iam::Role;
use cirrus_core::identity::UserPool;
use cirrus_core::synth::Stack;

use super::ComposeError;

/// Configuration for the API stack.
#[derive(Debug)]
pub struct ApiStackProps<'a> {
    pub user_pool: UserPool,
    pub table: Table,
    pub unauthenticated_role: Role,
    pub schema_path: &'a Path,
    /// Query fields the unauthenticated role may invoke. Anonymous access
    /// is an explicit choice made by the caller, not a default of this
    /// stack.
    pub public_iam_fields: &'a [String],
}

/// The managed GraphQL endpoint over the todo table.
///
/// Directory credentials are the default authorization; an expiring API
/// key and role-based IAM auth are additional modes, each carrying one
/// of the three read paths.
#[derive(Debug)]
pub struct ApiStack {
    pub stack: Stack,
    pub api: GraphqlApi,
}

impl ApiStack {
    pub fn new(props: ApiStackProps<'_>) -> Result<Self, ComposeError> {
        let mut stack = Stack::new("ApiStack");

        let schema = SchemaAsset::from_file(props.schema_path)?;
        let mut api = GraphqlApi::builder("SampleTodoProject", schema)
            .default_authorization(AuthorizationMode::UserPool(props.user_pool.clone()))
            .additional_authorization(AuthorizationMode::ApiKey {
                description: "A sample API key".to_string(),
                expires: Utc::now() + Duration::days(30),
            })
            .additional_authorization(AuthorizationMode::Iam)
            .field_log_level(FieldLogLevel::All)
            .xray(true)
            .build()?;

        let todos = api.add_table_data_source("SampleTodoDataSource", &props.table)?;
        let todos_api_key = api.add_table_data_source("SampleTodoDataSourceApiKey", &props.table)?;
        let todos_iam = api.add_table_data_source("SampleTodoDataSourceIam", &props.table)?;

        api.create_resolver(
            todos,
            ResolverProps::new(
                "Query",
                "getSampleTodo",
                MappingTemplate::get_item("id", "id"),
                MappingTemplate::result_item(),
            ),
        )?;
        api.create_resolver(
            todos_api_key,
            ResolverProps::new(
                "Query",
                "getSampleTodoPublic",
                MappingTemplate::get_item("id", "id"),
                MappingTemplate::result_item(),
            ),
        )?;
        api.create_resolver(
            todos_iam,
            ResolverProps::new(
                "Query",
                "getSampleTodoIAM",
                MappingTemplate::get_item("id", "id"),
                MappingTemplate::result_item(),
            ),
        )?;
        api.create_resolver(
            todos,
            ResolverProps::new(
                "Mutation",
                "createSampleTodo",
                MappingTemplate::put_item(
                    PrimaryKey::partition("id").auto(),
                    Values::projecting("input"),
                ),
                MappingTemplate::result_item(),
            ),
        )?;

        for field in props.public_iam_fields {
            api.grant_query(&props.unauthenticated_role, field)?;
        }

        api.synthesize(&mut stack)?;

        stack.output("GraphQLAPIURL", api.url_token())?;
        if let Some(api_key) = api.api_key_token() {
            stack.output("GraphQLAPIKey", api_key)?;
        }
        stack.output("GraphQLAPIID", api.id_token())?;

        tracing::debug!(
            resolvers = api.resolvers().len(),
            grants = api.grants().len(),
            "api stack evaluated"
        );

        Ok(Self { stack, api })
    }
}

#[cfg(test)]
mod tests {
    use cirrus_core::database::AttributeType;
    use cirrus_core::identity::{IdentityPool, UserPoolClient, UserPoolProvider};

    use crate::config::default_schema_path;

    use super::*;

    fn props<'a>(
        public_iam_fields: &'a [String],
        schema_path: &'a std::path::Path,
    ) -> ApiStackProps<'a> {
        let user_pool = UserPool::builder("SampleUserPool").build();
        let client = UserPoolClient::new("SampleUserPoolClient", &user_pool);
        let pool = IdentityPool::builder("SampleIdentityPool")
            .allow_unauthenticated_identities(true)
            .authentication_provider(UserPoolProvider {
                user_pool: user_pool.clone(),
                client,
            })
            .build();
        let table = Table::builder("SampleDB")
            .partition_key("id", AttributeType::String)
            .build()
            .unwrap();
        ApiStackProps {
            user_pool,
            table,
            unauthenticated_role: pool.unauthenticated_role().clone(),
            schema_path,
            public_iam_fields,
        }
    }

    #[test]
    fn test_registers_the_four_resolvers() {
        let fields = vec!["getSampleTodoIAM".to_string()];
        let schema = default_schema_path();
        let api_stack = ApiStack::new(props(&fields, &schema)).unwrap();

        let pairs: Vec<_> = api_stack
            .api
            .resolvers()
            .iter()
            .map(|r| (r.type_name(), r.field_name()))
            .collect();

        assert_eq!(
            pairs,
            [
                ("Query", "getSampleTodo"),
                ("Query", "getSampleTodoPublic"),
                ("Query", "getSampleTodoIAM"),
                ("Mutation", "createSampleTodo"),
            ]
        );
    }

    #[test]
    fn test_unauthenticated_grant_covers_only_the_configured_field() {
        let fields = vec!["getSampleTodoIAM".to_string()];
        let schema = default_schema_path();
        let api_stack = ApiStack::new(props(&fields, &schema)).unwrap();

        assert_eq!(api_stack.api.grants().len(), 1);
        let resources = api_stack.api.grants()[0].resources();
        assert_eq!(resources.len(), 1);
        assert!(resources[0].ends_with("/types/Query/fields/getSampleTodoIAM"));
    }

    #[test]
    fn test_unknown_public_field_fails_evaluation() {
        let fields = vec!["getMissing".to_string()];
        let schema = default_schema_path();

        let result = ApiStack::new(props(&fields, &schema));

        assert!(result.is_err());
    }

    #[test]
    fn test_missing_schema_asset_fails_evaluation() {
        let fields = vec![];
        let schema = std::path::PathBuf::from("does/not/exist.graphql");

        let result = ApiStack::new(props(&fields, &schema));

        assert!(result.is_err());
    }

    #[test]
    fn test_emits_url_key_and_id_outputs() {
        let fields = vec![];
        let schema = default_schema_path();
        let api_stack = ApiStack::new(props(&fields, &schema)).unwrap();

        for name in ["GraphQLAPIURL", "GraphQLAPIKey", "GraphQLAPIID"] {
            let value = api_stack.stack.output_value(name).unwrap();
            assert!(!value.is_empty());
        }
    }
}
