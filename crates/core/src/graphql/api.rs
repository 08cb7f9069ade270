use chrono::{DateTime, Utc};
use serde_json::{json, Value};

use crate::database::Table;
use crate::iam::{Grant, Role};
use crate::identity::UserPool;
use crate::synth::{attr, Resource, Result as SynthResult, Stack};

use super::{GraphqlError, MappingTemplate, SchemaAsset};

/// One way callers may authorize against the endpoint.
#[derive(Debug, Clone)]
pub enum AuthorizationMode {
    /// Caller presents a credential issued by the identity directory.
    UserPool(UserPool),
    /// Caller presents the endpoint's API key.
    ApiKey {
        description: String,
        expires: DateTime<Utc>,
    },
    /// Caller signs the request with an assumed role.
    Iam,
}

impl AuthorizationMode {
    fn render(&self) -> Value {
        match self {
            Self::UserPool(pool) => json!({
                "Type": "USER_POOL",
                "UserPoolId": pool.id_token(),
            }),
            Self::ApiKey { .. } => json!({ "Type": "API_KEY" }),
            Self::Iam => json!({ "Type": "IAM" }),
        }
    }
}

/// Per-field logging verbosity of the endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldLogLevel {
    None,
    Error,
    All,
}

impl FieldLogLevel {
    fn as_str(self) -> &'static str {
        match self {
            Self::None => "NONE",
            Self::Error => "ERROR",
            Self::All => "ALL",
        }
    }
}

/// Opaque handle to a data source registered on an api.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataSourceId(usize);

#[derive(Debug, Clone)]
struct DataSource {
    name: String,
    table: Table,
}

/// Binding from one schema field to a data source plus its request and
/// response mapping templates.
#[derive(Debug, Clone)]
pub struct Resolver {
    type_name: String,
    field_name: String,
    data_source: String,
    request_template: MappingTemplate,
    response_template: MappingTemplate,
}

impl Resolver {
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn field_name(&self) -> &str {
        &self.field_name
    }

    pub fn data_source(&self) -> &str {
        &self.data_source
    }
}

/// Arguments to [`GraphqlApi::create_resolver`].
#[derive(Debug, Clone)]
pub struct ResolverProps {
    pub type_name: String,
    pub field_name: String,
    pub request_template: MappingTemplate,
    pub response_template: MappingTemplate,
}

impl ResolverProps {
    pub fn new(
        type_name: impl Into<String>,
        field_name: impl Into<String>,
        request_template: MappingTemplate,
        response_template: MappingTemplate,
    ) -> Self {
        Self {
            type_name: type_name.into(),
            field_name: field_name.into(),
            request_template,
            response_template,
        }
    }
}

/// A managed GraphQL endpoint declaration.
///
/// Built once from a schema asset and an authorization configuration,
/// then populated with data sources, resolvers and grants before being
/// synthesized into a stack. Resolver `(type, field)` pairs are unique
/// per endpoint and must exist in the schema.
#[derive(Debug, Clone)]
pub struct GraphqlApi {
    logical_id: String,
    name: String,
    schema: SchemaAsset,
    default_authorization: AuthorizationMode,
    additional_authorization: Vec<AuthorizationMode>,
    field_log_level: FieldLogLevel,
    xray: bool,
    data_sources: Vec<DataSource>,
    resolvers: Vec<Resolver>,
    grants: Vec<Grant>,
}

impl GraphqlApi {
    /// Starts building an endpoint over the given schema asset.
    pub fn builder(name: impl Into<String>, schema: SchemaAsset) -> GraphqlApiBuilder {
        GraphqlApiBuilder {
            name: name.into(),
            schema,
            default_authorization: None,
            additional_authorization: Vec::new(),
            field_log_level: FieldLogLevel::None,
            xray: false,
        }
    }

    pub fn logical_id(&self) -> &str {
        &self.logical_id
    }

    /// Token for the endpoint URL, resolved at deploy time.
    pub fn url_token(&self) -> String {
        attr(&self.logical_id, "GraphqlUrl")
    }

    /// Token for the endpoint id, resolved at deploy time.
    pub fn id_token(&self) -> String {
        attr(&self.logical_id, "ApiId")
    }

    /// Token for the endpoint's unique resource name.
    pub fn arn_token(&self) -> String {
        attr(&self.logical_id, "Arn")
    }

    /// Token for the API key value, present when an API-key authorization
    /// mode is configured.
    pub fn api_key_token(&self) -> Option<String> {
        self.api_key_config()
            .map(|_| attr(&self.api_key_logical_id(), "ApiKey"))
    }

    /// Registers the table as a data source under `name`.
    pub fn add_table_data_source(
        &mut self,
        name: impl Into<String>,
        table: &Table,
    ) -> Result<DataSourceId, GraphqlError> {
        let name = name.into();
        if self.data_sources.iter().any(|ds| ds.name == name) {
            return Err(GraphqlError::DuplicateDataSource {
                api: self.name.clone(),
                name,
            });
        }
        self.data_sources.push(DataSource {
            name,
            table: table.clone(),
        });
        Ok(DataSourceId(self.data_sources.len() - 1))
    }

    /// Binds a schema field to a data source.
    ///
    /// Fails when the `(type, field)` pair is already bound or does not
    /// exist in the schema asset.
    pub fn create_resolver(
        &mut self,
        data_source: DataSourceId,
        props: ResolverProps,
    ) -> Result<(), GraphqlError> {
        let source = self
            .data_sources
            .get(data_source.0)
            .ok_or_else(|| GraphqlError::UnknownDataSource {
                api: self.name.clone(),
            })?;
        if !self.schema.has_field(&props.type_name, &props.field_name) {
            return Err(GraphqlError::FieldNotInSchema {
                type_name: props.type_name,
                field_name: props.field_name,
            });
        }
        if self
            .resolvers
            .iter()
            .any(|r| r.type_name == props.type_name && r.field_name == props.field_name)
        {
            return Err(GraphqlError::DuplicateResolver {
                api: self.name.clone(),
                type_name: props.type_name,
                field_name: props.field_name,
            });
        }
        self.resolvers.push(Resolver {
            type_name: props.type_name,
            field_name: props.field_name,
            data_source: source.name.clone(),
            request_template: props.request_template,
            response_template: props.response_template,
        });
        Ok(())
    }

    /// Grants the role permission to invoke exactly one query field.
    ///
    /// The field must exist on the schema's `Query` type. Nothing else is
    /// implied: sibling fields stay unreachable for the role.
    pub fn grant_query(&mut self, role: &Role, field_name: &str) -> Result<(), GraphqlError> {
        if !self.schema.has_field("Query", field_name) {
            return Err(GraphqlError::FieldNotInSchema {
                type_name: "Query".to_string(),
                field_name: field_name.to_string(),
            });
        }
        self.grants.push(Grant::new(
            format!("{}{}{}Grant", self.logical_id, role.logical_id(), field_name),
            role,
            vec!["graphql:Query".to_string()],
            vec![format!(
                "{}/types/Query/fields/{field_name}",
                self.arn_token()
            )],
        ));
        Ok(())
    }

    pub fn resolvers(&self) -> &[Resolver] {
        &self.resolvers
    }

    pub fn grants(&self) -> &[Grant] {
        &self.grants
    }

    /// Renders the endpoint and everything registered on it into the stack.
    pub fn synthesize(&self, stack: &mut Stack) -> SynthResult<()> {
        stack.add(self)?;

        if let Some((description, expires)) = self.api_key_config() {
            stack.add(&ApiKeyResource {
                logical_id: self.api_key_logical_id(),
                api_id: self.id_token(),
                description: description.clone(),
                expires,
            })?;
        }

        for source in &self.data_sources {
            stack.add(&DataSourceResource {
                logical_id: format!("{}{}", self.logical_id, source.name),
                api_id: self.id_token(),
                name: source.name.clone(),
                table_name: source.table.name_token(),
            })?;
        }

        for resolver in &self.resolvers {
            stack.add(&ResolverResource {
                logical_id: format!(
                    "{}{}{}Resolver",
                    self.logical_id, resolver.type_name, resolver.field_name
                ),
                api_id: self.id_token(),
                resolver: resolver.clone(),
            })?;
        }

        for grant in &self.grants {
            stack.add(grant)?;
        }

        Ok(())
    }

    fn api_key_logical_id(&self) -> String {
        format!("{}ApiKey", self.logical_id)
    }

    fn api_key_config(&self) -> Option<(&String, DateTime<Utc>)> {
        std::iter::once(&self.default_authorization)
            .chain(self.additional_authorization.iter())
            .find_map(|mode| match mode {
                AuthorizationMode::ApiKey {
                    description,
                    expires,
                } => Some((description, *expires)),
                _ => None,
            })
    }
}

impl crate::synth::Synthesize for GraphqlApi {
    fn render(&self) -> Resource {
        let additional: Vec<_> = self
            .additional_authorization
            .iter()
            .map(AuthorizationMode::render)
            .collect();
        Resource {
            logical_id: self.logical_id.clone(),
            kind: "GraphQL::Api",
            properties: json!({
                "Name": self.name,
                "Schema": self.schema.definition(),
                "DefaultAuthorization": self.default_authorization.render(),
                "AdditionalAuthorization": additional,
                "FieldLogLevel": self.field_log_level.as_str(),
                "XrayEnabled": self.xray,
            }),
        }
    }
}

/// Builder for [`GraphqlApi`].
#[derive(Debug)]
pub struct GraphqlApiBuilder {
    name: String,
    schema: SchemaAsset,
    default_authorization: Option<AuthorizationMode>,
    additional_authorization: Vec<AuthorizationMode>,
    field_log_level: FieldLogLevel,
    xray: bool,
}

impl GraphqlApiBuilder {
    pub fn default_authorization(mut self, mode: AuthorizationMode) -> Self {
        self.default_authorization = Some(mode);
        self
    }

    /// Appends an additional authorization mode; order is preserved.
    pub fn additional_authorization(mut self, mode: AuthorizationMode) -> Self {
        self.additional_authorization.push(mode);
        self
    }

    pub fn field_log_level(mut self, level: FieldLogLevel) -> Self {
        self.field_log_level = level;
        self
    }

    pub fn xray(mut self, enabled: bool) -> Self {
        self.xray = enabled;
        self
    }

    pub fn build(self) -> Result<GraphqlApi, GraphqlError> {
        let default_authorization =
            self.default_authorization
                .ok_or_else(|| GraphqlError::MissingDefaultAuthorization {
                    api: self.name.clone(),
                })?;
        Ok(GraphqlApi {
            logical_id: self.name.clone(),
            name: self.name,
            schema: self.schema,
            default_authorization,
            additional_authorization: self.additional_authorization,
            field_log_level: self.field_log_level,
            xray: self.xray,
            data_sources: Vec::new(),
            resolvers: Vec::new(),
            grants: Vec::new(),
        })
    }
}

struct ApiKeyResource {
    logical_id: String,
    api_id: String,
    description: String,
    expires: DateTime<Utc>,
}

impl crate::synth::Synthesize for ApiKeyResource {
    fn render(&self) -> Resource {
        Resource {
            logical_id: self.logical_id.clone(),
            kind: "GraphQL::ApiKey",
            properties: json!({
                "ApiId": self.api_id,
                "Description": self.description,
                "Expires": self.expires.to_rfc3339(),
            }),
        }
    }
}

struct DataSourceResource {
    logical_id: String,
    api_id: String,
    name: String,
    table_name: String,
}

impl crate::synth::Synthesize for DataSourceResource {
    fn render(&self) -> Resource {
        Resource {
            logical_id: self.logical_id.clone(),
            kind: "GraphQL::DataSource",
            properties: json!({
                "ApiId": self.api_id,
                "Name": self.name,
                "TableName": self.table_name,
            }),
        }
    }
}

struct ResolverResource {
    logical_id: String,
    api_id: String,
    resolver: Resolver,
}

impl crate::synth::Synthesize for ResolverResource {
    fn render(&self) -> Resource {
        Resource {
            logical_id: self.logical_id.clone(),
            kind: "GraphQL::Resolver",
            properties: json!({
                "ApiId": self.api_id,
                "TypeName": self.resolver.type_name,
                "FieldName": self.resolver.field_name,
                "DataSource": self.resolver.data_source,
                "RequestMappingTemplate": self.resolver.request_template.as_str(),
                "ResponseMappingTemplate": self.resolver.response_template.as_str(),
            }),
        }
    }
}
