mod api;
mod error;
mod mapping;
mod schema;

pub use api::{
    AuthorizationMode, DataSourceId, FieldLogLevel, GraphqlApi, GraphqlApiBuilder, Resolver,
    ResolverProps,
};
pub use error::GraphqlError;
pub use mapping::{MappingTemplate, PrimaryKey, PrimaryKeyBuilder, Values};
pub use schema::SchemaAsset;
