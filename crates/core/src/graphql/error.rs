use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while declaring a GraphQL endpoint.
///
/// All of these are definition-time errors: they fail the deployment
/// evaluation before anything is rendered. Mapping-template mistakes are
/// not covered — those only surface when a resolver runs on the managed
/// platform.
#[derive(Debug, Error)]
pub enum GraphqlError {
    #[error("failed to read schema asset {path}: {source}")]
    SchemaRead {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("schema declares no object types")]
    EmptySchema,
    #[error("api {api} has no default authorization mode")]
    MissingDefaultAuthorization { api: String },
    #[error("duplicate data source on api {api}: {name}")]
    DuplicateDataSource { api: String, name: String },
    #[error("unknown data source id on api {api}")]
    UnknownDataSource { api: String },
    #[error("duplicate resolver on api {api}: {type_name}.{field_name}")]
    DuplicateResolver {
        api: String,
        type_name: String,
        field_name: String,
    },
    #[error("schema has no field {type_name}.{field_name}")]
    FieldNotInSchema {
        type_name: String,
        field_name: String,
    },
}
