mod api;
mod auth;
mod database;
mod file_storage;

pub use api::{ApiStack, ApiStackProps};
pub use auth::{AuthStack, AuthStackProps};
pub use database::DatabaseStack;
pub use file_storage::{FileStorageStack, FileStorageStackProps};

use cirrus_core::database::TableError;
use cirrus_core::graphql::GraphqlError;
use cirrus_core::synth::{Stack, SynthError};
use thiserror::Error;

use crate::config::DeploymentConfig;

/// Errors raised while evaluating the deployment definition.
///
/// Any of these aborts the whole evaluation; no stack is written until
/// every stack evaluated cleanly.
#[derive(Debug, Error)]
pub enum ComposeError {
    #[error(transparent)]
    Synth(#[from] SynthError),
    #[error(transparent)]
    Graphql(#[from] GraphqlError),
    #[error(transparent)]
    Table(#[from] TableError),
}

/// The fully composed deployment: four stacks in dependency order.
#[derive(Debug)]
pub struct Deployment {
    pub auth: AuthStack,
    pub database: DatabaseStack,
    pub file_storage: FileStorageStack,
    pub api: ApiStack,
}

impl Deployment {
    /// The stacks in evaluation order.
    pub fn stacks(&self) -> [&Stack; 4] {
        [
            &self.auth.stack,
            &self.database.stack,
            &self.file_storage.stack,
            &self.api.stack,
        ]
    }
}

/// Evaluates the whole deployment definition once.
///
/// The leaf stacks (auth, database) are built first; their handles are
/// then threaded explicitly into the dependent stacks. There is no
/// ambient registry — this function is the only place the graph is
/// wired.
pub fn compose(config: &DeploymentConfig) -> Result<Deployment, ComposeError> {
    let auth = AuthStack::new(AuthStackProps {
        stage: &config.stage,
        user_pool_name: &config.user_pool_name,
        create_groups: config.create_groups,
        group_names: &config.group_names,
        identity_pool_name: &config.identity_pool_name,
    })?;

    let database = DatabaseStack::new()?;

    let file_storage = FileStorageStack::new(FileStorageStackProps {
        authenticated_role: auth.authenticated_role.clone(),
        unauthenticated_role: auth.unauthenticated_role.clone(),
        allowed_origins: &config.allowed_origins,
    })?;

    let api = ApiStack::new(ApiStackProps {
        user_pool: auth.user_pool.clone(),
        table: database.table.clone(),
        unauthenticated_role: auth.unauthenticated_role.clone(),
        schema_path: &config.schema_path,
        public_iam_fields: &config.public_iam_fields,
    })?;

    Ok(Deployment {
        auth,
        database,
        file_storage,
        api,
    })
}
