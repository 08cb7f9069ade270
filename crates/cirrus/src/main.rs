mod config;
mod stacks;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::DeploymentConfig;
use crate::stacks::compose;

/// Cirrus - declare the sample todo backend and synthesize its templates
#[derive(Parser, Debug)]
#[command(name = "cirrus")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Deployment stage label
    #[arg(long, short, default_value = "dev", env = "CIRRUS_STAGE")]
    stage: String,

    /// Directory the synthesized templates are written to
    #[arg(long, short, default_value = "cirrus.out", env = "CIRRUS_OUT_DIR")]
    out_dir: PathBuf,

    /// Construct name of the user pool
    #[arg(long, default_value = "SampleUserPool", env = "CIRRUS_USER_POOL")]
    user_pool_name: String,

    /// Construct name of the identity pool
    #[arg(long, default_value = "SampleIdentityPool", env = "CIRRUS_IDENTITY_POOL")]
    identity_pool_name: String,

    /// Skip user pool group declarations
    #[arg(long)]
    no_groups: bool,

    /// User pool groups to declare
    #[arg(long, default_value = "admin", value_delimiter = ',')]
    group_names: Vec<String>,

    /// Origins allowed to make cross-origin requests against file storage
    #[arg(
        long,
        default_value = "http://localhost:3000",
        value_delimiter = ',',
        env = "CIRRUS_ALLOWED_ORIGINS"
    )]
    allowed_origins: Vec<String>,

    /// Query fields the unauthenticated role may invoke
    #[arg(long, default_value = "getSampleTodoIAM", value_delimiter = ',')]
    public_iam_fields: Vec<String>,

    /// Path to the GraphQL schema asset
    #[arg(long, env = "CIRRUS_SCHEMA")]
    schema: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cirrus=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = DeploymentConfig::new(cli.stage);
    config.user_pool_name = cli.user_pool_name;
    config.identity_pool_name = cli.identity_pool_name;
    config.create_groups = !cli.no_groups;
    config.group_names = cli.group_names;
    config.allowed_origins = cli.allowed_origins;
    config.public_iam_fields = cli.public_iam_fields;
    if let Some(schema) = cli.schema {
        config.schema_path = schema;
    }

    tracing::info!(stage = %config.stage, "evaluating deployment definition");
    let deployment = compose(&config)?;

    std::fs::create_dir_all(&cli.out_dir)?;
    for stack in deployment.stacks() {
        let path = cli.out_dir.join(format!("{}.template.json", stack.name()));
        std::fs::write(&path, stack.template().to_json_pretty()?)?;
        tracing::info!(stack = stack.name(), path = %path.display(), "wrote template");

        for output in stack.outputs() {
            tracing::info!(stack = stack.name(), name = %output.name, value = %output.value, "output");
        }
    }

    Ok(())
}
