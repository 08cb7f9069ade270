use std::path::{Path, PathBuf};

/// Static configuration for one deployment of the backend.
///
/// Everything the entry point needs is carried here explicitly; the
/// stacks never reach into the environment themselves. Which query
/// fields the unauthenticated role may invoke is a deliberate,
/// reviewable choice, so it lives here rather than inside the API stack.
#[derive(Debug, Clone)]
pub struct DeploymentConfig {
    /// Deployment stage label, e.g. `dev`.
    pub stage: String,
    /// Construct name of the user pool.
    pub user_pool_name: String,
    /// Construct name of the identity pool.
    pub identity_pool_name: String,
    /// Whether to declare user pool groups at all.
    pub create_groups: bool,
    /// Group names to declare when `create_groups` is set.
    pub group_names: Vec<String>,
    /// Origins allowed to make cross-origin requests against file storage.
    pub allowed_origins: Vec<String>,
    /// Query fields the unauthenticated role is granted.
    pub public_iam_fields: Vec<String>,
    /// Path to the GraphQL schema asset.
    pub schema_path: PathBuf,
}

impl DeploymentConfig {
    /// Development defaults for the given stage, mirroring the shipped
    /// sample: one `admin` group, localhost CORS, one anonymous-readable
    /// query field.
    pub fn new(stage: impl Into<String>) -> Self {
        Self {
            stage: stage.into(),
            user_pool_name: "SampleUserPool".to_string(),
            identity_pool_name: "SampleIdentityPool".to_string(),
            create_groups: true,
            group_names: vec!["admin".to_string()],
            allowed_origins: vec!["http://localhost:3000".to_string()],
            public_iam_fields: vec!["getSampleTodoIAM".to_string()],
            schema_path: default_schema_path(),
        }
    }
}

/// The schema asset shipped with this crate.
pub fn default_schema_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/schema.graphql")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DeploymentConfig::new("dev");

        assert_eq!(config.stage, "dev");
        assert!(config.create_groups);
        assert_eq!(config.group_names, ["admin"]);
        assert_eq!(config.public_iam_fields, ["getSampleTodoIAM"]);
        assert!(config.schema_path.ends_with("assets/schema.graphql"));
    }

    #[test]
    fn test_shipped_schema_exists() {
        assert!(default_schema_path().is_file());
    }
}
