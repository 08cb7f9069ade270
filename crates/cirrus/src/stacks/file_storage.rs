use cirrus_core::iam::{Grant, Role};
use cirrus_core::storage::{Bucket, CorsMethod, CorsRule};
use cirrus_core::synth::Stack;

use super::ComposeError;

/// Configuration for the file storage stack.
#[derive(Debug, Clone)]
pub struct FileStorageStackProps<'a> {
    pub authenticated_role: Role,
    pub unauthenticated_role: Role,
    pub allowed_origins: &'a [String],
}

/// Blob container for user files, reachable from the browser via CORS.
///
/// Both identity pool roles get read/write access under the usual
/// per-principal prefixes: authenticated callers own `private/`,
/// anonymous callers share `public/`.
#[derive(Debug)]
pub struct FileStorageStack {
    pub stack: Stack,
    pub authenticated_grant: Grant,
    pub unauthenticated_grant: Grant,
}

impl FileStorageStack {
    pub fn new(props: FileStorageStackProps<'_>) -> Result<Self, ComposeError> {
        let mut stack = Stack::new("FileStorageStack");

        let bucket = Bucket::builder("SampleFileStorage")
            .cors_rule(CorsRule {
                allowed_origins: props.allowed_origins.to_vec(),
                allowed_methods: vec![
                    CorsMethod::Get,
                    CorsMethod::Put,
                    CorsMethod::Post,
                    CorsMethod::Delete,
                    CorsMethod::Head,
                ],
                allowed_headers: vec!["*".to_string()],
                max_age_secs: Some(3000),
            })
            .build();
        stack.add(&bucket)?;

        let authenticated_grant =
            bucket.grant_read_write(&props.authenticated_role, "private/${identity}/*");
        stack.add(&authenticated_grant)?;

        let unauthenticated_grant =
            bucket.grant_read_write(&props.unauthenticated_role, "public/*");
        stack.add(&unauthenticated_grant)?;

        Ok(Self {
            stack,
            authenticated_grant,
            unauthenticated_grant,
        })
    }
}
