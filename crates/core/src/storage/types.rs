use std::sync::Arc;

use serde_json::json;

use crate::iam::{Grant, Role};
use crate::synth::{attr, Resource, Synthesize};

/// HTTP methods a CORS rule may allow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CorsMethod {
    Get,
    Put,
    Post,
    Delete,
    Head,
}

impl CorsMethod {
    fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Put => "PUT",
            Self::Post => "POST",
            Self::Delete => "DELETE",
            Self::Head => "HEAD",
        }
    }
}

/// One cross-origin access rule on a bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorsRule {
    pub allowed_origins: Vec<String>,
    pub allowed_methods: Vec<CorsMethod>,
    pub allowed_headers: Vec<String>,
    pub max_age_secs: Option<u64>,
}

#[derive(Debug)]
struct BucketInner {
    logical_id: String,
    cors_rules: Vec<CorsRule>,
}

/// A blob storage container declaration.
#[derive(Debug, Clone)]
pub struct Bucket(Arc<BucketInner>);

impl Bucket {
    /// Starts building a bucket named by its construct name.
    pub fn builder(name: impl Into<String>) -> BucketBuilder {
        BucketBuilder {
            logical_id: name.into(),
            cors_rules: Vec::new(),
        }
    }

    pub fn logical_id(&self) -> &str {
        &self.0.logical_id
    }

    /// Token for the bucket's unique resource name, resolved at deploy time.
    pub fn arn_token(&self) -> String {
        attr(self.logical_id(), "Arn")
    }

    /// Grants the role read and write access to objects under `prefix`.
    ///
    /// The prefix text is passed through verbatim so callers can use the
    /// platform's per-principal substitution variables.
    pub fn grant_read_write(&self, role: &Role, prefix: &str) -> Grant {
        Grant::new(
            format!("{}{}ReadWrite", self.logical_id(), role.logical_id()),
            role,
            vec![
                "storage:GetObject".to_string(),
                "storage:PutObject".to_string(),
                "storage:DeleteObject".to_string(),
            ],
            vec![format!("{}/{prefix}", self.arn_token())],
        )
    }
}

impl Synthesize for Bucket {
    fn render(&self) -> Resource {
        let rules: Vec<_> = self
            .0
            .cors_rules
            .iter()
            .map(|rule| {
                let methods: Vec<_> = rule.allowed_methods.iter().map(|m| m.as_str()).collect();
                let mut value = json!({
                    "AllowedOrigins": rule.allowed_origins,
                    "AllowedMethods": methods,
                    "AllowedHeaders": rule.allowed_headers,
                });
                if let Some(max_age) = rule.max_age_secs {
                    value["MaxAgeSeconds"] = json!(max_age);
                }
                value
            })
            .collect();
        Resource {
            logical_id: self.logical_id().to_string(),
            kind: "Storage::Bucket",
            properties: json!({ "CorsRules": rules }),
        }
    }
}

/// Builder for [`Bucket`].
#[derive(Debug)]
pub struct BucketBuilder {
    logical_id: String,
    cors_rules: Vec<CorsRule>,
}

impl BucketBuilder {
    pub fn cors_rule(mut self, rule: CorsRule) -> Self {
        self.cors_rules.push(rule);
        self
    }

    pub fn build(self) -> Bucket {
        Bucket(Arc::new(BucketInner {
            logical_id: self.logical_id,
            cors_rules: self.cors_rules,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bucket() -> Bucket {
        Bucket::builder("SampleFileStorage")
            .cors_rule(CorsRule {
                allowed_origins: vec!["http://localhost:3000".to_string()],
                allowed_methods: vec![CorsMethod::Get, CorsMethod::Put],
                allowed_headers: vec!["*".to_string()],
                max_age_secs: Some(3000),
            })
            .build()
    }

    #[test]
    fn test_render_cors_rules() {
        let rendered = bucket().render();

        assert_eq!(rendered.kind, "Storage::Bucket");
        let rule = &rendered.properties["CorsRules"][0];
        assert_eq!(rule["AllowedOrigins"][0], "http://localhost:3000");
        assert_eq!(rule["AllowedMethods"][0], "GET");
        assert_eq!(rule["AllowedMethods"][1], "PUT");
        assert_eq!(rule["AllowedHeaders"][0], "*");
        assert_eq!(rule["MaxAgeSeconds"], 3000);
    }

    #[test]
    fn test_max_age_omitted_when_unset() {
        let bucket = Bucket::builder("SampleFileStorage")
            .cors_rule(CorsRule {
                allowed_origins: vec!["*".to_string()],
                allowed_methods: vec![CorsMethod::Get],
                allowed_headers: vec![],
                max_age_secs: None,
            })
            .build();

        let rendered = bucket.render();

        assert!(rendered.properties["CorsRules"][0]
            .get("MaxAgeSeconds")
            .is_none());
    }

    #[test]
    fn test_grant_read_write_scopes_to_prefix() {
        let bucket = bucket();
        let role = crate::iam::Role::new("PoolAuthenticatedRole", "pool-authenticated", "${Pool.IdentityPoolId}");

        let grant = bucket.grant_read_write(&role, "private/${identity}/*");

        assert!(crate::iam::Role::same_handle(grant.role(), &role));
        assert_eq!(
            grant.resources(),
            ["${SampleFileStorage.Arn}/private/${identity}/*"]
        );
        assert_eq!(
            grant.actions(),
            [
                "storage:GetObject",
                "storage:PutObject",
                "storage:DeleteObject"
            ]
        );
    }
}
