use std::sync::Arc;

use serde_json::json;

use crate::synth::{attr, Resource, Synthesize};

use super::TableError;

/// Storage type of a key attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeType {
    String,
    Number,
    Binary,
}

impl AttributeType {
    fn as_str(self) -> &'static str {
        match self {
            Self::String => "S",
            Self::Number => "N",
            Self::Binary => "B",
        }
    }
}

/// Capacity model for a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BillingMode {
    /// Scales per request; no pre-provisioned throughput.
    OnDemand,
    Provisioned,
}

impl BillingMode {
    fn as_str(self) -> &'static str {
        match self {
            Self::OnDemand => "ON_DEMAND",
            Self::Provisioned => "PROVISIONED",
        }
    }
}

/// What happens to the resource when the deployment is torn down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemovalPolicy {
    Destroy,
    Retain,
}

impl RemovalPolicy {
    fn as_str(self) -> &'static str {
        match self {
            Self::Destroy => "DESTROY",
            Self::Retain => "RETAIN",
        }
    }
}

/// The field by which records are primarily addressed. Immutable once the
/// table exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionKey {
    pub name: String,
    pub attribute_type: AttributeType,
}

#[derive(Debug)]
struct TableInner {
    logical_id: String,
    partition_key: PartitionKey,
    billing_mode: BillingMode,
    removal_policy: RemovalPolicy,
}

/// A key-value table declaration.
#[derive(Debug, Clone)]
pub struct Table(Arc<TableInner>);

impl Table {
    /// Starts building a table named by its construct name.
    pub fn builder(name: impl Into<String>) -> TableBuilder {
        TableBuilder {
            logical_id: name.into(),
            partition_key: None,
            billing_mode: BillingMode::OnDemand,
            removal_policy: RemovalPolicy::Retain,
        }
    }

    pub fn logical_id(&self) -> &str {
        &self.0.logical_id
    }

    pub fn partition_key(&self) -> &PartitionKey {
        &self.0.partition_key
    }

    /// Token for the table name, resolved at deploy time.
    pub fn name_token(&self) -> String {
        attr(self.logical_id(), "TableName")
    }
}

impl Synthesize for Table {
    fn render(&self) -> Resource {
        Resource {
            logical_id: self.logical_id().to_string(),
            kind: "Database::Table",
            properties: json!({
                "PartitionKey": {
                    "Name": self.0.partition_key.name,
                    "Type": self.0.partition_key.attribute_type.as_str(),
                },
                "BillingMode": self.0.billing_mode.as_str(),
                "RemovalPolicy": self.0.removal_policy.as_str(),
            }),
        }
    }
}

/// Builder for [`Table`].
#[derive(Debug)]
pub struct TableBuilder {
    logical_id: String,
    partition_key: Option<PartitionKey>,
    billing_mode: BillingMode,
    removal_policy: RemovalPolicy,
}

impl TableBuilder {
    pub fn partition_key(mut self, name: impl Into<String>, attribute_type: AttributeType) -> Self {
        self.partition_key = Some(PartitionKey {
            name: name.into(),
            attribute_type,
        });
        self
    }

    pub fn billing_mode(mut self, mode: BillingMode) -> Self {
        self.billing_mode = mode;
        self
    }

    pub fn removal_policy(mut self, policy: RemovalPolicy) -> Self {
        self.removal_policy = policy;
        self
    }

    /// Finishes the declaration, validating that a partition key was set.
    pub fn build(self) -> Result<Table, TableError> {
        let partition_key = self
            .partition_key
            .ok_or_else(|| TableError::MissingPartitionKey(self.logical_id.clone()))?;
        Ok(Table(Arc::new(TableInner {
            logical_id: self.logical_id,
            partition_key,
            billing_mode: self.billing_mode,
            removal_policy: self.removal_policy,
        })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_partition_key_fails() {
        let result = Table::builder("SampleDB").build();

        assert_eq!(
            result.err(),
            Some(TableError::MissingPartitionKey("SampleDB".to_string()))
        );
    }

    #[test]
    fn test_render_with_defaults() {
        let table = Table::builder("SampleDB")
            .partition_key("id", AttributeType::String)
            .build()
            .unwrap();

        let rendered = table.render();

        assert_eq!(rendered.kind, "Database::Table");
        assert_eq!(rendered.properties["PartitionKey"]["Name"], "id");
        assert_eq!(rendered.properties["PartitionKey"]["Type"], "S");
        assert_eq!(rendered.properties["BillingMode"], "ON_DEMAND");
        assert_eq!(rendered.properties["RemovalPolicy"], "RETAIN");
    }

    #[test]
    fn test_render_with_destroy_policy() {
        let table = Table::builder("SampleDB")
            .partition_key("id", AttributeType::String)
            .billing_mode(BillingMode::OnDemand)
            .removal_policy(RemovalPolicy::Destroy)
            .build()
            .unwrap();

        assert_eq!(table.render().properties["RemovalPolicy"], "DESTROY");
    }

    #[test]
    fn test_name_token() {
        let table = Table::builder("SampleDB")
            .partition_key("id", AttributeType::String)
            .build()
            .unwrap();

        assert_eq!(table.name_token(), "${SampleDB.TableName}");
    }
}
