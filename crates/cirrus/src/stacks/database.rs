use cirrus_core::database::{AttributeType, BillingMode, RemovalPolicy, Table};
use cirrus_core::synth::Stack;

use super::ComposeError;

/// The backend's single key-value table.
///
/// Leaf stack with no configuration: the schema is fixed to a string
/// `id` partition key, billed on demand. The destroy-on-teardown policy
/// is a development default and loses data with the deployment.
#[derive(Debug)]
pub struct DatabaseStack {
    pub stack: Stack,
    pub table: Table,
}

impl DatabaseStack {
    pub fn new() -> Result<Self, ComposeError> {
        let mut stack = Stack::new("DatabaseStack");

        let table = Table::builder("SampleDB")
            .partition_key("id", AttributeType::String)
            .billing_mode(BillingMode::OnDemand)
            .removal_policy(RemovalPolicy::Destroy)
            .build()?;
        stack.add(&table)?;

        Ok(Self { stack, table })
    }
}
