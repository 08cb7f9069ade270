mod error;
mod types;

pub use error::TableError;
pub use types::{AttributeType, BillingMode, PartitionKey, RemovalPolicy, Table, TableBuilder};
