use thiserror::Error;

/// Errors that can occur when declaring a table.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TableError {
    #[error("table {0} is missing a partition key")]
    MissingPartitionKey(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_partition_key_display() {
        assert_eq!(
            TableError::MissingPartitionKey("SampleDB".to_string()).to_string(),
            "table SampleDB is missing a partition key"
        );
    }
}
