use thiserror::Error;

/// Errors that can occur while assembling or rendering a stack.
#[derive(Debug, Error)]
pub enum SynthError {
    #[error("duplicate logical id in stack {stack}: {logical_id}")]
    DuplicateLogicalId { stack: String, logical_id: String },
    #[error("duplicate output in stack {stack}: {name}")]
    DuplicateOutput { stack: String, name: String },
    #[error("failed to render template: {0}")]
    Render(#[from] serde_json::Error),
}

/// Result type for synthesis operations.
pub type Result<T> = std::result::Result<T, SynthError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_logical_id_display() {
        let error = SynthError::DuplicateLogicalId {
            stack: "AuthStack".to_string(),
            logical_id: "SampleUserPool".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "duplicate logical id in stack AuthStack: SampleUserPool"
        );
    }

    #[test]
    fn test_duplicate_output_display() {
        let error = SynthError::DuplicateOutput {
            stack: "AuthStack".to_string(),
            name: "UserPoolId".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "duplicate output in stack AuthStack: UserPoolId"
        );
    }
}
