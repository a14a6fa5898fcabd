use thiserror::Error;

#[derive(Debug, Error)]
pub enum LeaseError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },
}

impl LeaseError {
    pub(crate) fn invalid(field: &str, reason: impl Into<String>) -> Self {
        LeaseError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_names_field_and_reason() {
        let err = LeaseError::invalid("discount_rate", "must be positive");
        assert_eq!(
            err.to_string(),
            "Invalid input: discount_rate — must be positive"
        );
    }
}
