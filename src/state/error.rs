//! Session state-specific error types.

/// Errors that can occur while building session state.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    /// Seed collection contains the same identifier twice
    #[error("Duplicate employee identifier: {id}")]
    DuplicateIdentifier { id: u64 },

    /// Seed identifier falls outside `1..=len`
    #[error("Employee identifier {id} outside 1..={len}")]
    IdentifierOutOfRange { id: u64, len: u64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_error_display() {
        let error = StateError::DuplicateIdentifier { id: 42 };
        assert!(error.to_string().contains("Duplicate employee identifier"));
        assert!(error.to_string().contains("42"));

        let error = StateError::IdentifierOutOfRange { id: 7, len: 3 };
        assert!(error.to_string().contains("7"));
        assert!(error.to_string().contains("1..=3"));
    }
}
