//! Store-specific error types.

use crate::action::ActionKind;

/// Errors that can occur while dispatching to a store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No transition registered for the dispatched action's kind
    #[error("Unknown action kind: {0}")]
    UnknownActionKind(ActionKind),

    /// A listener dispatched into the store that is notifying it
    #[error("Re-entrant dispatch of {0} from a subscriber")]
    ReentrantDispatch(ActionKind),

    /// A store lock was poisoned by a panic while held
    #[error("Store lock poisoned")]
    LockPoisoned,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_display() {
        let error = StoreError::UnknownActionKind(ActionKind::Save);
        assert!(error.to_string().contains("Unknown action kind"));
        assert!(error.to_string().contains("save"));

        let error = StoreError::ReentrantDispatch(ActionKind::StartAdd);
        assert!(error.to_string().contains("Re-entrant dispatch"));
        assert!(error.to_string().contains("start_add"));

        let error = StoreError::LockPoisoned;
        assert!(error.to_string().contains("poisoned"));
    }
}
