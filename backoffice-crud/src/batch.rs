//! Batch operation outcomes

use backoffice_common::ServiceError;

/// Aggregate result of a batch operation.
///
/// Every id is attempted regardless of earlier failures; the outcome
/// reports them together so the caller surfaces one message, not one per
/// id.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub succeeded: Vec<String>,
    pub failed: Vec<(String, ServiceError)>,
}

impl BatchOutcome {
    /// Whether at least one id failed
    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }

    /// Whether nothing succeeded
    pub fn all_failed(&self) -> bool {
        self.succeeded.is_empty() && !self.failed.is_empty()
    }

    /// Total ids attempted
    pub fn attempted(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }

    /// The first failure's message, for the single user-visible banner
    pub fn first_error(&self) -> Option<&str> {
        self.failed.first().map(|(_, err)| err.message.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_accounting() {
        let outcome = BatchOutcome {
            succeeded: vec!["x".into(), "z".into()],
            failed: vec![("y".into(), ServiceError::new("locked"))],
        };
        assert!(outcome.has_failures());
        assert!(!outcome.all_failed());
        assert_eq!(outcome.attempted(), 3);
        assert_eq!(outcome.first_error(), Some("locked"));
    }
}
