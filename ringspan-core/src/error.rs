//! Error types for the range algebra

use crate::types::SeqPos;
use thiserror::Error;

/// Result type for range operations
pub type RangeResult<T> = Result<T, RangeError>;

/// Errors raised while validating or transforming ranges
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RangeError {
    #[error("Invalid sequence length: {length} (must be at least 1)")]
    InvalidLength { length: SeqPos },

    #[error("Invalid range {start}..{end} for sequence length {length}: {reason}")]
    InvalidRange {
        start: SeqPos,
        end: SeqPos,
        length: SeqPos,
        reason: String,
    },

    #[error("Internal inconsistency in {operation}: {fragments} fragments where at most 2 are possible")]
    InternalInconsistency {
        operation: &'static str,
        fragments: usize,
    },
}

impl RangeError {
    pub fn invalid_range<S: Into<String>>(start: SeqPos, end: SeqPos, length: SeqPos, reason: S) -> Self {
        Self::InvalidRange {
            start,
            end,
            length,
            reason: reason.into(),
        }
    }

    pub fn inconsistency(operation: &'static str, fragments: usize) -> Self {
        log::warn!(
            "{} produced {} fragments; refusing to drop coverage",
            operation,
            fragments
        );
        Self::InternalInconsistency {
            operation,
            fragments,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = RangeError::InvalidLength { length: 0 };
        assert_eq!(err.to_string(), "Invalid sequence length: 0 (must be at least 1)");

        let err = RangeError::invalid_range(3, 12, 10, "end outside sequence");
        assert!(matches!(err, RangeError::InvalidRange { end: 12, .. }));
        assert_eq!(
            err.to_string(),
            "Invalid range 3..12 for sequence length 10: end outside sequence"
        );
    }

    #[test]
    fn test_inconsistency_reports_operation() {
        let err = RangeError::inconsistency("trim", 3);
        assert!(err.to_string().contains("trim"));
        assert!(err.to_string().contains("3 fragments"));
    }
}
