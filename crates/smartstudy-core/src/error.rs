//! Engine error types.
//!
//! Empty input, unknown topics and unrecognized option values are not
//! errors: they produce sentinel or fallback results. These variants cover
//! the remaining cases that a caller has to be told about.

use thiserror::Error;

use crate::model::Operation;

/// Errors that can be reported by the study engine.
#[derive(Debug, Error)]
pub enum EngineError {
    /// An unexpected fault occurred while computing a result.
    #[error("internal error during {operation}: {message}")]
    Internal {
        operation: Operation,
        message: String,
    },

    /// The input exceeds the configured per-call size bound.
    #[error("{operation} input is {len} bytes, limit is {limit} bytes")]
    InputTooLarge {
        operation: Operation,
        len: usize,
        limit: usize,
    },
}

impl EngineError {
    /// Returns the operation that produced this error.
    pub fn operation(&self) -> Operation {
        match self {
            EngineError::Internal { operation, .. } => *operation,
            EngineError::InputTooLarge { operation, .. } => *operation,
        }
    }

    /// Returns `true` if retrying with a smaller input could succeed.
    pub fn is_input_error(&self) -> bool {
        matches!(self, EngineError::InputTooLarge { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_human_readable() {
        let err = EngineError::InputTooLarge {
            operation: Operation::Summarize,
            len: 300,
            limit: 200,
        };
        assert_eq!(
            err.to_string(),
            "summarize input is 300 bytes, limit is 200 bytes"
        );
        assert!(err.is_input_error());

        let err = EngineError::Internal {
            operation: Operation::Answer,
            message: "boom".into(),
        };
        assert_eq!(err.to_string(), "internal error during answer: boom");
        assert_eq!(err.operation(), Operation::Answer);
        assert!(!err.is_input_error());
    }
}
