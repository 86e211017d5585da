//! Evaluation-time error taxonomy (spec §7).

use axon_common::Identifier;
use std::fmt;

#[derive(Clone, Debug)]
pub enum EvalError {
    /// Same error class as the analyzer's `NOT_IN_SCOPE`, raised at runtime.
    UndefinedIdentifier(Identifier),
    /// A callable was applied with the wrong number of arguments.
    ArityMismatch { expected: usize, actual: usize },
    /// A node's shape doesn't match one of the eight known tags.
    InvalidFormat,
    /// A definition's tag isn't one of the eight known tags.
    UnknownDefType,
    /// The halt predicate returned `true`.
    Aborted,
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvalError::UndefinedIdentifier(id) => write!(f, "undefined identifier `{id}`"),
            EvalError::ArityMismatch { expected, actual } => {
                write!(f, "arity mismatch: expected {expected} argument(s), got {actual}")
            }
            EvalError::InvalidFormat => write!(f, "structurally malformed definition"),
            EvalError::UnknownDefType => write!(f, "unknown definition tag"),
            EvalError::Aborted => write!(f, "evaluation aborted by halt predicate"),
        }
    }
}

impl std::error::Error for EvalError {}
