//! The error surface of the fact database: malformed predicate input only.
//!
//! Internal invariant violations (a stored key referring to a retired class,
//! a merge losing a fact) are programmer errors, not user-facing ones, and
//! are caught with `debug_assert!` at the call site instead of appearing
//! here.

use std::fmt;
use thiserror::Error;

/// The arity a predicate kind demands of its point list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArityRequirement {
    Exactly(usize),
    AtLeast(usize),
}

impl fmt::Display for ArityRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArityRequirement::Exactly(n) => write!(f, "exactly {n}"),
            ArityRequirement::AtLeast(n) => write!(f, "at least {n}"),
        }
    }
}

/// Errors raised while constructing a predicate from raw input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DatabaseError {
    #[error("unknown predicate kind {0:?}")]
    UnknownPredicateKind(String),

    #[error("predicate {kind} requires {requirement} point(s), got {got}")]
    WrongArity {
        kind: &'static str,
        requirement: ArityRequirement,
        got: usize,
    },
}
