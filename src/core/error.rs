// This module defines the recoverable error type for sidetable access using the thiserror
// crate. Most sidetable misuse (sentinel keys, out-of-range fixed access, keys from a foreign
// graph) is a programmer error caught by debug assertions on the fast accessors; the checked
// accessors on fixed tables report the first two as SidetableError instead so callers that
// cannot vouch for their keys get a Result. SidetableResult<T> is the convenience alias.

//! Error types for sidetable access.

use crate::ir::KeyKind;
use thiserror::Error;

/// Error returned by the checked sidetable accessors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SidetableError {
    #[error("Invalid {kind} index used for sidetable access")]
    InvalidKey { kind: KeyKind },

    #[error("{kind} index {index} out of bounds for sidetable of size {len}")]
    OutOfBounds {
        kind: KeyKind,
        index: usize,
        len: usize,
    },
}

/// Result type alias for checked sidetable operations.
pub type SidetableResult<T> = Result<T, SidetableError>;
