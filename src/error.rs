use thiserror::Error;

/// Errors returned by [`TransitionTable`](crate::TransitionTable) operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    /// Empty pattern, or an operation on a released table. Nothing was mutated.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// Lanes could not be allocated or grown to `requested` states.
    #[error("unable to allocate lanes for {requested} states")]
    AllocationFailure {
        /// Lane length that was being allocated
        requested: usize,
    },

    /// Lookup reached a state with no transition for the next symbol.
    #[error("pattern [ {pattern} ] not found")]
    NotFound {
        /// The pattern, decoded lossily as UTF-8
        pattern: String,
    },
}

impl TableError {
    /// The negative return value used by integer-returning callers.
    pub const SENTINEL: i64 = -1;

    #[inline]
    pub fn sentinel(&self) -> i64 {
        Self::SENTINEL
    }

    #[inline]
    pub fn is_not_found(&self) -> bool {
        matches!(self, TableError::NotFound { .. })
    }
}

/// Convenience result alias.
pub type Result<T> = std::result::Result<T, TableError>;
