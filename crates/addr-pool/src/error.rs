//! Error types for the address pool engine

use thiserror::Error;

/// Errors that can occur while building or operating an address pool
///
/// Taxonomy:
/// - `Exhausted` is recoverable capacity exhaustion; the caller decides
///   what to do next.
/// - `NodeBudgetExceeded` is fatal for the current call only; the trie is
///   left structurally intact and the call can be retried.
/// - `DoubleFree` reports caller misuse without corrupting any state.
/// - `InvalidPrefixLength` rejects an unusable configuration up front.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PoolError {
    #[error("Invalid prefix length: {0} (must be between 1 and 30)")]
    InvalidPrefixLength(u8),

    #[error("Address space exhausted")]
    Exhausted,

    #[error("Node budget of {limit} exceeded")]
    NodeBudgetExceeded { limit: usize },

    #[error("Address is not allocated")]
    DoubleFree,
}
