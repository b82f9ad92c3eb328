//! # addr-pool
//!
//! Deterministic allocation engine for a pool of fixed-width binary
//! addresses (IPv4 host addresses within a subnet), built on a binary
//! allocation trie whose internal nodes cache subtree fullness to prune
//! search.
//!
//! ## Architecture
//!
//! This crate follows Hexagonal Architecture (Ports & Adapters):
//!
//! - **Domain Layer** (`domain/`): Pure logic, no I/O
//!   - `BitArray`: fixed 64-bit value primitive used as the trie path
//!   - `AllocationTrie`: arena-backed binary trie with fullness caching
//!     and a deterministic force-allocate fallback
//!   - `AddressPool`: IPv4 view over the trie with reserved network,
//!     gateway and broadcast addresses
//!   - `PoolConfig` / `PoolConfigBuilder`: validated configuration
//!
//! - **Ports Layer** (`ports/`): Trait definitions
//!   - `AddressPoolApi`: driving port a protocol engine would consume
//!
//! - **Service Layer** (`service/`): Orchestration
//!   - `AddressPoolService`: implements `AddressPoolApi`, adds tracing
//!     and metrics
//!
//! ## Concurrency
//!
//! Fully synchronous and single-writer. Operations are bounded tree walks
//! of at most `host_bits` levels; callers needing shared access serialize
//! externally.
//!
//! ## Usage Example
//!
//! ```
//! use addr_pool::{AddressPool, PoolError};
//! use std::net::Ipv4Addr;
//!
//! let mut pool = AddressPool::new(Ipv4Addr::new(192, 168, 1, 0), 24)?;
//! assert_eq!(pool.count_free(), 253);
//!
//! let granted = pool.allocate(Ipv4Addr::new(192, 168, 1, 10))?;
//! assert_eq!(granted, Ipv4Addr::new(192, 168, 1, 10));
//!
//! // The preferred address is taken: the fallback grants its neighbor.
//! let granted = pool.allocate(Ipv4Addr::new(192, 168, 1, 10))?;
//! assert_eq!(granted, Ipv4Addr::new(192, 168, 1, 11));
//!
//! pool.free(granted)?;
//! # Ok::<(), PoolError>(())
//! ```

pub mod domain;
pub mod error;
pub mod metrics;
pub mod ports;
pub mod service;

// Re-exports for convenience
pub use domain::{
    AddressPool, AllocationTrie, BitArray, NodeState, PoolConfig, PoolConfigBuilder,
    ADDRESS_WIDTH_BITS, MAX_PREFIX_LENGTH,
};
pub use error::PoolError;
pub use metrics::{MetricsRecorder, MetricsSnapshot, NoOpMetrics, PoolMetrics};
pub use ports::AddressPoolApi;
pub use service::AddressPoolService;
