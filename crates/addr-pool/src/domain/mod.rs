//! Domain Layer - Pure allocation logic
//!
//! This layer contains:
//! - The fixed-width bit pattern primitive
//! - The arena-backed allocation trie
//! - The IPv4 address pool composing the two
//! - Pool configuration
//!
//! RULES:
//! - No I/O operations
//! - No logging or metrics; instrumentation lives in the service layer
//! - Deterministic: identical call sequences produce identical grants

pub mod bit_array;
pub mod config;
pub mod pool;
pub mod trie;

pub use bit_array::BitArray;
pub use config::{PoolConfig, PoolConfigBuilder};
pub use pool::{AddressPool, ADDRESS_WIDTH_BITS, MAX_PREFIX_LENGTH};
pub use trie::{AllocationTrie, NodeState};
