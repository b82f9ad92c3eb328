//! Inbound Ports (Driving Ports)
//!
//! The API an external consumer, such as a real protocol engine, uses to
//! drive the pool. The engine is fully synchronous and single-writer;
//! callers needing shared access must serialize externally, which is why
//! the mutating operations take `&mut self` rather than hiding a lock.

use std::net::Ipv4Addr;

use crate::error::PoolError;

/// Primary address pool API (Driving Port)
pub trait AddressPoolApi: Send {
    /// Allocate an address, preferring `preferred`.
    ///
    /// Grants the exact preferred address when free, otherwise the
    /// deterministic fallback address; see
    /// [`AddressPool::allocate`](crate::AddressPool::allocate).
    fn allocate_address(&mut self, preferred: Ipv4Addr) -> Result<Ipv4Addr, PoolError>;

    /// Free a previously allocated address.
    fn free_address(&mut self, addr: Ipv4Addr) -> Result<(), PoolError>;

    /// Number of unallocated addresses remaining.
    fn count_free(&self) -> usize;
}
