//! IPv4 address pool over the allocation trie
//!
//! Presents a structured-address view (four octets, most significant
//! first) over [`AllocationTrie`], translating addresses to bit-ordered
//! trie paths and back, and reserving the fixed special addresses of a
//! subnet at construction.

use std::net::Ipv4Addr;

use crate::domain::bit_array::BitArray;
use crate::domain::config::PoolConfig;
use crate::domain::trie::AllocationTrie;
use crate::error::PoolError;

/// Width of the managed address space in bits.
pub const ADDRESS_WIDTH_BITS: u32 = 32;

/// Longest usable prefix; at least two host bits must remain so the
/// network, gateway and broadcast addresses are distinct.
pub const MAX_PREFIX_LENGTH: u8 = 30;

/// Pool of allocatable host addresses within one IPv4 subnet.
///
/// Construction reserves the network address (host bits all zero), the
/// gateway/server address (host bits all one except the lowest) and the
/// broadcast address (host bits all one), in that order. Single-writer:
/// concurrent mutation must be serialized by the caller.
#[derive(Debug)]
pub struct AddressPool {
    trie: AllocationTrie,
    subnet: u32,
    host_bits: u32,
}

impl AddressPool {
    /// Create a pool for `subnet`/`prefix_length` with no node budget.
    ///
    /// # Errors
    /// [`PoolError::InvalidPrefixLength`] unless `0 < prefix_length <= 30`.
    pub fn new(subnet: Ipv4Addr, prefix_length: u8) -> Result<Self, PoolError> {
        Self::build(subnet, prefix_length, None)
    }

    /// Create a pool from a validated configuration.
    ///
    /// # Errors
    /// Configuration validation errors, plus any reservation failure
    /// (a node budget too small to hold the three reserved addresses).
    pub fn from_config(config: &PoolConfig) -> Result<Self, PoolError> {
        config.validate()?;
        Self::build(config.subnet, config.prefix_length, config.node_limit)
    }

    fn build(
        subnet: Ipv4Addr,
        prefix_length: u8,
        node_limit: Option<usize>,
    ) -> Result<Self, PoolError> {
        if prefix_length == 0 || prefix_length > MAX_PREFIX_LENGTH {
            return Err(PoolError::InvalidPrefixLength(prefix_length));
        }

        let host_bits = ADDRESS_WIDTH_BITS - u32::from(prefix_length);
        let trie = match node_limit {
            Some(limit) => AllocationTrie::with_node_limit(host_bits, limit),
            None => AllocationTrie::new(host_bits),
        };
        let subnet = (u32::from(subnet) >> host_bits) << host_bits;

        let mut pool = Self {
            trie,
            subnet,
            host_bits,
        };
        // Any reservation failure aborts construction; the partially
        // built trie is released on drop.
        pool.reserve_fixed_addresses()?;
        Ok(pool)
    }

    /// Reserve network, gateway and broadcast, in that order.
    fn reserve_fixed_addresses(&mut self) -> Result<(), PoolError> {
        let network = BitArray::reset_all();
        let broadcast = BitArray::set_all();
        let gateway = broadcast.with_bit_off(0);

        self.trie.allocate(network)?;
        self.trie.allocate(gateway)?;
        self.trie.allocate(broadcast)?;
        Ok(())
    }

    /// Allocate an address, preferring `preferred`.
    ///
    /// Only the low `host_bits` of `preferred` select the leaf; the
    /// prefix octets of the argument are ignored. On success the granted
    /// host part is returned with the pool's subnet prefix ORed in.
    ///
    /// # Errors
    /// [`PoolError::Exhausted`] or [`PoolError::NodeBudgetExceeded`],
    /// forwarded from the trie walk.
    pub fn allocate(&mut self, preferred: Ipv4Addr) -> Result<Ipv4Addr, PoolError> {
        let host = u64::from(u32::from(preferred) & self.host_mask());
        let granted = self.trie.allocate(BitArray::new(host))?;
        Ok(Ipv4Addr::from(self.subnet | granted.value() as u32))
    }

    /// Free a previously allocated address.
    ///
    /// Only the low `host_bits` of `addr` are consulted; the prefix bits
    /// of the argument are not validated against the pool's subnet.
    ///
    /// # Errors
    /// [`PoolError::DoubleFree`] if the address is not allocated.
    pub fn free(&mut self, addr: Ipv4Addr) -> Result<(), PoolError> {
        self.trie.free(BitArray::new(u64::from(u32::from(addr))))
    }

    /// Number of unallocated addresses remaining.
    #[must_use]
    pub fn count_free(&self) -> usize {
        self.capacity() - self.trie.count_full_leaves()
    }

    /// Total size of the host address space, reserved addresses included.
    #[must_use]
    pub fn capacity(&self) -> usize {
        1usize << self.host_bits
    }

    /// The subnet prefix with all host bits zero.
    #[must_use]
    pub fn subnet(&self) -> Ipv4Addr {
        Ipv4Addr::from(self.subnet)
    }

    /// The reserved gateway/server address.
    #[must_use]
    pub fn gateway(&self) -> Ipv4Addr {
        Ipv4Addr::from(self.subnet | (self.host_mask() & !1))
    }

    /// The reserved broadcast address.
    #[must_use]
    pub fn broadcast(&self) -> Ipv4Addr {
        Ipv4Addr::from(self.subnet | self.host_mask())
    }

    /// Number of address bits below the fixed prefix.
    #[must_use]
    pub fn host_bits(&self) -> u32 {
        self.host_bits
    }

    /// Prefix length the pool was created with.
    #[must_use]
    pub fn prefix_length(&self) -> u8 {
        (ADDRESS_WIDTH_BITS - self.host_bits) as u8
    }

    /// Materialized trie nodes backing this pool.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.trie.node_count()
    }

    pub(crate) fn host_mask(&self) -> u32 {
        (1u32 << self.host_bits) - 1
    }
}
