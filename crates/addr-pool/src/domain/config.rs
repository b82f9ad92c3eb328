//! Pool configuration and validation
//!
//! # Example
//!
//! ```
//! use addr_pool::PoolConfig;
//! use std::net::Ipv4Addr;
//!
//! let config = PoolConfig::builder()
//!     .subnet(Ipv4Addr::new(192, 168, 1, 0))
//!     .prefix_length(24)
//!     .build()
//!     .expect("valid config");
//! assert_eq!(config.host_bits(), 8);
//! ```

use std::net::Ipv4Addr;

use serde::{Deserialize, Serialize};

use crate::domain::pool::{ADDRESS_WIDTH_BITS, MAX_PREFIX_LENGTH};
use crate::error::PoolError;

/// Address pool configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolConfig {
    /// Subnet the pool manages; host bits are zeroed at pool creation.
    pub subnet: Ipv4Addr,
    /// Fixed prefix length in bits (1 to 30).
    pub prefix_length: u8,
    /// Optional cap on materialized trie nodes. `None` means unbounded.
    pub node_limit: Option<usize>,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            subnet: Ipv4Addr::new(192, 168, 0, 0),
            prefix_length: 24,
            node_limit: None,
        }
    }
}

impl PoolConfig {
    /// Create a validated configuration.
    pub fn new(subnet: Ipv4Addr, prefix_length: u8) -> Result<Self, PoolError> {
        let config = Self {
            subnet,
            prefix_length,
            node_limit: None,
        };
        config.validate()?;
        Ok(config)
    }

    /// Start building a configuration.
    #[must_use]
    pub fn builder() -> PoolConfigBuilder {
        PoolConfigBuilder::default()
    }

    /// Validate the configuration.
    ///
    /// # Errors
    /// [`PoolError::InvalidPrefixLength`] unless `0 < prefix_length <= 30`.
    pub fn validate(&self) -> Result<(), PoolError> {
        if self.prefix_length == 0 || self.prefix_length > MAX_PREFIX_LENGTH {
            return Err(PoolError::InvalidPrefixLength(self.prefix_length));
        }
        Ok(())
    }

    /// Host bits implied by the prefix length.
    #[must_use]
    pub fn host_bits(&self) -> u32 {
        ADDRESS_WIDTH_BITS - u32::from(self.prefix_length)
    }
}

/// Builder for [`PoolConfig`] with validation
#[derive(Default)]
pub struct PoolConfigBuilder {
    subnet: Option<Ipv4Addr>,
    prefix_length: Option<u8>,
    node_limit: Option<usize>,
}

impl PoolConfigBuilder {
    /// Create a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the subnet address.
    #[must_use]
    pub fn subnet(mut self, subnet: Ipv4Addr) -> Self {
        self.subnet = Some(subnet);
        self
    }

    /// Set the prefix length (1 to 30).
    #[must_use]
    pub fn prefix_length(mut self, prefix_length: u8) -> Self {
        self.prefix_length = Some(prefix_length);
        self
    }

    /// Cap the number of trie nodes the pool may materialize.
    #[must_use]
    pub fn node_limit(mut self, limit: usize) -> Self {
        self.node_limit = Some(limit);
        self
    }

    /// Build the configuration, validating all parameters.
    pub fn build(self) -> Result<PoolConfig, PoolError> {
        let defaults = PoolConfig::default();

        let config = PoolConfig {
            subnet: self.subnet.unwrap_or(defaults.subnet),
            prefix_length: self.prefix_length.unwrap_or(defaults.prefix_length),
            node_limit: self.node_limit,
        };
        config.validate()?;
        Ok(config)
    }
}
