//! Address Pool Service
//!
//! Implements the [`AddressPoolApi`] port over the domain pool, adding
//! structured logging and metrics. The domain layer stays silent; every
//! observable side effect of an operation is emitted here.

use std::net::Ipv4Addr;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::{AddressPool, PoolConfig};
use crate::error::PoolError;
use crate::metrics::{MetricsRecorder, NoOpMetrics};
use crate::ports::AddressPoolApi;

/// Address pool service with injected metrics recorder
pub struct AddressPoolService<M: MetricsRecorder = NoOpMetrics> {
    pool: AddressPool,
    metrics: Arc<M>,
}

impl AddressPoolService<NoOpMetrics> {
    /// Create a service with metrics disabled.
    pub fn new(config: &PoolConfig) -> Result<Self, PoolError> {
        Self::with_metrics(config, Arc::new(NoOpMetrics))
    }
}

impl<M: MetricsRecorder> AddressPoolService<M> {
    /// Create a service recording into `metrics`.
    ///
    /// # Errors
    /// Forwards configuration and reservation errors from pool creation.
    pub fn with_metrics(config: &PoolConfig, metrics: Arc<M>) -> Result<Self, PoolError> {
        let pool = AddressPool::from_config(config)?;
        metrics.record_nodes(pool.node_count());
        debug!(
            subnet = %pool.subnet(),
            prefix_length = pool.prefix_length(),
            free = pool.count_free(),
            "address pool created"
        );
        Ok(Self { pool, metrics })
    }

    /// Read access to the underlying pool.
    #[must_use]
    pub fn pool(&self) -> &AddressPool {
        &self.pool
    }

    /// The injected metrics recorder.
    #[must_use]
    pub fn metrics(&self) -> &M {
        &self.metrics
    }
}

impl<M: MetricsRecorder> AddressPoolApi for AddressPoolService<M> {
    fn allocate_address(&mut self, preferred: Ipv4Addr) -> Result<Ipv4Addr, PoolError> {
        let requested_host = u32::from(preferred) & self.pool.host_mask();

        match self.pool.allocate(preferred) {
            Ok(granted) => {
                let forced = u32::from(granted) & self.pool.host_mask() != requested_host;
                self.metrics.record_allocation(forced);
                self.metrics.record_nodes(self.pool.node_count());
                debug!(
                    %preferred,
                    %granted,
                    forced,
                    free = self.pool.count_free(),
                    "address allocated"
                );
                Ok(granted)
            }
            Err(err @ PoolError::Exhausted) => {
                self.metrics.record_exhaustion();
                warn!(%preferred, "allocation rejected: address space exhausted");
                Err(err)
            }
            Err(err @ PoolError::NodeBudgetExceeded { .. }) => {
                self.metrics.record_budget_failure();
                self.metrics.record_nodes(self.pool.node_count());
                warn!(%preferred, %err, "allocation rejected: node budget");
                Err(err)
            }
            Err(err) => Err(err),
        }
    }

    fn free_address(&mut self, addr: Ipv4Addr) -> Result<(), PoolError> {
        match self.pool.free(addr) {
            Ok(()) => {
                self.metrics.record_free();
                debug!(%addr, free = self.pool.count_free(), "address freed");
                Ok(())
            }
            Err(err @ PoolError::DoubleFree) => {
                self.metrics.record_double_free();
                warn!(%addr, "free rejected: address not allocated");
                Err(err)
            }
            Err(err) => Err(err),
        }
    }

    fn count_free(&self) -> usize {
        self.pool.count_free()
    }
}
