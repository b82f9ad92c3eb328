//! # Exhaustion and Teardown Tests
//!
//! Drains whole pools, checks the terminal `Exhausted` report, and checks
//! node accounting across a full fill/empty cycle.

#[cfg(test)]
mod tests {
    use std::net::Ipv4Addr;
    use std::sync::Arc;

    use addr_pool::{
        AddressPool, AddressPoolApi, AddressPoolService, PoolConfig, PoolError, PoolMetrics,
    };

    use crate::integration::init_tracing;

    /// Drain every usable host address, lowest first.
    fn drain(pool: &mut AddressPool) -> Vec<Ipv4Addr> {
        let start = Ipv4Addr::from(u32::from(pool.subnet()) + 1);
        let mut granted = Vec::new();
        while let Ok(addr) = pool.allocate(start) {
            granted.push(addr);
        }
        granted
    }

    #[test]
    fn test_draining_a_slash_24_grants_every_usable_host() {
        init_tracing();
        let mut pool = AddressPool::new(Ipv4Addr::new(192, 168, 1, 0), 24).unwrap();

        let granted = drain(&mut pool);
        assert_eq!(granted.len(), 253);
        assert_eq!(granted.first(), Some(&Ipv4Addr::new(192, 168, 1, 1)));
        assert_eq!(granted.last(), Some(&Ipv4Addr::new(192, 168, 1, 253)));
        assert_eq!(pool.count_free(), 0);

        assert_eq!(
            pool.allocate(Ipv4Addr::new(192, 168, 1, 1)),
            Err(PoolError::Exhausted)
        );
    }

    #[test]
    fn test_full_drain_materializes_the_complete_tree() {
        let mut pool = AddressPool::new(Ipv4Addr::new(192, 168, 1, 0), 24).unwrap();
        drain(&mut pool);
        // Depth-8 complete binary tree, root included: 2^9 - 1 nodes.
        assert_eq!(pool.node_count(), 511);
    }

    #[test]
    fn test_freeing_everything_restores_full_capacity() {
        let mut pool = AddressPool::new(Ipv4Addr::new(192, 168, 1, 0), 24).unwrap();
        let granted = drain(&mut pool);
        let nodes_at_peak = pool.node_count();

        for addr in &granted {
            pool.free(*addr).unwrap();
        }
        assert_eq!(pool.count_free(), 253);
        assert_eq!(
            pool.node_count(),
            nodes_at_peak,
            "freeing clears leaves but never removes nodes"
        );

        // The whole space is allocatable again, in the same order.
        let regranted = drain(&mut pool);
        assert_eq!(regranted, granted);
        assert_eq!(
            pool.node_count(),
            nodes_at_peak,
            "refilling reuses the materialized arena"
        );
    }

    #[test]
    fn test_service_reports_repeated_exhaustion() {
        let config = PoolConfig::builder()
            .subnet(Ipv4Addr::new(10, 0, 0, 0))
            .prefix_length(29)
            .build()
            .unwrap();
        let metrics = Arc::new(PoolMetrics::new());
        let mut service = AddressPoolService::with_metrics(&config, metrics.clone()).unwrap();

        let mut granted = 0;
        while service.allocate_address(Ipv4Addr::new(10, 0, 0, 1)).is_ok() {
            granted += 1;
        }
        assert_eq!(granted, 5, "a /29 has 8 hosts, 3 reserved");
        assert_eq!(service.count_free(), 0);

        // The drain loop's terminating call was itself recorded.
        assert_eq!(metrics.snapshot().exhaustions, 1);

        for _ in 0..3 {
            assert_eq!(
                service.allocate_address(Ipv4Addr::new(10, 0, 0, 1)),
                Err(PoolError::Exhausted)
            );
        }
        assert_eq!(metrics.snapshot().exhaustions, 4);
    }

    #[test]
    fn test_node_budget_pool_survives_budget_hits() {
        // The three reservations materialize 18 nodes; leave room for a
        // couple more.
        let config = PoolConfig::builder()
            .subnet(Ipv4Addr::new(10, 0, 0, 0))
            .prefix_length(24)
            .node_limit(20)
            .build()
            .unwrap();
        let mut pool = AddressPool::from_config(&config).unwrap();
        let free_before = pool.count_free();

        // Walks that fit the remaining budget succeed...
        let granted = pool.allocate(Ipv4Addr::new(10, 0, 0, 1)).unwrap();
        assert_eq!(granted, Ipv4Addr::new(10, 0, 0, 1));

        // ...and a walk that does not fails without corrupting anything.
        assert_eq!(
            pool.allocate(Ipv4Addr::new(10, 0, 0, 128)),
            Err(PoolError::NodeBudgetExceeded { limit: 20 })
        );
        assert_eq!(pool.count_free(), free_before - 1);

        pool.free(granted).unwrap();
        assert_eq!(pool.count_free(), free_before);
    }
}
