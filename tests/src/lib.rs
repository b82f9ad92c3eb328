//! # addr-pool Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/       # End-to-end flows over the public API
//!     ├── allocation_flows.rs
//!     └── exhaustion.rs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p addr-pool-tests
//!
//! # Benchmarks
//! cargo bench -p addr-pool-tests
//! ```
