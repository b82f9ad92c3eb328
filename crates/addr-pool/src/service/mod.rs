//! Service Layer - Orchestration
//!
//! Wraps the pure domain pool with tracing and metrics recording and
//! implements the inbound port.

pub mod pool_service;

pub use pool_service::AddressPoolService;
