//! Ports Layer - Trait definitions
//!
//! The engine has one boundary: the pool API a protocol engine would
//! drive. Network exchange, lease timers and persistence are absent
//! collaborators and have no ports here.

pub mod inbound;

pub use inbound::AddressPoolApi;
