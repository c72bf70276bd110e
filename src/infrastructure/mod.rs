//! # Infrastructure
//!
//! Adapters to external systems: the chain node and contract binding,
//! configuration sources, and tracing setup.

pub mod blockchain;
pub mod telemetry;
