//! # Domain
//!
//! Value objects passed to the deposit contract.

pub mod value_objects;
