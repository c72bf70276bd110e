//! # Value Objects
//!
//! Immutable types with validation and domain semantics.
//!
//! - [`ChainAddress`]: Validated 20-byte address
//! - [`Pricing`]: Per-unit resource prices
//! - [`Invoice`]: Resource usage billed over a height range

pub mod address;
pub mod invoice;
pub mod pricing;

pub use address::{AddressError, ChainAddress};
pub use invoice::Invoice;
pub use pricing::Pricing;
