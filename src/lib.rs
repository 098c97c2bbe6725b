//! numtower - Scheme numeric tower
//!
//! This crate re-exports both layers of numtower for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 1: numtower_equality   - Value model, eq?/eqv?/equal?
//! Layer 0: numtower_foundation - Numbers, arithmetic, syntax, float codec
//! ```

pub use numtower_equality as equality;
pub use numtower_foundation as foundation;
