//! Integration tests for Layer 1: Equality
//!
//! Tests the equivalence predicates over numbers and structured values,
//! including cyclic structure and host-defined equality.

mod hosts;
mod numbers;
mod structures;
