//! Integration tests for Layer 0: the numeric tower
//!
//! Tests kind promotion, arithmetic across kinds, integer division,
//! transcendental functions, and the float codec.

mod arithmetic;
mod floats;
mod transcendental;
