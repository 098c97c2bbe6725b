//! Integration tests for number literal syntax
//!
//! Tests the reader and printer separately and as inverses of each other.

mod printing;
mod reading;
mod round_trip;
