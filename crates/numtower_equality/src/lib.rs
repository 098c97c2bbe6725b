//! Value model and equivalence predicates for numtower.
//!
//! This crate provides:
//! - [`Datum`] - Scheme values with identity and mutable structure
//! - [`is_eq`], [`is_eqv`], [`is_equal`] - The three equivalence predicates
//! - [`equal_bounded`] - `equal?` with a recursion budget
//! - [`ObjectHooks`] and [`ExtendedObject`] - Host-defined equality

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod datum;
pub mod equality;
pub mod hooks;

pub use datum::{Datum, Instance, Pair, Record, RecordType};
pub use equality::{EqualOutcome, Equivalence, default_budget, equal_bounded, is_eq, is_equal, is_eqv};
pub use hooks::{ExtendedObject, NoObjectHooks, ObjectHooks};
