//! Integration tests for host-defined equality

use std::any::Any;

use numtower_equality::{Datum, Equivalence, ExtendedObject, Instance, ObjectHooks, is_equal, is_eqv};

/// An interval type that is `eqv?` when its bounds match.
struct Interval {
    low: i64,
    high: i64,
}

impl ExtendedObject for Interval {
    fn type_name(&self) -> &str {
        "interval"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn eqv(&self, other: &dyn ExtendedObject) -> bool {
        other
            .as_any()
            .downcast_ref::<Self>()
            .is_some_and(|o| o.low == self.low && o.high == self.high)
    }
}

/// A type that only uses the default comparisons.
struct Opaque;

impl ExtendedObject for Opaque {
    fn type_name(&self) -> &str {
        "opaque"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Instances are equal when their first slots are equal.
struct KeyedObjects;

impl ObjectHooks for KeyedObjects {
    fn object_eqv(&self, _x: &Instance, _y: &Instance) -> bool {
        false
    }

    fn object_equal(&self, x: &Instance, y: &Instance) -> bool {
        match (x.slots().first(), y.slots().first()) {
            (Some(a), Some(b)) => is_equal(a, b),
            _ => false,
        }
    }
}

#[test]
fn extended_objects_define_eqv() {
    let a = Datum::extended(Interval { low: 1, high: 5 });
    let b = Datum::extended(Interval { low: 1, high: 5 });
    let c = Datum::extended(Interval { low: 1, high: 6 });
    assert!(is_eqv(&a, &b));
    assert!(!is_eqv(&a, &c));
    assert!(is_equal(&Datum::list([a.clone()]), &Datum::list([b])));
    assert!(!is_eqv(&a, &Datum::extended(Opaque)));
}

#[test]
fn extended_defaults_fall_back_to_identity() {
    let a = Datum::extended(Opaque);
    assert!(is_eqv(&a, &a.clone()));
    assert!(!is_eqv(&a, &Datum::extended(Opaque)));
    assert!(!is_equal(&a, &Datum::extended(Opaque)));
}

#[test]
fn object_hooks_decide_instance_equality() {
    let a = Datum::instance("account", vec![Datum::string("alice"), Datum::from(10)]);
    let b = Datum::instance("account", vec![Datum::string("alice"), Datum::from(20)]);
    let hooked = Equivalence::new().with_hooks(KeyedObjects);
    assert!(!hooked.is_eqv(&a, &b));
    assert!(hooked.is_equal(&a, &b));
    assert!(hooked.is_equal(&Datum::vector([a.clone()]), &Datum::vector([b.clone()])));
    assert!(!is_equal(&a, &b));
}
