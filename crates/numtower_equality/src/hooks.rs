//! Capability interfaces for values whose equality the host defines.

use std::any::Any;

use crate::datum::Instance;

/// Equality for object-system instances (`object-eqv?`, `object-equal?`).
///
/// Consulted only when both operands are [`Instance`]s and they are not the
/// same object.
pub trait ObjectHooks {
    /// `eqv?` on two distinct instances.
    fn object_eqv(&self, x: &Instance, y: &Instance) -> bool;

    /// `equal?` on two distinct instances.
    fn object_equal(&self, x: &Instance, y: &Instance) -> bool;
}

/// Hooks for a host without an object system: distinct instances are never
/// equivalent.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoObjectHooks;

impl ObjectHooks for NoObjectHooks {
    fn object_eqv(&self, _x: &Instance, _y: &Instance) -> bool {
        false
    }

    fn object_equal(&self, _x: &Instance, _y: &Instance) -> bool {
        false
    }
}

/// A host-defined value type carrying its own equality.
///
/// The predicates call these methods only when both operands report the
/// same [`type_name`](ExtendedObject::type_name).
pub trait ExtendedObject {
    /// Tag identifying the type.
    fn type_name(&self) -> &str;

    /// Access for downcasting `other` in the comparison methods.
    fn as_any(&self) -> &dyn Any;

    /// `eqv?` against another value of the same type.
    fn eqv(&self, other: &dyn ExtendedObject) -> bool {
        let _ = other;
        false
    }

    /// `equal?` against another value of the same type; defaults to
    /// [`eqv`](ExtendedObject::eqv).
    fn equal(&self, other: &dyn ExtendedObject) -> bool {
        self.eqv(other)
    }
}
